//! The host UI tree boundary
//!
//! Umbra never owns the nodes it re-themes. Everything it knows about the tree
//! comes through [`UiHost`], and every mutation goes back through it. Node
//! identities are opaque; a host must report a destroyed node as not alive (or
//! answer `None` / [`HostError::StaleNode`](crate::HostError::StaleNode)) and
//! must never hand the same identity to a different node.

use std::time::Duration;

use smallvec::SmallVec;

use crate::color::Color;
use crate::error::Result;
use crate::geometry::Size;
use crate::guard::Suppression;

/// Opaque node identity, stable for the node's lifetime
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

/// What kind of visual a node is
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Sprite / sliced image
    Image,
    /// Raw texture surface
    Surface,
    /// Text run
    Text,
    /// Anything else (layout groups, canvases)
    Container,
}

impl NodeKind {
    /// Short label used in debug lines
    pub fn label(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Surface => "surface",
            Self::Text => "text",
            Self::Container => "container",
        }
    }

    pub fn is_surface_like(self) -> bool {
        matches!(self, Self::Image | Self::Surface)
    }
}

/// How a root canvas is rendered
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RenderSpace {
    #[default]
    Overlay,
    Camera,
    World,
}

/// Component tag bit set
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ComponentTags {
    bits: u8,
}

impl ComponentTags {
    pub const NONE: ComponentTags = ComponentTags { bits: 0 };
    pub const TOOLTIP: u8 = 0b0001;
    pub const HINT: u8 = 0b0010;
    pub const INSPECTION: u8 = 0b0100;
    /// The node is the target graphic of an interactive control
    pub const SELECTABLE_TARGET: u8 = 0b1000;

    /// Any of the popup-ish tags
    pub const POPUP_LIKE: u8 = Self::TOOLTIP | Self::HINT | Self::INSPECTION;

    pub const fn from_bits(bits: u8) -> Self {
        Self { bits }
    }

    pub const fn bits(self) -> u8 {
        self.bits
    }

    pub const fn contains(self, flag: u8) -> bool {
        self.bits & flag != 0
    }

    pub const fn union(self, other: ComponentTags) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    pub const fn is_popup_like(self) -> bool {
        self.contains(Self::POPUP_LIKE)
    }
}

/// Access to an externally-owned, mutable UI tree.
///
/// Getters return `None` for dead nodes. Setters return
/// [`HostError::StaleNode`](crate::HostError::StaleNode) for dead nodes.
pub trait UiHost {
    /// Monotonic host time (used for throttling and deferred passes)
    fn elapsed(&self) -> Duration;

    /// Root canvases currently present, including inactive ones
    fn roots(&self) -> Vec<NodeId>;

    fn render_space(&self, root: NodeId) -> Option<RenderSpace>;

    /// Number of descendants under a root at this moment
    fn descendant_count(&self, root: NodeId) -> Option<usize>;

    /// Append every image, surface and text node under `root` (inactive included)
    fn graphics_under(&self, root: NodeId, out: &mut Vec<NodeId>);

    /// The root canvas a node renders under
    fn root_of(&self, node: NodeId) -> Option<NodeId>;

    fn is_alive(&self, node: NodeId) -> bool;

    fn kind(&self, node: NodeId) -> Option<NodeKind>;

    fn name(&self, node: NodeId) -> Option<&str>;

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    fn tags(&self, node: NodeId) -> ComponentTags;

    /// Bounding size in layout units
    fn size(&self, node: NodeId) -> Option<Size>;

    /// Glyph size for text nodes
    fn glyph_size(&self, node: NodeId) -> Option<f32>;

    fn color(&self, node: NodeId) -> Option<Color>;

    fn enabled(&self, node: NodeId) -> Option<bool>;

    fn input_blocking(&self, node: NodeId) -> Option<bool>;

    fn set_color(&mut self, node: NodeId, color: Color) -> Result<()>;

    fn set_enabled(&mut self, node: NodeId, enabled: bool) -> Result<()>;

    fn set_input_blocking(&mut self, node: NodeId, blocking: bool) -> Result<()>;

    /// Start routing host color assignments and pre-render callbacks to the engine.
    ///
    /// The facility must consult `guard` and pass writes through untouched
    /// while it is active.
    fn install_hooks(&mut self, guard: Suppression) -> Result<()>;

    fn uninstall_hooks(&mut self);
}

/// Iterator over a node and its ancestors, nearest first, up to a depth limit
pub struct Ancestors<'a, H: UiHost + ?Sized> {
    host: &'a H,
    next: Option<NodeId>,
    remaining: usize,
}

impl<'a, H: UiHost + ?Sized> Ancestors<'a, H> {
    /// Start at `node` itself; `max_depth` counts the node as depth 0
    pub fn new(host: &'a H, node: NodeId, max_depth: usize) -> Self {
        Self {
            host,
            next: Some(node),
            remaining: max_depth,
        }
    }
}

impl<H: UiHost + ?Sized> Iterator for Ancestors<'_, H> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.next?;
        self.remaining -= 1;
        self.next = self.host.parent(current);
        Some(current)
    }
}

/// Root-first `/`-joined name path for debug output
pub fn node_path<H: UiHost + ?Sized>(host: &H, node: NodeId, max_depth: usize) -> String {
    let names: SmallVec<[&str; 16]> = Ancestors::new(host, node, max_depth)
        .map(|id| host.name(id).unwrap_or("?"))
        .collect();

    let mut path = String::new();
    for (i, name) in names.iter().rev().enumerate() {
        if i > 0 {
            path.push('/');
        }
        path.push_str(name);
    }
    path
}
