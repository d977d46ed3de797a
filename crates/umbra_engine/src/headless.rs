//! In-memory host tree
//!
//! A slotmap-backed [`UiHost`] with a manual clock. It stands in for a real
//! host application in tests and the demo: it can report destroyed nodes as
//! stale, simulate host-driven repaints through [`HeadlessTree::assign_color`],
//! refuse hook installation, reject writes to chosen nodes, and count engine
//! writes that arrive while the hooks are installed but the suppression guard
//! is not held.

use std::time::Duration;

use rustc_hash::FxHashSet;
use slotmap::{new_key_type, Key, KeyData, SlotMap};
use umbra_core::{
    Color, ComponentTags, HostError, NodeId, NodeKind, RenderSpace, Result, Size, Suppression,
    UiHost,
};

use crate::engine::ThemeEngine;

new_key_type! {
    struct NodeKey;
}

fn to_id(key: NodeKey) -> NodeId {
    NodeId(key.data().as_ffi())
}

fn to_key(id: NodeId) -> NodeKey {
    NodeKey::from(KeyData::from_ffi(id.0))
}

#[derive(Debug)]
struct HeadlessNode {
    name: String,
    kind: NodeKind,
    parent: Option<NodeKey>,
    children: Vec<NodeKey>,
    tags: ComponentTags,
    size: Size,
    glyph_size: Option<f32>,
    color: Color,
    enabled: bool,
    input_blocking: bool,
    /// Set on roots only
    space: Option<RenderSpace>,
}

impl HeadlessNode {
    fn new(name: &str, kind: NodeKind, parent: Option<NodeKey>) -> Self {
        Self {
            name: name.to_string(),
            kind,
            parent,
            children: Vec::new(),
            tags: ComponentTags::NONE,
            size: Size::ZERO,
            glyph_size: None,
            color: Color::WHITE,
            enabled: true,
            input_blocking: kind != NodeKind::Container,
            space: None,
        }
    }
}

#[derive(Debug, Default)]
pub struct HeadlessTree {
    nodes: SlotMap<NodeKey, HeadlessNode>,
    roots: Vec<NodeKey>,
    clock: Duration,
    hooks: Option<Suppression>,
    refuse_hooks: bool,
    /// Setters on these nodes fail with `Unsupported`
    failing: FxHashSet<NodeId>,
    writes: usize,
    unguarded_writes: usize,
}

impl HeadlessTree {
    pub fn new() -> Self {
        Self::default()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Building
    // ─────────────────────────────────────────────────────────────────────────

    pub fn add_root(&mut self, name: &str, space: RenderSpace) -> NodeId {
        let mut node = HeadlessNode::new(name, NodeKind::Container, None);
        node.space = Some(space);
        let key = self.nodes.insert(node);
        self.roots.push(key);
        to_id(key)
    }

    pub fn add_container(&mut self, parent: NodeId, name: &str) -> NodeId {
        self.insert_child(parent, HeadlessNode::new(name, NodeKind::Container, None))
    }

    pub fn add_image(&mut self, parent: NodeId, name: &str, size: Size, color: Color) -> NodeId {
        let mut node = HeadlessNode::new(name, NodeKind::Image, None);
        node.size = size;
        node.color = color;
        self.insert_child(parent, node)
    }

    pub fn add_surface(&mut self, parent: NodeId, name: &str, size: Size, color: Color) -> NodeId {
        let mut node = HeadlessNode::new(name, NodeKind::Surface, None);
        node.size = size;
        node.color = color;
        self.insert_child(parent, node)
    }

    pub fn add_text(&mut self, parent: NodeId, name: &str, glyph_size: f32, color: Color) -> NodeId {
        let mut node = HeadlessNode::new(name, NodeKind::Text, None);
        node.size = Size::new(200.0, glyph_size * 1.5);
        node.glyph_size = Some(glyph_size);
        node.color = color;
        self.insert_child(parent, node)
    }

    fn insert_child(&mut self, parent: NodeId, mut node: HeadlessNode) -> NodeId {
        let parent_key = to_key(parent);
        node.parent = Some(parent_key);
        let key = self.nodes.insert(node);
        if let Some(parent) = self.nodes.get_mut(parent_key) {
            parent.children.push(key);
        }
        to_id(key)
    }

    pub fn set_tags(&mut self, node: NodeId, tags: ComponentTags) {
        if let Some(n) = self.nodes.get_mut(to_key(node)) {
            n.tags = tags;
        }
    }

    pub fn set_size(&mut self, node: NodeId, size: Size) {
        if let Some(n) = self.nodes.get_mut(to_key(node)) {
            n.size = size;
        }
    }

    /// Destroy a node and its whole subtree
    pub fn remove(&mut self, node: NodeId) {
        let key = to_key(node);
        let Some(removed) = self.nodes.remove(key) else {
            return;
        };
        if let Some(parent) = removed.parent.and_then(|p| self.nodes.get_mut(p)) {
            parent.children.retain(|c| *c != key);
        }
        self.roots.retain(|r| *r != key);
        for child in removed.children {
            self.remove(to_id(child));
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Clock and host behavior
    // ─────────────────────────────────────────────────────────────────────────

    pub fn advance(&mut self, dt: Duration) {
        self.clock += dt;
    }

    /// Make the next `install_hooks` fail
    pub fn refuse_hooks(&mut self, refuse: bool) {
        self.refuse_hooks = refuse;
    }

    /// Make every setter on `node` fail until [`Self::clear_write_failures`]
    pub fn fail_writes_to(&mut self, node: NodeId) {
        self.failing.insert(node);
    }

    pub fn clear_write_failures(&mut self) {
        self.failing.clear();
    }

    pub fn hooks_installed(&self) -> bool {
        self.hooks.is_some()
    }

    /// Run the engine's pre-render hook, as the host does every frame
    pub fn render_frame(&mut self, engine: &mut ThemeEngine) {
        engine.on_pre_render(self);
    }

    /// Advance the clock by `dt` and render a frame
    pub fn step(&mut self, engine: &mut ThemeEngine, dt: Duration) {
        self.advance(dt);
        self.render_frame(engine);
    }

    /// A host-driven color assignment, routed through the engine when hooked
    pub fn assign_color(&mut self, engine: &mut ThemeEngine, node: NodeId, color: Color) {
        let value = match &self.hooks {
            Some(guard) if !guard.is_active() => engine.on_color_assign(&*self, node, color),
            _ => color,
        };
        if let Some(n) = self.nodes.get_mut(to_key(node)) {
            n.color = value;
        }
    }

    /// A host write that bypasses the hooks entirely
    pub fn assign_color_unhooked(&mut self, node: NodeId, color: Color) {
        if let Some(n) = self.nodes.get_mut(to_key(node)) {
            n.color = color;
        }
    }

    /// Total writes made through [`UiHost`] setters
    pub fn write_count(&self) -> usize {
        self.writes
    }

    /// Setter calls made while hooked but outside a suppression scope
    pub fn unguarded_writes(&self) -> usize {
        self.unguarded_writes
    }

    pub fn reset_counters(&mut self) {
        self.writes = 0;
        self.unguarded_writes = 0;
    }

    fn node_mut(&mut self, node: NodeId) -> Result<&mut HeadlessNode> {
        self.writes += 1;
        if self.hooks.as_ref().is_some_and(|guard| !guard.is_active()) {
            self.unguarded_writes += 1;
        }
        if self.failing.contains(&node) && self.nodes.contains_key(to_key(node)) {
            return Err(HostError::Unsupported(node));
        }
        self.nodes
            .get_mut(to_key(node))
            .ok_or(HostError::StaleNode(node))
    }

    fn count_under(&self, key: NodeKey) -> usize {
        self.nodes
            .get(key)
            .map(|n| {
                n.children
                    .iter()
                    .map(|c| 1 + self.count_under(*c))
                    .sum()
            })
            .unwrap_or(0)
    }

    fn collect_graphics(&self, key: NodeKey, out: &mut Vec<NodeId>) {
        let Some(node) = self.nodes.get(key) else {
            return;
        };
        for child in &node.children {
            if let Some(c) = self.nodes.get(*child) {
                if c.kind != NodeKind::Container {
                    out.push(to_id(*child));
                }
            }
            self.collect_graphics(*child, out);
        }
    }
}

impl UiHost for HeadlessTree {
    fn elapsed(&self) -> Duration {
        self.clock
    }

    fn roots(&self) -> Vec<NodeId> {
        self.roots.iter().map(|k| to_id(*k)).collect()
    }

    fn render_space(&self, root: NodeId) -> Option<RenderSpace> {
        self.nodes.get(to_key(root))?.space
    }

    fn descendant_count(&self, root: NodeId) -> Option<usize> {
        let key = to_key(root);
        self.nodes.contains_key(key).then(|| self.count_under(key))
    }

    fn graphics_under(&self, root: NodeId, out: &mut Vec<NodeId>) {
        self.collect_graphics(to_key(root), out);
    }

    fn root_of(&self, node: NodeId) -> Option<NodeId> {
        let mut key = to_key(node);
        loop {
            let n = self.nodes.get(key)?;
            match n.parent {
                Some(parent) => key = parent,
                None => return n.space.map(|_| to_id(key)),
            }
        }
    }

    fn is_alive(&self, node: NodeId) -> bool {
        self.nodes.contains_key(to_key(node))
    }

    fn kind(&self, node: NodeId) -> Option<NodeKind> {
        self.nodes.get(to_key(node)).map(|n| n.kind)
    }

    fn name(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(to_key(node)).map(|n| n.name.as_str())
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(to_key(node))?.parent.map(to_id)
    }

    fn tags(&self, node: NodeId) -> ComponentTags {
        self.nodes
            .get(to_key(node))
            .map(|n| n.tags)
            .unwrap_or(ComponentTags::NONE)
    }

    fn size(&self, node: NodeId) -> Option<Size> {
        self.nodes.get(to_key(node)).map(|n| n.size)
    }

    fn glyph_size(&self, node: NodeId) -> Option<f32> {
        self.nodes.get(to_key(node))?.glyph_size
    }

    fn color(&self, node: NodeId) -> Option<Color> {
        let n = self.nodes.get(to_key(node))?;
        (n.kind != NodeKind::Container).then_some(n.color)
    }

    fn enabled(&self, node: NodeId) -> Option<bool> {
        self.nodes.get(to_key(node)).map(|n| n.enabled)
    }

    fn input_blocking(&self, node: NodeId) -> Option<bool> {
        self.nodes.get(to_key(node)).map(|n| n.input_blocking)
    }

    fn set_color(&mut self, node: NodeId, color: Color) -> Result<()> {
        let n = self.node_mut(node)?;
        if n.kind == NodeKind::Container {
            return Err(HostError::Unsupported(node));
        }
        n.color = color;
        Ok(())
    }

    fn set_enabled(&mut self, node: NodeId, enabled: bool) -> Result<()> {
        self.node_mut(node)?.enabled = enabled;
        Ok(())
    }

    fn set_input_blocking(&mut self, node: NodeId, blocking: bool) -> Result<()> {
        self.node_mut(node)?.input_blocking = blocking;
        Ok(())
    }

    fn install_hooks(&mut self, guard: Suppression) -> Result<()> {
        if self.refuse_hooks {
            return Err(HostError::Hook("hook facility refused installation".to_string()));
        }
        self.hooks = Some(guard);
        Ok(())
    }

    fn uninstall_hooks(&mut self) {
        self.hooks = None;
    }
}
