//! Surface tinting, HUD hiding and restore
//!
//! Every output is a function of the node's [`OriginalState`] and the current
//! configuration, never of the color the node happens to hold right now.

use umbra_core::{Color, ComponentTags, HostError, NodeId, Size, UiHost, COLOR_EPSILON};
use umbra_theme::{SurfaceTint, ThemeConfig};

use crate::classify::{tokens, HudGroup, Role};
use crate::original_state::OriginalState;

/// Desaturation applied to the original before blending
pub const DESATURATE_AMOUNT: f32 = 0.35;

/// Journal parchment must be at least this large to be hidden
pub const JOURNAL_PARCHMENT_MIN: Size = Size::new(600.0, 400.0);

/// Count of writes one transform call performed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Writes {
    pub color: usize,
    pub enabled: usize,
    pub input_blocking: usize,
}

impl Writes {
    pub fn total(&self) -> usize {
        self.color + self.enabled + self.input_blocking
    }

    pub fn add(&mut self, other: Writes) {
        self.color += other.color;
        self.enabled += other.enabled;
        self.input_blocking += other.input_blocking;
    }
}

/// Blend an original color toward a category target
pub fn tint_color(original: Color, tint: &SurfaceTint) -> Color {
    if !tint.is_active() {
        return original;
    }
    let base = original.desaturate(DESATURATE_AMOUNT);
    let target = tint.target().with_alpha(original.a);
    Color::lerp(&base, &target, tint.effective_strength())
}

/// Tint settings for a tintable role
pub fn category(role: Role, config: &ThemeConfig) -> Option<&SurfaceTint> {
    match role {
        Role::Background | Role::JournalLike => Some(&config.background),
        Role::Popup => Some(&config.popup),
        Role::Chat => Some(&config.chat),
        _ => None,
    }
}

/// Left / action-bar art worth hiding: large, and not an icon or button
pub fn is_hud_art(name: &str, size: Size) -> bool {
    let (w, h) = (size.width, size.height);
    if w <= 90.0 && h <= 90.0 {
        return false;
    }
    if w <= 8.0 || h <= 8.0 {
        return false;
    }

    let name = name.to_lowercase();
    if tokens::HUD_ART_KEEP.iter().any(|t| name.contains(t)) {
        return true;
    }
    if tokens::HUD_ART_SKIP.iter().any(|t| name.contains(t)) {
        return false;
    }
    size.area() >= 12_000.0 && (w >= 160.0 || h >= 160.0)
}

/// Only very large, explicitly background-named journal art
pub fn is_journal_parchment(name: &str, size: Size) -> bool {
    if !size.reaches(JOURNAL_PARCHMENT_MIN) {
        return false;
    }
    let name = name.to_lowercase();
    tokens::JOURNAL_PARCHMENT.iter().any(|t| name.contains(t))
        || (name.contains("parchment") && name.contains("bg"))
}

/// Whether the node should currently be hidden under `config`
pub fn should_hide<H: UiHost + ?Sized>(
    host: &H,
    node: NodeId,
    role: Role,
    config: &ThemeConfig,
) -> bool {
    if host.tags(node).contains(ComponentTags::SELECTABLE_TARGET) {
        return false;
    }
    let hud = &config.hud;
    let name = host.name(node).unwrap_or("");
    let size = host.size(node).unwrap_or(Size::ZERO);

    match role {
        Role::HudGroup(HudGroup::Left | HudGroup::ActionBar) => {
            hud.hide_left_and_action_bar && is_hud_art(name, size)
        }
        Role::HudGroup(HudGroup::Center | HudGroup::Right) => hud.hide_center_and_right,
        Role::HudGroup(HudGroup::Dialogue) => hud.hide_dialogue,
        Role::JournalLike => hud.hide_journal_background && is_journal_parchment(name, size),
        _ => false,
    }
}

fn set_color_if_changed<H: UiHost + ?Sized>(
    host: &mut H,
    node: NodeId,
    desired: Color,
    writes: &mut Writes,
) -> Result<(), HostError> {
    let current = host.color(node).ok_or(HostError::StaleNode(node))?;
    if !current.approx_eq(&desired, COLOR_EPSILON) {
        host.set_color(node, desired)?;
        writes.color += 1;
    }
    Ok(())
}

fn set_input_if_changed<H: UiHost + ?Sized>(
    host: &mut H,
    node: NodeId,
    desired: bool,
    writes: &mut Writes,
) -> Result<(), HostError> {
    if host.input_blocking(node) != Some(desired) {
        host.set_input_blocking(node, desired)?;
        writes.input_blocking += 1;
    }
    Ok(())
}

/// Bring an image/surface to the state its role and config call for
pub fn apply_surface<H: UiHost + ?Sized>(
    host: &mut H,
    node: NodeId,
    role: Role,
    original: &OriginalState,
    config: &ThemeConfig,
) -> Result<Writes, HostError> {
    let mut writes = Writes::default();
    let hidden = should_hide(host, node, role, config);

    match role {
        _ if hidden => {
            set_color_if_changed(host, node, original.color.with_alpha(0.0), &mut writes)?;
            set_input_if_changed(host, node, false, &mut writes)?;
        }
        Role::HudGroup(_) => {
            set_color_if_changed(host, node, original.color, &mut writes)?;
            set_input_if_changed(host, node, original.input_blocking, &mut writes)?;
        }
        Role::JournalLike => {
            set_input_if_changed(host, node, original.input_blocking, &mut writes)?;
            set_color_if_changed(host, node, tint_color(original.color, &config.background), &mut writes)?;
        }
        Role::Background | Role::Popup | Role::Chat => {
            if let Some(tint) = category(role, config) {
                set_color_if_changed(host, node, tint_color(original.color, tint), &mut writes)?;
            }
        }
        Role::Portrait | Role::Excluded | Role::Untouched => {}
    }
    Ok(writes)
}

/// Write the original record back verbatim. A second call writes nothing.
pub fn restore<H: UiHost + ?Sized>(
    host: &mut H,
    node: NodeId,
    original: &OriginalState,
) -> Result<Writes, HostError> {
    let mut writes = Writes::default();

    let current = host.color(node).ok_or(HostError::StaleNode(node))?;
    if current != original.color {
        host.set_color(node, original.color)?;
        writes.color += 1;
    }
    if host.enabled(node) != Some(original.enabled) {
        host.set_enabled(node, original.enabled)?;
        writes.enabled += 1;
    }
    set_input_if_changed(host, node, original.input_blocking, &mut writes)?;

    Ok(writes)
}
