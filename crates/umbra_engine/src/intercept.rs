//! Substitution for host-driven color assignments
//!
//! The host repaints node colors whenever it likes (state transitions, hover,
//! its own per-frame animation). Each assignment is routed through here and
//! replaced by a value computed from the node's stable original, so a
//! repaint can neither undo the tint nor stack a second tint on top of it.

use umbra_core::{Color, NodeId, UiHost};
use umbra_theme::ThemeConfig;

use crate::classify::Role;
use crate::discovery::reaches_glyph_minimum;
use crate::original_state::{OriginalState, OriginalStore};
use crate::text_ink::{ink_for, InkCache};
use crate::transform::{category, should_hide, tint_color};

/// Original record for `node`, created from the incoming value on first sight
fn original_or_incoming<H: UiHost + ?Sized>(
    host: &H,
    originals: &mut OriginalStore,
    node: NodeId,
    incoming: Color,
) -> OriginalState {
    originals.insert_if_absent(
        node,
        OriginalState {
            color: incoming,
            enabled: host.enabled(node).unwrap_or(true),
            input_blocking: host.input_blocking(node).unwrap_or(false),
        },
    )
}

/// Value an image/surface should receive instead of `incoming`
pub fn substitute_surface<H: UiHost + ?Sized>(
    host: &H,
    node: NodeId,
    role: Role,
    incoming: Color,
    originals: &mut OriginalStore,
    config: &ThemeConfig,
) -> Color {
    let thresholds = &config.thresholds;
    if thresholds.skip_small_images
        && host
            .size(node)
            .is_some_and(|size| size.fits_within(thresholds.small_icon_max))
    {
        return incoming;
    }

    if should_hide(host, node, role, config) {
        let original = original_or_incoming(host, originals, node, incoming);
        return original.color.with_alpha(0.0);
    }
    // Visible HUD group art and inactive categories keep what the host assigns
    let Some(tint) = category(role, config).filter(|tint| tint.is_active()) else {
        return incoming;
    };

    let original = original_or_incoming(host, originals, node, incoming);
    tint_color(original.color, tint).with_alpha(incoming.a)
}

/// Value a text node should receive instead of `incoming`
pub fn substitute_text<H: UiHost + ?Sized>(
    host: &H,
    node: NodeId,
    role: Role,
    incoming: Color,
    originals: &mut OriginalStore,
    inks: &mut InkCache,
    config: &ThemeConfig,
) -> Color {
    // Same candidacy rule as discovery
    if !role.is_tintable() || !reaches_glyph_minimum(host, node, role, &config.thresholds) {
        return incoming;
    }
    let Some(context) = inks.context(host, node) else {
        return incoming;
    };

    let base = inks.observe(node, incoming);
    let Some(ink) = ink_for(base, context, &config.text) else {
        inks.forget_written(node);
        return incoming;
    };

    // A hover white is never recorded as the original
    original_or_incoming(host, originals, node, base.with_alpha(incoming.a));
    let out = ink.with_alpha(incoming.a);
    inks.record_written(node, out);
    out
}
