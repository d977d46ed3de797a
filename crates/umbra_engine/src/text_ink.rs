//! Text boost and ink tinting
//!
//! Text is handled apart from surfaces because hosts flash text to a
//! highlight white on hover and back. The engine keeps a per-node *base ink*
//! that only moves on non-highlight observations, and computes every output
//! from it.

use rustc_hash::FxHashMap;
use umbra_core::{Color, HostError, NodeId, UiHost, COLOR_EPSILON};
use umbra_theme::TextTint;

use crate::classify::{tokens, NodeFacts};

pub const HIGHLIGHT_MIN_CHANNEL: f32 = 0.96;
pub const HIGHLIGHT_MAX_CHROMA: f32 = 0.04;
pub const HIGHLIGHT_MIN_ALPHA: f32 = 0.9;

/// Luminance dim text is lifted toward. Text already at or above it is left alone.
pub const BOOST_FLOOR: f32 = 0.72;

/// Near-white, unsaturated and opaque: a transient hover/selection color
pub fn is_highlight_white(color: Color) -> bool {
    color.min_channel() >= HIGHLIGHT_MIN_CHANNEL
        && color.chroma() <= HIGHLIGHT_MAX_CHROMA
        && color.a >= HIGHLIGHT_MIN_ALPHA
}

/// Lift luminance toward [`BOOST_FLOOR`] by `amount` (0..=1), keeping hue
pub fn boost(color: Color, amount: f32) -> Color {
    let lum = color.luminance();
    if amount <= 0.0 || lum >= BOOST_FLOOR {
        return color;
    }
    let wanted = lum + (BOOST_FLOOR - lum) * amount.min(1.0);
    // Blending toward white raises luminance linearly: lum + (1 - lum) * t
    let t = (wanted - lum) / (1.0 - lum);
    Color::lerp(&color, &Color::WHITE.with_alpha(color.a), t)
}

/// Where a text node sits, as far as ink choice goes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextContext {
    Plain,
    /// Spell / ability name inside a spell context
    SpellName,
    /// Any other text inside a spell context (descriptions, costs)
    SpellBody,
    /// Journal, encyclopedia and lore pages
    Lore,
}

impl TextContext {
    pub fn of(facts: &NodeFacts) -> Self {
        if facts.name_has_any(tokens::SPELL_CONTEXT_DEPTH, tokens::SPELL_CONTEXT) {
            let named = facts.name_has_any(tokens::SPELL_NAME_DEPTH, tokens::SPELL_NAME);
            let body = facts.name_has_any(tokens::SPELL_BODY_DEPTH, tokens::SPELL_BODY);
            if named && !body {
                Self::SpellName
            } else {
                Self::SpellBody
            }
        } else if facts.name_has_any(tokens::LORE_DEPTH, tokens::LORE) {
            Self::Lore
        } else {
            Self::Plain
        }
    }
}

/// Ink to show for `base`, or `None` to leave the text alone
pub fn ink_for(base: Color, context: TextContext, text: &TextTint) -> Option<Color> {
    if !text.enabled {
        return None;
    }
    if text.skip_colored_segments && base.chroma() > text.colored_chroma_threshold {
        return None;
    }

    let (ink, strength) = match context {
        TextContext::SpellBody => return None,
        TextContext::SpellName if text.spell_name.enabled => {
            (text.spell_name.color(), text.spell_name.strength)
        }
        TextContext::SpellName => return None,
        TextContext::Lore if text.lore.enabled => (text.lore.color(), text.lore.strength),
        TextContext::Lore | TextContext::Plain => (text.ink(), text.tint_strength),
    };

    let lifted = boost(base, text.boost);
    Some(Color::lerp(&lifted, &ink.with_alpha(lifted.a), strength))
}

/// Per-node text state: base ink, context, and what the engine last wrote
#[derive(Debug, Default)]
pub struct InkCache {
    base: FxHashMap<NodeId, Color>,
    contexts: FxHashMap<NodeId, TextContext>,
    last_written: FxHashMap<NodeId, Color>,
}

impl InkCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an observed host color and return the base ink to work from
    pub fn observe(&mut self, node: NodeId, color: Color) -> Color {
        if !is_highlight_white(color) {
            self.base.insert(node, color);
            return color;
        }
        self.base.get(&node).copied().unwrap_or(color)
    }

    pub fn base(&self, node: NodeId) -> Option<Color> {
        self.base.get(&node).copied()
    }

    pub fn context<H: UiHost + ?Sized>(&mut self, host: &H, node: NodeId) -> Option<TextContext> {
        if let Some(context) = self.contexts.get(&node) {
            return Some(*context);
        }
        let context = TextContext::of(&NodeFacts::gather(host, node)?);
        self.contexts.insert(node, context);
        Some(context)
    }

    pub fn record_written(&mut self, node: NodeId, color: Color) {
        self.last_written.insert(node, color);
    }

    pub fn last_written(&self, node: NodeId) -> Option<Color> {
        self.last_written.get(&node).copied()
    }

    pub fn forget_written(&mut self, node: NodeId) {
        self.last_written.remove(&node);
    }

    pub fn forget_context(&mut self, node: NodeId) {
        self.contexts.remove(&node);
    }

    pub fn remove(&mut self, node: NodeId) {
        self.base.remove(&node);
        self.contexts.remove(&node);
        self.last_written.remove(&node);
    }

    pub fn clear(&mut self) {
        self.base.clear();
        self.contexts.clear();
        self.last_written.clear();
    }
}

/// Full-pass text transform. Returns whether a write happened.
///
/// A current color that differs from what the engine last wrote came from the
/// host outside the interception hook and is taken as a new observation.
pub fn apply_text<H: UiHost + ?Sized>(
    host: &mut H,
    node: NodeId,
    inks: &mut InkCache,
    text: &TextTint,
) -> Result<bool, HostError> {
    let current = host.color(node).ok_or(HostError::StaleNode(node))?;
    let Some(context) = inks.context(&*host, node) else {
        return Err(HostError::StaleNode(node));
    };

    let ours = inks
        .last_written(node)
        .is_some_and(|written| written.approx_eq(&current, COLOR_EPSILON));
    let base = if ours {
        inks.base(node).unwrap_or(current)
    } else {
        inks.observe(node, current)
    };

    let Some(ink) = ink_for(base, context, text) else {
        // Undo a tint the engine applied earlier and the host has not replaced
        inks.forget_written(node);
        let desired = base.with_alpha(current.a);
        if ours && !desired.approx_eq(&current, COLOR_EPSILON) {
            host.set_color(node, desired)?;
            return Ok(true);
        }
        return Ok(false);
    };

    let desired = ink.with_alpha(current.a);
    inks.record_written(node, desired);
    if desired.approx_eq(&current, COLOR_EPSILON) {
        return Ok(false);
    }
    host.set_color(node, desired)?;
    Ok(true)
}
