//! Per-category tint settings

use serde::{Deserialize, Serialize};
use umbra_core::Color;

use crate::presets::TintPreset;

/// Strengths at or below this are treated as "off"
pub const STRENGTH_EPSILON: f32 = 0.0001;

fn clamp_rgb(rgb: Option<[f32; 3]>) -> Option<[f32; 3]> {
    rgb.map(|[r, g, b]| [r.clamp(0.0, 1.0), g.clamp(0.0, 1.0), b.clamp(0.0, 1.0)])
}

fn preset_or_custom(preset: TintPreset, custom_rgb: Option<[f32; 3]>) -> Color {
    match custom_rgb {
        Some(rgb) => Color::from_rgb_array(rgb),
        None => preset.color(),
    }
}

/// Tint applied to a family of surfaces (backgrounds, popups, chat)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceTint {
    pub enabled: bool,
    /// Blend factor toward the target (0 = untouched, 1 = target)
    pub strength: f32,
    /// Extra darkening of the target (0 = preset as-is, 1 = black)
    pub darkness: f32,
    pub preset: TintPreset,
    /// Overrides `preset` when set
    pub custom_rgb: Option<[f32; 3]>,
    /// -1 = cooler, +1 = warmer
    pub warmth: f32,
}

impl SurfaceTint {
    /// Target color (opaque) after darkness and warmth
    pub fn target(&self) -> Color {
        preset_or_custom(self.preset, self.custom_rgb)
            .scaled(1.0 - self.darkness.clamp(0.0, 1.0))
            .warmed(self.warmth)
    }

    /// Strength to use, zero when the category is off
    pub fn effective_strength(&self) -> f32 {
        if self.enabled {
            self.strength.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    pub fn is_active(&self) -> bool {
        self.effective_strength() > STRENGTH_EPSILON
    }

    pub(crate) fn sanitize(&mut self) {
        self.strength = self.strength.clamp(0.0, 1.0);
        self.darkness = self.darkness.clamp(0.0, 1.0);
        self.warmth = self.warmth.clamp(-1.0, 1.0);
        self.custom_rgb = clamp_rgb(self.custom_rgb);
    }
}

impl Default for SurfaceTint {
    fn default() -> Self {
        Self {
            enabled: true,
            strength: 0.35,
            darkness: 0.0,
            preset: TintPreset::Umber,
            custom_rgb: None,
            warmth: 0.0,
        }
    }
}

/// A secondary ink for a specific text context (spell names, lore pages)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccentInk {
    pub enabled: bool,
    pub strength: f32,
    pub preset: TintPreset,
    pub custom_rgb: Option<[f32; 3]>,
}

impl AccentInk {
    pub fn color(&self) -> Color {
        preset_or_custom(self.preset, self.custom_rgb)
    }

    fn sanitize(&mut self) {
        self.strength = self.strength.clamp(0.0, 1.0);
        self.custom_rgb = clamp_rgb(self.custom_rgb);
    }
}

impl Default for AccentInk {
    fn default() -> Self {
        Self {
            enabled: false,
            strength: 1.0,
            preset: TintPreset::Gilt,
            custom_rgb: None,
        }
    }
}

/// Text boost and ink tint
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextTint {
    pub enabled: bool,
    /// How far dim text is lifted toward the readability floor
    pub boost: f32,
    /// Blend factor toward the ink color
    pub tint_strength: f32,
    pub preset: TintPreset,
    pub custom_rgb: Option<[f32; 3]>,
    /// Leave already-colored emphasis text alone
    pub skip_colored_segments: bool,
    /// Chroma above which text counts as colored emphasis
    pub colored_chroma_threshold: f32,
    pub spell_name: AccentInk,
    pub lore: AccentInk,
}

impl TextTint {
    pub fn ink(&self) -> Color {
        preset_or_custom(self.preset, self.custom_rgb)
    }

    pub(crate) fn sanitize(&mut self) {
        self.boost = self.boost.clamp(0.0, 1.0);
        self.tint_strength = self.tint_strength.clamp(0.0, 1.0);
        self.colored_chroma_threshold = self.colored_chroma_threshold.clamp(0.0, 1.0);
        self.custom_rgb = clamp_rgb(self.custom_rgb);
        self.spell_name.sanitize();
        self.lore.sanitize();
    }
}

impl Default for TextTint {
    fn default() -> Self {
        Self {
            enabled: false,
            boost: 0.25,
            tint_strength: 0.35,
            preset: TintPreset::Ink,
            custom_rgb: None,
            skip_colored_segments: true,
            colored_chroma_threshold: 0.35,
            spell_name: AccentInk::default(),
            lore: AccentInk {
                preset: TintPreset::Parchment,
                custom_rgb: Some([0.75, 0.70, 0.60]),
                ..AccentInk::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_rgb_overrides_preset() {
        let tint = SurfaceTint {
            custom_rgb: Some([0.1, 0.2, 0.3]),
            ..SurfaceTint::default()
        };
        assert_eq!(tint.target(), Color::rgb(0.1, 0.2, 0.3));
    }

    #[test]
    fn test_full_darkness_is_black() {
        let tint = SurfaceTint {
            preset: TintPreset::Parchment,
            darkness: 1.0,
            ..SurfaceTint::default()
        };
        assert_eq!(tint.target(), Color::BLACK);
    }

    #[test]
    fn test_disabled_category_has_no_strength() {
        let tint = SurfaceTint {
            enabled: false,
            strength: 0.9,
            ..SurfaceTint::default()
        };
        assert_eq!(tint.effective_strength(), 0.0);
        assert!(!tint.is_active());
    }
}
