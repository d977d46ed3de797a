//! Built-in tint targets.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use umbra_core::Color;

/// Built-in tint target catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TintPreset {
    /// Warm light parchment.
    Parchment,
    /// Deep brown, the default panel darkener.
    Umber,
    /// Cool blue-gray.
    Slate,
    /// Neutral near-black.
    Charcoal,
    /// Warm off-white ink for text.
    Ink,
    /// Muted gold, used for spell names.
    Gilt,
}

impl TintPreset {
    /// Stable preset id for config/serialization.
    pub fn id(self) -> &'static str {
        match self {
            Self::Parchment => "parchment",
            Self::Umber => "umber",
            Self::Slate => "slate",
            Self::Charcoal => "charcoal",
            Self::Ink => "ink",
            Self::Gilt => "gilt",
        }
    }

    /// User-facing display name.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Parchment => "Parchment",
            Self::Umber => "Umber",
            Self::Slate => "Slate",
            Self::Charcoal => "Charcoal",
            Self::Ink => "Warm ink",
            Self::Gilt => "Gilt",
        }
    }

    /// Full preset list.
    pub fn all() -> &'static [TintPreset] {
        const PRESETS: [TintPreset; 6] = [
            TintPreset::Parchment,
            TintPreset::Umber,
            TintPreset::Slate,
            TintPreset::Charcoal,
            TintPreset::Ink,
            TintPreset::Gilt,
        ];
        &PRESETS
    }

    /// Look a preset up by its id.
    pub fn from_id(id: &str) -> Option<TintPreset> {
        Self::all().iter().copied().find(|p| p.id() == id)
    }

    /// Opaque target color for this preset.
    pub fn color(self) -> Color {
        match self {
            Self::Parchment => Color::rgb(0.92, 0.86, 0.75),
            Self::Umber => Color::from_hex(0x2B2119),
            Self::Slate => Color::from_hex(0x262B33),
            Self::Charcoal => Color::from_hex(0x161616),
            Self::Ink => Color::rgb(0.95, 0.93, 0.88),
            Self::Gilt => Color::rgb(0.85, 0.72, 0.35),
        }
    }
}

impl Display for TintPreset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
