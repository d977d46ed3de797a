//! Theme configuration handling
//!
//! The engine reads a [`ThemeConfig`] on every apply pass and never writes it.
//! Every section is `#[serde(default)]`, so a partial TOML file (or an empty
//! one) yields the documented defaults for everything it leaves out.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use umbra_core::Size;

use crate::error::{ConfigError, Result};
use crate::presets::TintPreset;
use crate::tint::{SurfaceTint, TextTint};

/// Bounds for the discovery interval, in seconds
pub const DISCOVERY_INTERVAL_BOUNDS: (f32, f32) = (0.5, 10.0);

/// HUD chrome hiding toggles
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HudHiding {
    /// Left-side cast bars and the action bar strip
    pub hide_left_and_action_bar: bool,
    /// Center plate and right-side utility buttons (portraits stay)
    pub hide_center_and_right: bool,
    pub hide_dialogue: bool,
    /// Large parchment backgrounds behind journal/encyclopedia pages
    pub hide_journal_background: bool,
}

impl HudHiding {
    pub fn any(&self) -> bool {
        self.hide_left_and_action_bar
            || self.hide_center_and_right
            || self.hide_dialogue
            || self.hide_journal_background
    }
}

/// Size thresholds used by classification and candidacy
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Unnamed surfaces at least this large are treated as background panels
    pub background_min: [f32; 2],
    /// Surfaces with both sides at or below this are icons
    pub small_icon_max: f32,
    /// Never tint icons
    pub skip_small_images: bool,
    /// World-space surfaces this large pass the gate when they look like a sheet
    pub world_moderate: [f32; 2],
    /// World-space surfaces this large always pass the gate
    pub world_large: [f32; 2],
    /// Minimum glyph size for body text candidates
    pub min_glyph_size: f32,
    /// Minimum glyph size for popup/chat text candidates
    pub min_glyph_size_popup: f32,
}

impl Thresholds {
    pub fn background_min(&self) -> Size {
        Size::new(self.background_min[0], self.background_min[1])
    }

    pub fn world_moderate(&self) -> Size {
        Size::new(self.world_moderate[0], self.world_moderate[1])
    }

    pub fn world_large(&self) -> Size {
        Size::new(self.world_large[0], self.world_large[1])
    }

    fn sanitize(&mut self) {
        for v in self
            .background_min
            .iter_mut()
            .chain(self.world_moderate.iter_mut())
            .chain(self.world_large.iter_mut())
        {
            *v = v.max(0.0);
        }
        self.small_icon_max = self.small_icon_max.max(0.0);
        self.min_glyph_size = self.min_glyph_size.max(0.0);
        self.min_glyph_size_popup = self.min_glyph_size_popup.max(0.0);
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            background_min: [96.0, 64.0],
            small_icon_max: 40.0,
            skip_small_images: false,
            world_moderate: [360.0, 220.0],
            world_large: [700.0, 450.0],
            min_glyph_size: 10.0,
            min_glyph_size_popup: 8.0,
        }
    }
}

/// Top-level theme configuration (umbra.toml)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Main background panels
    pub background: SurfaceTint,
    /// Popups, tooltips, inspection windows
    pub popup: SurfaceTint,
    /// Chat and log panels
    pub chat: SurfaceTint,
    pub text: TextTint,
    pub hud: HudHiding,
    pub thresholds: Thresholds,
    /// Comma separated, case-insensitive name substrings that are never touched
    pub exclude_tokens: String,
    pub discovery_interval_secs: f32,
    pub initial_delay_secs: f32,
    pub scene_early_delay_secs: f32,
    pub scene_late_delay_secs: f32,
    pub role_cache_capacity: usize,
    /// Emit one debug line per classification
    pub debug_log: bool,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            background: SurfaceTint::default(),
            popup: SurfaceTint {
                strength: 0.45,
                ..SurfaceTint::default()
            },
            chat: SurfaceTint {
                enabled: false,
                preset: TintPreset::Slate,
                ..SurfaceTint::default()
            },
            text: TextTint::default(),
            hud: HudHiding::default(),
            thresholds: Thresholds::default(),
            exclude_tokens: String::new(),
            discovery_interval_secs: 1.0,
            initial_delay_secs: 0.25,
            scene_early_delay_secs: 0.5,
            scene_late_delay_secs: 3.0,
            role_cache_capacity: 16_384,
            debug_log: false,
        }
    }
}

impl ThemeConfig {
    /// Parse from TOML text and sanitize
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: ThemeConfig = toml::from_str(text)?;
        Ok(config.sanitized())
    }

    /// Load from a TOML file and sanitize
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!("loaded theme config from {}", path.display());
        Ok(config)
    }

    /// Serialize back to TOML
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Clamp every slider into its documented range
    pub fn sanitized(mut self) -> Self {
        self.background.sanitize();
        self.popup.sanitize();
        self.chat.sanitize();
        self.text.sanitize();
        self.thresholds.sanitize();
        self.initial_delay_secs = self.initial_delay_secs.max(0.0);
        self.scene_early_delay_secs = self.scene_early_delay_secs.max(0.0);
        self.scene_late_delay_secs = self.scene_late_delay_secs.max(0.0);
        self.role_cache_capacity = self.role_cache_capacity.max(64);
        self
    }

    /// Discovery throttle interval, clamped to [`DISCOVERY_INTERVAL_BOUNDS`]
    pub fn discovery_interval(&self) -> Duration {
        let (lo, hi) = DISCOVERY_INTERVAL_BOUNDS;
        let secs = if self.discovery_interval_secs.is_finite() {
            self.discovery_interval_secs.clamp(lo, hi)
        } else {
            lo
        };
        Duration::from_secs_f32(secs)
    }

    pub fn initial_delay(&self) -> Duration {
        secs_to_duration(self.initial_delay_secs)
    }

    pub fn scene_early_delay(&self) -> Duration {
        secs_to_duration(self.scene_early_delay_secs)
    }

    pub fn scene_late_delay(&self) -> Duration {
        secs_to_duration(self.scene_late_delay_secs)
    }

    /// Parsed exclude tokens: trimmed, lowercased, de-duplicated, order kept
    pub fn exclude_token_list(&self) -> Vec<String> {
        let mut tokens: Vec<String> = Vec::new();
        for part in self.exclude_tokens.split(',') {
            let token = part.trim().to_lowercase();
            if !token.is_empty() && !tokens.contains(&token) {
                tokens.push(token);
            }
        }
        tokens
    }

    /// Whether any surface category would change a color
    pub fn any_surface_tint(&self) -> bool {
        self.background.is_active() || self.popup.is_active() || self.chat.is_active()
    }
}

fn secs_to_duration(secs: f32) -> Duration {
    if secs.is_finite() && secs > 0.0 {
        Duration::from_secs_f32(secs)
    } else {
        Duration::ZERO
    }
}
