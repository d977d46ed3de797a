//! Umbra Theme Configuration
//!
//! Everything the re-theming engine reads but never writes:
//!
//! - **Surface tints**: per-category strength, darkness, warmth and target
//!   color for background panels, popups and chat/log panels
//! - **Text tint**: readability boost, ink color, and context inks for spell
//!   names and lore pages
//! - **HUD hiding**: toggles for hiding HUD chrome groups
//! - **Thresholds**: the size heuristics used by classification
//! - **Exclude tokens**: user-supplied name substrings that are never touched
//!
//! # Quick Start
//!
//! ```rust
//! use umbra_theme::{ThemeConfig, TintPreset};
//!
//! let config = ThemeConfig::from_toml_str(
//!     r#"
//!     exclude_tokens = "minimap, cursor"
//!
//!     [background]
//!     strength = 0.5
//!     preset = "slate"
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.background.preset, TintPreset::Slate);
//! assert_eq!(config.exclude_token_list(), vec!["minimap", "cursor"]);
//! ```
//!
//! Thresholds were tuned against one specific host UI; treat them as defaults
//! to adjust, not as constants.

pub mod config;
pub mod error;
pub mod presets;
pub mod tint;

pub use config::{HudHiding, ThemeConfig, Thresholds, DISCOVERY_INTERVAL_BOUNDS};
pub use error::{ConfigError, Result};
pub use presets::TintPreset;
pub use tint::{AccentInk, SurfaceTint, TextTint, STRENGTH_EPSILON};
