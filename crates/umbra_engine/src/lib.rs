//! Umbra Engine
//!
//! Re-themes a UI tree owned by another application: darkens and tints panel
//! backgrounds, popups and chat panels, boosts and inks text, and hides HUD
//! chrome on request, without full-tree scans every frame and without
//! flicker when the host repaints colors itself.
//!
//! # Pieces
//!
//! - [`classify`]: ordered name/tag/geometry rules deciding each node's [`Role`]
//! - [`role_cache`]: bounded memo of verdicts
//! - [`discovery`]: per-root candidate lists rebuilt on descendant-count change
//! - [`original_state`]: pristine snapshots every output is computed from
//! - [`transform`] and [`text_ink`]: tint, hide and restore
//! - [`intercept`]: substitution for host-driven color assignments
//! - [`scheduler`] and [`lifecycle`]: when passes run, and engine state
//! - [`headless`]: an in-memory host for tests and demos
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use umbra_core::{Color, RenderSpace, Size, UiHost};
//! use umbra_engine::{headless::HeadlessTree, Signal, ThemeEngine};
//! use umbra_theme::ThemeConfig;
//!
//! let mut tree = HeadlessTree::new();
//! let root = tree.add_root("Inventory", RenderSpace::Overlay);
//! let panel = tree.add_image(root, "PanelBg", Size::new(640.0, 480.0), Color::rgb(0.9, 0.85, 0.7));
//!
//! let mut engine = ThemeEngine::new(ThemeConfig::default());
//! engine.handle(&mut tree, Signal::Enable).unwrap();
//! tree.step(&mut engine, Duration::from_millis(16));
//!
//! let tinted = tree.color(panel).unwrap();
//! assert!(tinted.luminance() < Color::rgb(0.9, 0.85, 0.7).luminance());
//!
//! engine.handle(&mut tree, Signal::Disable).unwrap();
//! assert_eq!(tree.color(panel), Some(Color::rgb(0.9, 0.85, 0.7)));
//! ```

pub mod classify;
pub mod discovery;
pub mod engine;
pub mod error;
pub mod headless;
pub mod intercept;
pub mod lifecycle;
pub mod original_state;
pub mod role_cache;
pub mod scheduler;
pub mod text_ink;
pub mod transform;

pub use classify::{classify, HudGroup, NodeFacts, Role};
pub use discovery::{Discovery, DiscoveryReport, RootCache};
pub use engine::{PassSummary, Signal, ThemeEngine};
pub use error::{EngineError, Result};
pub use lifecycle::{LifecycleEvent, LifecycleState};
pub use original_state::{OriginalState, OriginalStore};
pub use scheduler::PassKind;
