//! Umbra Core
//!
//! Foundational types shared by the Umbra re-theming engine:
//!
//! - **Color math**: blending, luminance, desaturation and warmth shifts
//! - **Host boundary**: the [`UiHost`] trait through which the engine observes
//!   and mutates a UI tree it does not own
//! - **Write suppression**: the [`Suppression`] guard that keeps the engine's
//!   own writes from re-entering its interception hooks
//!
//! # Example
//!
//! ```rust
//! use umbra_core::Color;
//!
//! let parchment = Color::from_hex(0xEBDBBF);
//! let dimmed = Color::lerp(&parchment.desaturate(0.35), &Color::BLACK, 0.5);
//! assert!(dimmed.luminance() < parchment.luminance());
//! ```

pub mod color;
pub mod error;
pub mod geometry;
pub mod guard;
pub mod host;

pub use color::{Color, COLOR_EPSILON};
pub use error::{HostError, Result};
pub use geometry::Size;
pub use guard::{SuppressScope, Suppression};
pub use host::{node_path, Ancestors, ComponentTags, NodeId, NodeKind, RenderSpace, UiHost};
