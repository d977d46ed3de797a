//! Engine error types

use thiserror::Error;
use umbra_core::HostError;
use umbra_theme::ConfigError;

/// Errors surfaced by [`ThemeEngine`](crate::ThemeEngine) entry points.
///
/// Failures inside a pass never reach the host; they are logged and the pass
/// is abandoned.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Host(#[from] HostError),

    /// The host refused to install interception hooks; the engine stays disabled
    #[error("failed to install interception hooks: {0}")]
    HookInstall(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
