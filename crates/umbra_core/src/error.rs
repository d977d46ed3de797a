//! Host boundary error types

use thiserror::Error;

use crate::host::NodeId;

/// Errors reported by a [`UiHost`](crate::host::UiHost) implementation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// The node was destroyed by the host since it was last observed
    #[error("node {0:?} is no longer alive")]
    StaleNode(NodeId),

    /// The node does not carry the requested field (e.g. color on a container)
    #[error("node {0:?} does not support this operation")]
    Unsupported(NodeId),

    /// The hook facility refused to install or remove interception hooks
    #[error("hook facility error: {0}")]
    Hook(String),
}

/// Result type for host operations
pub type Result<T> = std::result::Result<T, HostError>;
