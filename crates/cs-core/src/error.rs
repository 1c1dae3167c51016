//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `CsError` as one variant
//! where they need to surface a core failure.

use thiserror::Error;

use crate::AgentId;

/// The top-level error type for `cs-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CsError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("agent {agent} has a non-finite {field}")]
    NonFinite {
        agent: AgentId,
        field: &'static str,
    },
}

/// Shorthand result type for all `cs-*` crates.
pub type CsResult<T> = Result<T, CsError>;
