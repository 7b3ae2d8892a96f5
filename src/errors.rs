// Copyright (c) 2025 - Cowboy AI, Inc.
//! Error types for topology planning and provisioning

use thiserror::Error;

use crate::provider::ProviderError;

/// Errors that can occur while planning or applying a network topology
#[derive(Debug, Error)]
pub enum PlannerError {
    /// Invalid input spec, detected before any provisioning call
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A provisioning call failed; the remainder of the plan was aborted
    #[error("{context}: {source}")]
    Provisioning {
        /// Human-readable description of the operation that failed
        context: String,
        /// The underlying provider failure
        #[source]
        source: ProviderError,
    },

    /// An expected output key is missing after apply
    #[error("State mismatch: {0}")]
    StateMismatch(String),
}

impl PlannerError {
    /// Wrap a provider failure with the failing operation's context
    pub fn provisioning(context: impl Into<String>, source: ProviderError) -> Self {
        PlannerError::Provisioning {
            context: context.into(),
            source,
        }
    }
}

/// Result type for planner operations
pub type PlannerResult<T> = Result<T, PlannerError>;
