//! Error taxonomy for request lifecycle failures.
//!
//! Every failure an episode can produce is caught and recorded in the
//! lifecycle's `error` field; nothing is rethrown to the caller.

use std::time::Duration;

use thiserror::Error;

use crate::config::ConfigError;
use crate::transport::TransportError;

/// Errors recorded by a request episode.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// The transport rejected the call (network failure, bad status).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The episode's own timeout alarm fired and cancelled the call.
    #[error("request timed out after {after:?}")]
    TimedOut {
        /// Timeout that was armed for the episode.
        after: Duration,
    },

    /// The call was cancelled by something other than the timeout alarm.
    #[error("request cancelled")]
    Cancelled,

    /// The effective request could not be resolved from configuration.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The response hook failed to produce a value from the raw response.
    #[error("response decode failed: {0}")]
    Decode(String),
}

impl FetchError {
    /// Whether this failure was caused by the episode's timeout alarm.
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::TimedOut { .. })
    }
}
