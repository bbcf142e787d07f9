//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! AmbientConfig (shared defaults)   RequestConfig (per call)
//!     → scope.rs (read-only handle)     → held by the lifecycle
//!         └──────────────┬──────────────────┘
//!                        ▼
//!                 resolve.rs (merge, fresh on every dispatch)
//!                        ▼
//!                 EffectiveRequest (handed to the transport)
//! ```
//!
//! # Design Decisions
//! - Merge runs on every dispatch; nothing is cached between sends
//! - Per-call values win over ambient values, key-by-key for headers
//! - All config types deserialize from TOML with every field optional
//! - The ambient scope is shared read-only; lifecycles never write it

pub mod loader;
pub mod resolve;
pub mod schema;
pub mod scope;

use thiserror::Error;

pub use resolve::resolve;
pub use schema::{AmbientConfig, EffectiveRequest, RequestConfig};
pub use scope::AmbientScope;

/// Errors raised while loading or resolving configuration.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// The per-call config has no base URL.
    #[error("request url is empty")]
    MissingUrl,

    /// The concatenated url + endpoint + query does not parse as a URL.
    #[error("invalid request url '{url}': {reason}")]
    InvalidUrl {
        /// The full URL that failed to parse.
        url: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// The structured body could not be serialized to JSON.
    #[error("unserializable request body: {0}")]
    Body(String),

    /// A config file could not be read.
    #[error("failed to read config file '{path}': {reason}")]
    Io {
        /// File that was being read.
        path: String,
        /// Underlying I/O diagnostic.
        reason: String,
    },

    /// A config file could not be parsed.
    #[error("failed to parse config file '{path}': {reason}")]
    Parse {
        /// File that was being parsed.
        path: String,
        /// Underlying parse diagnostic.
        reason: String,
    },
}
