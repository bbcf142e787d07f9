//! Config-merging HTTP request lifecycle manager.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌────────────────────────────────────────────────┐
//!                     │               REQUEST LIFECYCLE                │
//!                     │                                                │
//!   send() trigger    │  ┌───────────┐       ┌───────────┐            │
//!   ──────────────────┼─▶│  config   │──────▶│ lifecycle │            │
//!                     │  │  resolve  │       │  manager  │            │
//!                     │  └───────────┘       └─────┬─────┘            │
//!                     │        ▲                   │                  │
//!                     │        │                   ▼                  │
//!                     │  ┌─────┴─────┐   ┌─────────────────────────┐  │
//!                     │  │  ambient  │   │ transport call ◀─race─▶ │  │
//!                     │  │   scope   │   │      timeout alarm      │  │
//!                     │  └───────────┘   └────────────┬────────────┘  │
//!                     │                               │               │
//!   data / error /    │                   ┌───────────▼───────────┐   │
//!   loading snapshot  │                   │ settle: record, rotate │  │
//!   ◀─────────────────┼───────────────────│ token, re-arm to Idle │   │
//!                     │                   └───────────────────────┘   │
//!                     └────────────────────────────────────────────────┘
//! ```
//!
//! One lifecycle instance drives at most one request at a time: `send()`
//! merges the per-call configuration with the shared ambient defaults,
//! races the transport call against a timeout alarm, and records the
//! outcome in an observable `data` / `error` / `loading` triple before
//! re-arming itself for the next dispatch.

// Core subsystems
pub mod config;
pub mod lifecycle;
pub mod transport;

// Cross-cutting concerns
pub mod error;
pub mod observability;

pub use config::{AmbientConfig, AmbientScope, EffectiveRequest, RequestConfig};
pub use error::FetchError;
pub use lifecycle::{LifecycleState, Loading, RequestLifecycle};
pub use transport::{HttpTransport, RawResponse, Transport, TransportError};
