//! Request lifecycle subsystem.
//!
//! # Data Flow
//! ```text
//! send():
//!     Idle check → resolve EffectiveRequest → InFlight
//!         → transport call ┐
//!         → timeout alarm  ┴─ race → settle (data or error)
//!
//! settle:
//!     record outcome → rotate CancellationToken → back to Idle
//! ```
//!
//! # Design Decisions
//! - Explicit tri-state machine; invalid flag combinations (e.g. in-flight
//!   with a half-recorded outcome) are unrepresentable
//! - One episode at a time per lifecycle (single-flight)
//! - Cancellation tokens are single-use and rotated when an episode settles

pub mod hooks;
pub mod manager;
pub mod state;

pub use hooks::{ErrorHook, ResponseHook};
pub use manager::RequestLifecycle;
pub use state::{LifecycleState, Loading};
