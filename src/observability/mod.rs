//! Observability subsystem.
//!
//! Lifecycle and transport code emit structured `tracing` events with the
//! episode id attached, so one request can be followed across the dispatch,
//! race, and settle phases. This module only hosts the subscriber setup;
//! event emission lives next to the code it describes.

pub mod logging;
