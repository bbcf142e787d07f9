//! Observable lifecycle state.

use crate::error::FetchError;

/// Phase of the request state machine.
///
/// A request may only be dispatched from `Idle`. `InFlight` covers the
/// race between the transport call and the timeout alarm. `Settled` is the
/// transient phase in which exactly one continuation records the outcome;
/// the machine re-arms itself back to `Idle` immediately afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Loading {
    /// No request active; `send` will dispatch.
    Idle,
    /// A request is racing its timeout alarm.
    InFlight,
    /// An outcome was just recorded; re-arm is imminent.
    Settled,
}

impl Loading {
    /// Whether `send` would dispatch a request right now.
    pub fn is_idle(&self) -> bool {
        matches!(self, Loading::Idle)
    }

    /// Whether a request is currently active.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Loading::InFlight)
    }
}

/// Snapshot of a lifecycle's observable fields.
#[derive(Debug, Clone)]
pub struct LifecycleState<T, E = FetchError> {
    /// Payload of the most recent successful episode. Survives later
    /// failures; callers should treat it as stale once `error` is set.
    pub data: Option<T>,

    /// Error from the most recent failed episode. Cleared by a success.
    pub error: Option<E>,

    /// Current machine phase.
    pub loading: Loading,
}

impl<T, E> LifecycleState<T, E> {
    pub(crate) fn initial() -> Self {
        Self {
            data: None,
            error: None,
            loading: Loading::Idle,
        }
    }
}

impl<T, E> Default for LifecycleState<T, E> {
    fn default() -> Self {
        Self::initial()
    }
}
