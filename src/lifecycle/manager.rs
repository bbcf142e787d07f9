//! Request lifecycle driver.
//!
//! # Responsibilities
//! - Enforce the single-flight guarantee (one episode at a time)
//! - Resolve the effective request fresh on every dispatch
//! - Race the transport call against the timeout alarm
//! - Rotate the cancellation token when an episode settles
//!
//! # Design Decisions
//! - Exactly one continuation settles an episode; a transport completion
//!   arriving after the episode's own cancellation is recorded as a
//!   timeout failure, never as data
//! - The Settled → Idle re-arm runs synchronously inside the settle
//!   handler; no observer task watches for it
//! - Failures keep the previous data; successes clear the previous error

use std::sync::{Arc, Mutex, MutexGuard};

use serde::de::DeserializeOwned;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::config::{resolve, AmbientScope, EffectiveRequest, RequestConfig};
use crate::error::FetchError;
use crate::lifecycle::hooks::{identity_error, json_response, ErrorHook, ResponseHook};
use crate::lifecycle::state::{LifecycleState, Loading};
use crate::transport::{Transport, TransportError};

/// Mutable lifecycle fields, guarded by one lock.
struct Inner<T, E> {
    state: LifecycleState<T, E>,
    /// Token owned by the next (or current) episode. Tokens are single-use
    /// and rotated on settle; a stale token can never cancel the current
    /// episode.
    token: CancellationToken,
}

/// Single-flight request lifecycle manager.
///
/// Cloning yields another handle to the same lifecycle; all handles share
/// one state machine. `send` must be called from within a Tokio runtime.
pub struct RequestLifecycle<T, E = FetchError> {
    transport: Arc<dyn Transport>,
    scope: AmbientScope,
    config: Arc<RequestConfig>,
    on_response: ResponseHook<T>,
    on_error: ErrorHook<E>,
    inner: Arc<Mutex<Inner<T, E>>>,
    updates: Arc<watch::Sender<LifecycleState<T, E>>>,
}

impl<T, E> Clone for RequestLifecycle<T, E> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            scope: self.scope.clone(),
            config: Arc::clone(&self.config),
            on_response: Arc::clone(&self.on_response),
            on_error: Arc::clone(&self.on_error),
            inner: Arc::clone(&self.inner),
            updates: Arc::clone(&self.updates),
        }
    }
}

impl<T> RequestLifecycle<T, FetchError>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    /// Lifecycle with the default hooks: JSON-decode responses, pass
    /// failures through unchanged.
    pub fn json(transport: Arc<dyn Transport>, scope: AmbientScope, config: RequestConfig) -> Self {
        Self::with_hooks(transport, scope, config, json_response::<T>(), identity_error())
    }
}

impl<T, E> RequestLifecycle<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    /// Lifecycle with caller-supplied response and error hooks.
    pub fn with_hooks(
        transport: Arc<dyn Transport>,
        scope: AmbientScope,
        config: RequestConfig,
        on_response: ResponseHook<T>,
        on_error: ErrorHook<E>,
    ) -> Self {
        let initial = LifecycleState::initial();
        let (updates, _) = watch::channel(initial.clone());
        Self {
            transport,
            scope,
            config: Arc::new(config),
            on_response,
            on_error,
            inner: Arc::new(Mutex::new(Inner {
                state: initial,
                token: CancellationToken::new(),
            })),
            updates: Arc::new(updates),
        }
    }

    /// Dispatch a request if the machine is idle; otherwise do nothing.
    pub fn send(&self) {
        let episode = Uuid::new_v4();
        let token = {
            let mut inner = self.lock();
            if inner.state.loading != Loading::Idle {
                tracing::debug!(
                    loading = ?inner.state.loading,
                    "send ignored; lifecycle busy"
                );
                return;
            }
            inner.state.loading = Loading::InFlight;
            self.updates.send_replace(inner.state.clone());
            inner.token.clone()
        };

        // Resolution repeats on every dispatch; the ambient scope may have
        // changed since the last episode.
        let ambient = self.scope.current();
        match resolve(&ambient, &self.config) {
            Ok(request) => {
                tracing::debug!(
                    episode = %episode,
                    method = %request.method,
                    url = %request.url,
                    timeout_ms = request.timeout.as_millis() as u64,
                    "dispatching request"
                );
                let lifecycle = self.clone();
                tokio::spawn(async move {
                    let outcome = lifecycle.run_episode(request, token, episode).await;
                    lifecycle.settle(outcome, episode);
                });
            }
            Err(e) => {
                tracing::warn!(episode = %episode, error = %e, "request configuration rejected");
                self.settle(Err(FetchError::Config(e)), episode);
            }
        }
    }

    /// Snapshot of the observable fields.
    pub fn state(&self) -> LifecycleState<T, E> {
        self.lock().state.clone()
    }

    /// Payload of the most recent successful episode.
    pub fn data(&self) -> Option<T> {
        self.lock().state.data.clone()
    }

    /// Error of the most recent failed episode.
    pub fn error(&self) -> Option<E> {
        self.lock().state.error.clone()
    }

    /// Current machine phase.
    pub fn loading(&self) -> Loading {
        self.lock().state.loading
    }

    /// Subscribe to state-change notifications.
    ///
    /// The receiver observes the `InFlight` entry and every settle; the
    /// transient `Settled` phase may be coalesced into the following
    /// `Idle` value.
    pub fn subscribe(&self) -> watch::Receiver<LifecycleState<T, E>> {
        self.updates.subscribe()
    }

    /// Race one transport call against the episode's timeout alarm.
    async fn run_episode(
        &self,
        request: EffectiveRequest,
        token: CancellationToken,
        episode: Uuid,
    ) -> Result<T, FetchError> {
        let call = self.transport.perform(&request, token.clone());
        tokio::pin!(call);

        let alarm = tokio::time::sleep(request.timeout);
        tokio::pin!(alarm);

        let mut timed_out = false;
        let result = loop {
            tokio::select! {
                result = &mut call => break result,
                _ = &mut alarm, if !timed_out => {
                    // The alarm only requests cancellation; the transport
                    // surfaces the failure on its own schedule.
                    timed_out = true;
                    tracing::debug!(
                        episode = %episode,
                        timeout_ms = request.timeout.as_millis() as u64,
                        "timeout alarm fired; cancelling transport call"
                    );
                    token.cancel();
                }
            }
        };

        if timed_out {
            // Cancellation is authoritative: a response that slips in after
            // the alarm fired is still a failure.
            return Err(FetchError::TimedOut {
                after: request.timeout,
            });
        }

        match result {
            Ok(response) => {
                tracing::debug!(
                    episode = %episode,
                    status = response.status(),
                    "transport call completed"
                );
                (self.on_response)(response).await
            }
            Err(TransportError::Cancelled) => Err(FetchError::Cancelled),
            Err(e) => Err(FetchError::Transport(e)),
        }
    }

    /// Record the outcome, rotate the token, and re-arm the machine.
    fn settle(&self, outcome: Result<T, FetchError>, episode: Uuid) {
        let outcome = outcome.map_err(|e| {
            tracing::debug!(episode = %episode, error = %e, "request settled with error");
            (self.on_error)(e)
        });
        if outcome.is_ok() {
            tracing::debug!(episode = %episode, "request settled with data");
        }

        let mut inner = self.lock();
        match outcome {
            Ok(data) => {
                inner.state.data = Some(data);
                // A fresh success supersedes whatever error an earlier
                // episode left behind.
                inner.state.error = None;
            }
            Err(error) => {
                // Previous data stays put; callers treat it as stale once
                // error is set.
                inner.state.error = Some(error);
            }
        }
        inner.state.loading = Loading::Settled;
        self.updates.send_replace(inner.state.clone());

        // Settled re-arms immediately: the spent token is replaced and the
        // machine returns to Idle, ready for the next send.
        inner.token = CancellationToken::new();
        inner.state.loading = Loading::Idle;
        self.updates.send_replace(inner.state.clone());
    }

    fn lock(&self) -> MutexGuard<'_, Inner<T, E>> {
        self.inner.lock().expect("lifecycle state lock poisoned")
    }
}
