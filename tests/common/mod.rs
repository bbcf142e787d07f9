//! Shared utilities for lifecycle and transport integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use confetch::{
    EffectiveRequest, LifecycleState, Loading, RawResponse, Transport, TransportError,
};

type Script = dyn Fn(usize) -> (Duration, Result<RawResponse, TransportError>) + Send + Sync;

/// Scripted in-process transport: per call index, a delay and a canned
/// outcome. Records every invocation together with its token.
pub struct MockTransport {
    script: Box<Script>,
    honor_token: bool,
    calls: AtomicUsize,
    seen: Mutex<Vec<(EffectiveRequest, CancellationToken)>>,
}

impl MockTransport {
    /// Transport that answers every call with the same JSON body after
    /// `delay`.
    pub fn json(value: serde_json::Value, delay: Duration) -> Arc<Self> {
        let body = serde_json::to_vec(&value).unwrap();
        Self::scripted(move |_| (delay, Ok(json_response(body.clone()))))
    }

    /// Transport driven by an arbitrary per-call script.
    pub fn scripted<F>(script: F) -> Arc<Self>
    where
        F: Fn(usize) -> (Duration, Result<RawResponse, TransportError>) + Send + Sync + 'static,
    {
        Arc::new(Self {
            script: Box::new(script),
            honor_token: true,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        })
    }

    /// Like [`MockTransport::json`], but the transport sleeps through
    /// cancellation and still produces its response.
    pub fn ignoring_cancellation(value: serde_json::Value, delay: Duration) -> Arc<Self> {
        let body = serde_json::to_vec(&value).unwrap();
        Arc::new(Self {
            script: Box::new(move |_| (delay, Ok(json_response(body.clone())))),
            honor_token: false,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        })
    }

    /// Number of calls performed so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The request seen by the most recent call.
    pub fn last_request(&self) -> Option<EffectiveRequest> {
        self.seen.lock().unwrap().last().map(|(req, _)| req.clone())
    }

    /// The token handed to call `index`.
    pub fn token_for_call(&self, index: usize) -> Option<CancellationToken> {
        self.seen
            .lock()
            .unwrap()
            .get(index)
            .map(|(_, token)| token.clone())
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn perform(
        &self,
        request: &EffectiveRequest,
        token: CancellationToken,
    ) -> Result<RawResponse, TransportError> {
        let index = self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen
            .lock()
            .unwrap()
            .push((request.clone(), token.clone()));

        let (delay, outcome) = (self.script)(index);
        if self.honor_token {
            tokio::select! {
                _ = token.cancelled() => return Err(TransportError::Cancelled),
                _ = tokio::time::sleep(delay) => {}
            }
        } else {
            tokio::time::sleep(delay).await;
        }
        outcome
    }
}

fn json_response(body: Vec<u8>) -> RawResponse {
    let mut headers = HashMap::new();
    headers.insert("content-type".to_string(), "application/json".to_string());
    RawResponse::new(200, headers, body)
}

/// Drive a subscription until the lifecycle settles back to Idle, and
/// return that snapshot.
pub async fn settled_state<T, E>(
    rx: &mut watch::Receiver<LifecycleState<T, E>>,
) -> LifecycleState<T, E>
where
    T: Clone,
    E: Clone,
{
    loop {
        rx.changed().await.expect("lifecycle handle dropped");
        let state = rx.borrow().clone();
        if state.loading == Loading::Idle {
            return state;
        }
    }
}

/// Start a socket-level mock backend that answers every connection with a
/// fixed status and body after `delay`. Returns the bound address.
pub async fn start_mock_backend(status: u16, body: &'static str, delay: Duration) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        tokio::time::sleep(delay).await;
                        let status_text = match status {
                            200 => "200 OK",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };
                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}
