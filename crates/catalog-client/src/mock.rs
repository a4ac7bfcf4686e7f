//! In-memory scripted transport.
//!
//! [`MockTransport`] answers requests from a FIFO of canned replies and
//! records every request it sees. A reply can be held back behind a
//! [`MockGate`] so callers can observe state while a request is in flight.
//! Clones share the same script and request log.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::oneshot;

use crate::error::ClientError;
use crate::transport::{ApiRequest, Transport};

type Reply = Result<serde_json::Value, ClientError>;

enum Scripted {
    Ready(Reply),
    Gated(oneshot::Receiver<Reply>),
}

#[derive(Default)]
struct Script {
    replies: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<ApiRequest>>,
}

/// Scripted [`Transport`] for tests and offline runs.
#[derive(Clone, Default)]
pub struct MockTransport {
    script: Arc<Script>,
}

/// Handle that releases a gated reply.
#[derive(Debug)]
pub struct MockGate {
    tx: oneshot::Sender<Reply>,
}

impl MockGate {
    /// Deliver `reply` to the waiting request.
    ///
    /// Returns `false` if the request was already abandoned.
    pub fn release(self, reply: Reply) -> bool {
        self.tx.send(reply).is_ok()
    }
}

impl MockTransport {
    /// An empty script. Requests fail until replies are pushed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful reply.
    pub fn push_ok(&self, body: serde_json::Value) {
        lock(&self.script.replies).push_back(Scripted::Ready(Ok(body)));
    }

    /// Queue a failure.
    pub fn push_err(&self, err: ClientError) {
        lock(&self.script.replies).push_back(Scripted::Ready(Err(err)));
    }

    /// Queue a reply that is held until the returned gate is released.
    pub fn push_gated(&self) -> MockGate {
        let (tx, rx) = oneshot::channel();
        lock(&self.script.replies).push_back(Scripted::Gated(rx));
        MockGate { tx }
    }

    /// Every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<ApiRequest> {
        lock(&self.script.requests).clone()
    }

    /// Number of replies not yet consumed.
    pub fn pending_replies(&self) -> usize {
        lock(&self.script.replies).len()
    }
}

impl core::fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MockTransport")
            .field("pending_replies", &self.pending_replies())
            .field("requests", &lock(&self.script.requests).len())
            .finish()
    }
}

impl Transport for MockTransport {
    async fn get(&self, request: ApiRequest) -> Result<serde_json::Value, ClientError> {
        let path = request.path();
        lock(&self.script.requests).push(request);

        let next = lock(&self.script.replies).pop_front();
        match next {
            Some(Scripted::Ready(reply)) => reply,
            Some(Scripted::Gated(rx)) => rx
                .await
                .unwrap_or_else(|e| Err(ClientError::Transport(format!("gate dropped: {e}")))),
            None => Err(ClientError::Transport(format!(
                "no scripted reply for GET {path}"
            ))),
        }
    }
}

/// Lock a mutex, recovering the data if a panicking test poisoned it.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
