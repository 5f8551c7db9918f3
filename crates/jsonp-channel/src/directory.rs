//! Pending-callback directory
//!
//! The registry that stands in for the browser's global callback namespace.
//! Each in-flight request registers a one-shot sender under its generated
//! identifier; a delivery takes the sender *out* of the map under the lock,
//! so exactly-once completion is structural: the second party to reach a
//! terminal event finds the entry gone and backs off.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use serde_json::Value;
use tokio::sync::oneshot;
use tracing::{debug, warn};

/// What a transport delivers: the payload, or the reason it could not get one.
pub(crate) type Delivery = std::result::Result<Value, String>;

/// Directory of pending callbacks keyed by generated identifier.
#[derive(Debug, Default)]
pub struct CallbackDirectory {
    pending: Mutex<HashMap<String, oneshot::Sender<Delivery>>>,
}

impl CallbackDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback identifier and hand back the receiving side.
    /// Identifiers are generated to be unique; a collision would drop the
    /// previous in-flight entry and is loud about it.
    pub(crate) fn register(&self, callback: &str) -> oneshot::Receiver<Delivery> {
        let (sender, receiver) = oneshot::channel();
        if self.lock().insert(callback.to_string(), sender).is_some() {
            warn!(callback, "callback identifier collision, previous entry dropped");
        }
        receiver
    }

    /// Deliver a payload to a pending callback. Returns `false` when the
    /// identifier is unknown or already completed — a late response after a
    /// timeout lands here and is discarded.
    pub fn complete(&self, callback: &str, payload: Value) -> bool {
        match self.take(callback) {
            Some(sender) => {
                if sender.send(Ok(payload)).is_err() {
                    debug!(callback, "receiver dropped before delivery");
                }
                true
            }
            None => {
                debug!(callback, "late or unknown callback ignored");
                false
            }
        }
    }

    /// Deliver a transport failure to a pending callback. Same late/unknown
    /// discipline as [`complete`](Self::complete).
    pub fn fail(&self, callback: &str, reason: impl Into<String>) -> bool {
        match self.take(callback) {
            Some(sender) => {
                if sender.send(Err(reason.into())).is_err() {
                    debug!(callback, "receiver dropped before failure delivery");
                }
                true
            }
            None => {
                debug!(callback, "late or unknown callback failure ignored");
                false
            }
        }
    }

    /// Remove an entry without delivering anything (timeout / dispose path).
    pub(crate) fn release(&self, callback: &str) -> bool {
        self.take(callback).is_some()
    }

    /// Number of callbacks still awaiting a terminal event.
    pub fn pending_len(&self) -> usize {
        self.lock().len()
    }

    fn take(&self, callback: &str) -> Option<oneshot::Sender<Delivery>> {
        self.lock().remove(callback)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, oneshot::Sender<Delivery>>> {
        self.pending
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
