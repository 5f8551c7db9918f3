//! The one-shot request handle
//!
//! Construction is firing: `open` registers a fresh callback identifier,
//! appends it to the URL as the `callback` query parameter, and hands the
//! composed URL to the transport before returning. The handle then exposes a
//! single consuming accessor, [`JsonpRequest::result`], racing the delivery
//! against the timeout.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{Map, Value};
use tokio::sync::oneshot;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::directory::{CallbackDirectory, Delivery};
use crate::error::{Error, Result};
use crate::transport::Transport;

/// Timeout applied when callers have no opinion.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(3000);

/// A single in-flight JSONP request. Dropping the handle before awaiting
/// [`result`](Self::result) releases its directory entry deterministically.
#[derive(Debug)]
pub struct JsonpRequest {
    callback: String,
    url: String,
    timeout: Duration,
    directory: Arc<CallbackDirectory>,
    receiver: Option<oneshot::Receiver<Delivery>>,
}

impl JsonpRequest {
    /// Open a request: register a unique callback, compose the final URL and
    /// start the transport. Fails synchronously on an empty URL.
    pub fn open(
        directory: Arc<CallbackDirectory>,
        transport: &dyn Transport,
        url: &str,
        timeout: Duration,
    ) -> Result<Self> {
        if url.trim().is_empty() {
            return Err(Error::EmptyUrl);
        }

        let callback = format!("jsonp_cb_{}", Uuid::new_v4().simple());
        let receiver = directory.register(&callback);

        let mut params = Map::new();
        params.insert("callback".to_string(), Value::String(callback.clone()));
        let url = querykit::queryfy(url, &params);

        debug!(callback = %callback, url = %url, "jsonp request opened");
        transport.inject(&url, &callback, Arc::clone(&directory));

        Ok(Self {
            callback,
            url,
            timeout,
            directory,
            receiver: Some(receiver),
        })
    }

    /// The generated callback identifier.
    pub fn callback(&self) -> &str {
        &self.callback
    }

    /// The composed URL the transport was fired with.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Await the single terminal event: the payload, a transport failure, or
    /// a timeout. Whichever way it ends, the directory entry is gone when
    /// this returns.
    pub async fn result(mut self) -> Result<Value> {
        let Some(receiver) = self.receiver.take() else {
            return Err(Error::Closed(self.callback.clone()));
        };

        match tokio::time::timeout(self.timeout, receiver).await {
            Ok(Ok(Ok(payload))) => {
                debug!(callback = %self.callback, "jsonp request resolved");
                Ok(payload)
            }
            Ok(Ok(Err(reason))) => Err(Error::Transport {
                callback: self.callback.clone(),
                reason,
            }),
            Ok(Err(_)) => Err(Error::Closed(self.callback.clone())),
            Err(_) => {
                // Entry still registered: take it out so a very late response
                // finds nothing to resolve.
                self.directory.release(&self.callback);
                warn!(callback = %self.callback, url = %self.url, "jsonp request timed out");
                Err(Error::Timeout {
                    callback: self.callback.clone(),
                    url: self.url.clone(),
                    timeout_ms: self.timeout.as_millis() as u64,
                })
            }
        }
    }

    /// Dispose of the request without awaiting it. Idempotent; also runs on
    /// drop.
    pub fn close(&mut self) {
        if self.receiver.take().is_some() {
            self.directory.release(&self.callback);
            debug!(callback = %self.callback, "jsonp request closed");
        }
    }
}

impl Drop for JsonpRequest {
    fn drop(&mut self) {
        self.close();
    }
}
