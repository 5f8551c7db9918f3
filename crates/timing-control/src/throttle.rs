//! Throttle: at most one invocation per time window
//!
//! The first call in a free period runs the action synchronously and returns
//! its result; every call during the following window is a no-op that drops
//! its arguments and returns nothing. The window is tracked as a
//! deadline against the Tokio clock and re-opens lazily on the next call, so
//! no timer task is ever spawned.

use std::sync::Mutex;
use std::time::Duration;

use tokio::time::Instant;
use tracing::trace;

use crate::lock;

/// Window applied when callers have no opinion, matching the classic 300ms
/// scroll/resize throttle.
pub const DEFAULT_LIMIT: Duration = Duration::from_millis(300);

/// A throttled wrapper around an action.
pub struct Throttler<T, R> {
    action: Box<dyn Fn(T) -> R + Send + Sync>,
    limit: Duration,
    blocked_until: Mutex<Option<Instant>>,
}

impl<T, R> Throttler<T, R> {
    pub fn new(action: impl Fn(T) -> R + Send + Sync + 'static, limit: Duration) -> Self {
        Self {
            action: Box::new(action),
            limit,
            blocked_until: Mutex::new(None),
        }
    }

    /// Invoke the wrapper. Returns `Some` with the action's result when the
    /// window is free, `None` while blocked — callers must not rely on a
    /// value during the blocked window.
    pub fn call(&self, args: T) -> Option<R> {
        let now = Instant::now();
        {
            let mut blocked = lock(&self.blocked_until);
            if let Some(until) = *blocked {
                if now < until {
                    trace!("throttle dropped call inside window");
                    return None;
                }
            }
            *blocked = Some(now + self.limit);
        }
        // Invoked outside the lock so the action may call back in.
        Some((self.action)(args))
    }

    /// Whether a call right now would be dropped.
    pub fn is_blocked(&self) -> bool {
        match *lock(&self.blocked_until) {
            Some(until) => Instant::now() < until,
            None => false,
        }
    }

    /// Re-open the window immediately.
    pub fn reset(&self) {
        *lock(&self.blocked_until) = None;
    }
}
