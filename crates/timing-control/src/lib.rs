//! Time-based control-flow combinators
//!
//! Wrappers that change *when* and *whether* an action runs, without changing
//! what it does:
//!
//! - [`Debouncer`]: collapse a burst of calls into one invocation, either
//!   trailing (last call wins after a quiet period) or immediate (first call
//!   wins, the rest of the burst is swallowed).
//! - [`Throttler`]: at most one invocation per time window; calls while
//!   blocked are dropped, not queued.
//! - [`Memo`]: cache results by argument identity (plus an optional
//!   dependency snapshot) so repeated calls skip recomputation.
//!
//! The debouncer schedules its timer on the ambient Tokio runtime; the
//! throttler and memo are runtime-free. All wrappers own their captured state
//! at construction time; there is no ambient calling context to rebind.

pub mod debounce;
pub mod error;
pub mod memo;
pub mod throttle;

pub use debounce::Debouncer;
pub use error::{Error, Result};
pub use memo::Memo;
pub use throttle::Throttler;

use std::sync::{Mutex, MutexGuard};

/// Lock a mutex, recovering the guard if a panicking holder poisoned it.
/// The wrapped state stays coherent under poisoning: every critical section
/// leaves it in a valid (if conservative) configuration.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}
