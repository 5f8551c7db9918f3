//! Debounce: collapse a burst of calls into one invocation
//!
//! Every call restarts a single delay timer; only one timer is ever pending
//! per wrapper. In trailing mode (the default) the action fires once, `delay`
//! after the last call of a burst, with that call's arguments; earlier calls
//! in the burst are discarded, not queued. In immediate mode the first call
//! of a quiet period fires synchronously and returns the action's result;
//! calls arriving before the timer elapses are swallowed entirely and only
//! push the quiet-period deadline forward.
//!
//! Timers run as tasks on the ambient Tokio runtime, so `call` must happen
//! inside one. A pending timer is cancelled deterministically by [`cancel`]
//! or by dropping the wrapper — abandoning it never leaves an orphaned
//! invocation behind.
//!
//! [`cancel`]: Debouncer::cancel

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::trace;

use crate::lock;

/// Delay applied when callers have no opinion, matching the classic 300ms
/// input-event window.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(300);

/// State for the single pending invocation. The generation counter fences the
/// timer task: a call that restarts the timer bumps it, so a stale task that
/// already passed its sleep finds the mismatch and backs off.
struct Pending<T> {
    last_args: Option<T>,
    timer: Option<JoinHandle<()>>,
    generation: u64,
}

/// A debounced wrapper around an action.
pub struct Debouncer<T, R> {
    action: Arc<dyn Fn(T) -> R + Send + Sync>,
    delay: Duration,
    immediate: bool,
    state: Arc<Mutex<Pending<T>>>,
}

impl<T, R> Debouncer<T, R>
where
    T: Send + 'static,
    R: Send + 'static,
{
    /// Trailing-mode debouncer: the action fires `delay` after the last call
    /// in a burst, with that call's arguments.
    pub fn new(action: impl Fn(T) -> R + Send + Sync + 'static, delay: Duration) -> Self {
        Self::build(action, delay, false)
    }

    /// Immediate-mode debouncer: the first call in a quiet period fires
    /// synchronously; the rest of the burst is swallowed.
    pub fn immediate(action: impl Fn(T) -> R + Send + Sync + 'static, delay: Duration) -> Self {
        Self::build(action, delay, true)
    }

    fn build(action: impl Fn(T) -> R + Send + Sync + 'static, delay: Duration, immediate: bool) -> Self {
        Self {
            action: Arc::new(action),
            delay,
            immediate,
            state: Arc::new(Mutex::new(Pending {
                last_args: None,
                timer: None,
                generation: 0,
            })),
        }
    }

    /// Invoke the wrapper. Returns `Some` with the action's result only on
    /// the synchronous immediate-mode branch; the deferred branch is
    /// fire-and-forget and returns `None`.
    pub fn call(&self, args: T) -> Option<R> {
        let mut pending = lock(&self.state);
        let fire_now = self.immediate && pending.timer.is_none();

        // Last call wins: replace any pending timer with a fresh one.
        pending.generation = pending.generation.wrapping_add(1);
        let generation = pending.generation;
        if let Some(timer) = pending.timer.take() {
            timer.abort();
        }

        if self.immediate {
            pending.timer = Some(self.spawn_reset(generation));
            drop(pending);
            if fire_now {
                return Some((self.action)(args));
            }
            trace!("debounce swallowed call inside immediate window");
            None
        } else {
            pending.last_args = Some(args);
            pending.timer = Some(self.spawn_fire(generation));
            None
        }
    }

    /// Whether a timer is currently pending.
    pub fn is_pending(&self) -> bool {
        lock(&self.state).timer.is_some()
    }

    /// Drop the pending invocation, if any: the timer is aborted and the
    /// recorded arguments are discarded.
    pub fn cancel(&self) {
        let mut pending = lock(&self.state);
        pending.generation = pending.generation.wrapping_add(1);
        pending.last_args = None;
        if let Some(timer) = pending.timer.take() {
            timer.abort();
            trace!("debounce cancelled pending timer");
        }
    }

    /// Trailing timer: after the delay, fire with the last recorded
    /// arguments unless a newer call replaced this timer.
    fn spawn_fire(&self, generation: u64) -> JoinHandle<()> {
        let state = Arc::clone(&self.state);
        let action = Arc::clone(&self.action);
        let delay = self.delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let args = {
                let mut pending = lock(&state);
                if pending.generation != generation {
                    return;
                }
                pending.timer = None;
                pending.last_args.take()
            };
            // Invoked outside the lock so the action may call back in.
            if let Some(args) = args {
                action(args);
            }
        })
    }

    /// Immediate-mode timer: only re-arms the "can fire synchronously" state.
    fn spawn_reset(&self, generation: u64) -> JoinHandle<()> {
        let state = Arc::clone(&self.state);
        let delay = self.delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut pending = lock(&state);
            if pending.generation == generation {
                pending.timer = None;
            }
        })
    }
}

impl<T, R> Drop for Debouncer<T, R> {
    fn drop(&mut self) {
        let mut pending = lock(&self.state);
        pending.last_args = None;
        if let Some(timer) = pending.timer.take() {
            timer.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_debouncer(
        delay: Duration,
    ) -> (Debouncer<(i32, i32), ()>, Arc<AtomicUsize>, Arc<Mutex<Option<(i32, i32)>>>) {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::new(Mutex::new(None));
        let debouncer = Debouncer::new(
            {
                let count = Arc::clone(&count);
                let seen = Arc::clone(&seen);
                move |args: (i32, i32)| {
                    count.fetch_add(1, Ordering::SeqCst);
                    *seen.lock().unwrap() = Some(args);
                }
            },
            delay,
        );
        (debouncer, count, seen)
    }

    #[tokio::test(start_paused = true)]
    async fn burst_collapses_to_one_trailing_invocation_with_last_args() {
        let (debouncer, count, seen) = counting_debouncer(Duration::from_millis(100));

        for _ in 0..10_000 {
            assert!(debouncer.call((2, 2)).is_none(), "deferred branch has no result");
        }
        debouncer.call((3, 4));
        assert_eq!(count.load(Ordering::SeqCst), 0, "nothing fires inside the window");

        tokio::time::sleep(Duration::from_millis(150)).await;

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(*seen.lock().unwrap(), Some((3, 4)), "last call wins");
    }

    #[tokio::test(start_paused = true)]
    async fn fires_again_after_a_quiet_period() {
        let (debouncer, count, _) = counting_debouncer(Duration::from_millis(100));

        debouncer.call((1, 1));
        tokio::time::sleep(Duration::from_millis(150)).await;
        debouncer.call((2, 2));
        tokio::time::sleep(Duration::from_millis(150)).await;

        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn calls_inside_window_keep_pushing_the_timer() {
        let (debouncer, count, seen) = counting_debouncer(Duration::from_millis(100));

        debouncer.call((1, 1));
        tokio::time::sleep(Duration::from_millis(60)).await;
        debouncer.call((2, 2));
        tokio::time::sleep(Duration::from_millis(60)).await;
        // 120ms since the first call but only 60ms since the second.
        assert_eq!(count.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(*seen.lock().unwrap(), Some((2, 2)));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_discards_the_pending_invocation() {
        let (debouncer, count, _) = counting_debouncer(Duration::from_millis(100));

        debouncer.call((1, 1));
        assert!(debouncer.is_pending());
        debouncer.cancel();
        assert!(!debouncer.is_pending());

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn drop_aborts_the_pending_timer() {
        let count = Arc::new(AtomicUsize::new(0));
        {
            let count = Arc::clone(&count);
            let debouncer = Debouncer::new(
                move |_: ()| {
                    count.fetch_add(1, Ordering::SeqCst);
                },
                Duration::from_millis(100),
            );
            debouncer.call(());
        }

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0, "dropped wrapper must not fire");
    }

    #[tokio::test(start_paused = true)]
    async fn immediate_fires_first_call_synchronously_and_returns_result() {
        let count = Arc::new(AtomicUsize::new(0));
        let debouncer = Debouncer::immediate(
            {
                let count = Arc::clone(&count);
                move |x: i32| {
                    count.fetch_add(1, Ordering::SeqCst);
                    x * 2
                }
            },
            Duration::from_millis(100),
        );

        assert_eq!(debouncer.call(2), Some(4));
        assert_eq!(count.load(Ordering::SeqCst), 1);

        // Swallowed: inside the window, neither immediate nor deferred.
        assert_eq!(debouncer.call(3), None);
        assert_eq!(debouncer.call(4), None);
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);

        // Quiet period elapsed: fires again. Two invocations total.
        assert_eq!(debouncer.call(5), Some(10));
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn immediate_swallowed_calls_push_the_window_forward() {
        let count = Arc::new(AtomicUsize::new(0));
        let debouncer = Debouncer::immediate(
            {
                let count = Arc::clone(&count);
                move |_: ()| {
                    count.fetch_add(1, Ordering::SeqCst);
                }
            },
            Duration::from_millis(100),
        );

        debouncer.call(());
        tokio::time::sleep(Duration::from_millis(60)).await;
        // Swallowed, but restarts the 100ms window.
        assert_eq!(debouncer.call(()), None);
        tokio::time::sleep(Duration::from_millis(60)).await;
        // 120ms after the first call, 60ms after the swallowed one: still blocked.
        assert_eq!(debouncer.call(()), None);
        assert_eq!(count.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(debouncer.call(()).is_some());
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }
}
