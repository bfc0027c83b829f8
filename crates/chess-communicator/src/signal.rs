//! A one-slot value guarded by a mutex and a condition variable.
//!
//! The producer [`set`](Signal::set)s a value, a consumer blocks in
//! [`wait`](Signal::wait) until one is present and takes it. The predicate
//! is checked under the same lock the producer takes, so a value set before
//! the consumer starts waiting is never lost. [`close`](Signal::close)
//! wakes every waiter for good.

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Outcome of a bounded wait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitOutcome<T> {
    Ready(T),
    TimedOut,
    Closed,
}

#[derive(Debug)]
struct Slot<T> {
    value: Option<T>,
    closed: bool,
}

#[derive(Debug)]
pub struct Signal<T> {
    slot: Mutex<Slot<T>>,
    cond: Condvar,
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Signal<T> {
    pub fn new() -> Self {
        Signal {
            slot: Mutex::new(Slot {
                value: None,
                closed: false,
            }),
            cond: Condvar::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Slot<T>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stores `value`, replacing any unconsumed one, and wakes waiters.
    /// Ignored once the signal is closed.
    pub fn set(&self, value: T) {
        let mut slot = self.lock();
        if slot.closed {
            return;
        }
        slot.value = Some(value);
        self.cond.notify_all();
    }

    /// Drops an unconsumed value.
    pub fn reset(&self) {
        self.lock().value = None;
    }

    /// Marks the signal closed and wakes every waiter.
    pub fn close(&self) {
        self.lock().closed = true;
        self.cond.notify_all();
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    /// Blocks until a value is present and takes it. `None` once closed.
    ///
    /// A value set before closing is still delivered.
    pub fn wait(&self) -> Option<T> {
        let guard = self.lock();
        let mut slot = self
            .cond
            .wait_while(guard, |s| s.value.is_none() && !s.closed)
            .unwrap_or_else(PoisonError::into_inner);
        slot.value.take()
    }

    /// Like [`wait`](Self::wait) but gives up after `timeout`.
    pub fn wait_timeout(&self, timeout: Duration) -> WaitOutcome<T> {
        let guard = self.lock();
        let (mut slot, _) = self
            .cond
            .wait_timeout_while(guard, timeout, |s| s.value.is_none() && !s.closed)
            .unwrap_or_else(PoisonError::into_inner);
        match slot.value.take() {
            Some(value) => WaitOutcome::Ready(value),
            None if slot.closed => WaitOutcome::Closed,
            None => WaitOutcome::TimedOut,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Instant;

    #[test]
    fn value_set_before_wait_is_delivered() {
        let signal = Signal::new();
        signal.set(7);
        assert_eq!(signal.wait(), Some(7));
        assert_eq!(
            signal.wait_timeout(Duration::from_millis(10)),
            WaitOutcome::TimedOut
        );
    }

    #[test]
    fn reset_discards_stale_value() {
        let signal = Signal::new();
        signal.set("old");
        signal.reset();
        assert_eq!(
            signal.wait_timeout(Duration::from_millis(10)),
            WaitOutcome::TimedOut
        );
    }

    #[test]
    fn wakes_waiter_on_another_thread() {
        let signal = Arc::new(Signal::new());
        let producer = Arc::clone(&signal);
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            producer.set(String::from("e2e4"));
        });
        assert_eq!(signal.wait().as_deref(), Some("e2e4"));
        handle.join().unwrap();
    }

    #[test]
    fn timeout_is_bounded() {
        let signal: Signal<()> = Signal::new();
        let start = Instant::now();
        assert_eq!(
            signal.wait_timeout(Duration::from_millis(50)),
            WaitOutcome::TimedOut
        );
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(50));
        assert!(elapsed < Duration::from_secs(2));
    }

    #[test]
    fn close_releases_waiters() {
        let signal: Arc<Signal<u8>> = Arc::new(Signal::new());
        let waiters: Vec<_> = (0..3)
            .map(|_| {
                let s = Arc::clone(&signal);
                thread::spawn(move || s.wait())
            })
            .collect();
        thread::sleep(Duration::from_millis(20));
        signal.close();
        for w in waiters {
            assert_eq!(w.join().unwrap(), None);
        }
        signal.set(1);
        assert_eq!(
            signal.wait_timeout(Duration::from_secs(1)),
            WaitOutcome::Closed
        );
        assert!(signal.is_closed());
    }

    #[test]
    fn value_before_close_still_delivered() {
        let signal = Signal::new();
        signal.set(3);
        signal.close();
        assert_eq!(signal.wait(), Some(3));
        assert_eq!(signal.wait(), None);
    }
}
