use std::pin::pin;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::Notify;
use tokio::time::timeout;

use crate::phase::Phase;

/// Shared source of truth for the current phase.
///
/// Writers go through [`SignalState::set_phase`], which commits the phase under
/// the lock and then raises the change event. Observers park in
/// [`SignalState::wait_for_change`] and must re-read the phase afterwards: the
/// event is level-style and may coalesce several transitions into one wake-up,
/// or fire without any transition at all (see [`SignalState::notify`]).
#[derive(Debug)]
pub struct SignalState {
    phase: Mutex<Phase>,
    changed: AtomicBool,
    waiters: Notify,
    transitions: AtomicU64,
}

impl SignalState {
    pub fn new(initial: Phase) -> Self {
        Self {
            phase: Mutex::new(initial),
            changed: AtomicBool::new(false),
            waiters: Notify::new(),
            transitions: AtomicU64::new(0),
        }
    }

    /// Commit `phase` and wake every observer parked on the change event.
    pub fn set_phase(&self, phase: Phase) {
        {
            let mut current = self.lock();
            *current = phase;
            self.transitions.fetch_add(1, Ordering::Relaxed);
        }
        self.notify();
    }

    pub fn phase(&self) -> Phase {
        *self.lock()
    }

    /// Number of `set_phase` calls committed so far.
    pub fn transitions(&self) -> u64 {
        self.transitions.load(Ordering::Relaxed)
    }

    /// Raise the change event without touching the phase.
    pub fn notify(&self) {
        self.changed.store(true, Ordering::Release);
        self.waiters.notify_waiters();
    }

    /// Park until the change event is raised or `wait` elapses, then clear it.
    ///
    /// Does not report which of the two happened.
    pub async fn wait_for_change(&self, wait: Duration) {
        let mut notified = pin!(self.waiters.notified());
        // Register before inspecting the flag so a concurrent notify cannot
        // slip between the check and the await.
        notified.as_mut().enable();
        if !self.changed.load(Ordering::Acquire) {
            let _ = timeout(wait, notified).await;
        }
        self.changed.store(false, Ordering::Release);
    }

    // A panicking holder cannot leave a half-written `Phase` behind, so a
    // poisoned lock is still safe to read and write.
    fn lock(&self) -> MutexGuard<'_, Phase> {
        self.phase.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SignalState {
    fn default() -> Self {
        Self::new(Phase::INITIAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn set_phase_is_visible_and_counted() {
        let signal = SignalState::default();
        assert_eq!(signal.phase(), Phase::Red);
        assert_eq!(signal.transitions(), 0);

        signal.set_phase(Phase::Yellow);
        signal.set_phase(Phase::Green);
        assert_eq!(signal.phase(), Phase::Green);
        assert_eq!(signal.transitions(), 2);
    }

    #[test]
    fn poisoned_lock_does_not_wedge_readers() {
        let signal = Arc::new(SignalState::new(Phase::Green));
        let poisoner = Arc::clone(&signal);
        let result: std::thread::Result<()> = std::thread::spawn(move || {
            let _guard = poisoner.phase.lock().unwrap();
            panic!("fault while holding the phase lock");
        })
        .join();
        assert!(result.is_err());
        assert!(signal.phase.is_poisoned());

        assert_eq!(signal.phase(), Phase::Green);
        signal.set_phase(Phase::Red);
        assert_eq!(signal.phase(), Phase::Red);
    }
}
