//! One-shot initialization gate: reads queue until the first load completes.

use crate::error::{ThemeError, ThemeResult};
use crate::model::InitPhase;
use std::sync::{Mutex, MutexGuard};
use tokio::sync::oneshot;

#[derive(Default)]
struct GateState {
    phase: InitPhase,
    waiters: Vec<oneshot::Sender<()>>,
}

/// Single-shot barrier between loading persisted theme state and reading it.
///
/// Waiters arriving before [`open`](Self::open) are queued, not rejected, and
/// all of them are released in the same transition to [`InitPhase::Ready`].
/// After that, [`wait`](Self::wait) returns immediately.
#[derive(Default)]
pub struct InitGate {
    state: Mutex<GateState>,
}

impl InitGate {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, GateState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn phase(&self) -> InitPhase {
        self.lock().phase
    }

    /// `Uninitialized -> Initializing`.
    pub fn begin(&self) -> ThemeResult<()> {
        let mut state = self.lock();
        match state.phase {
            InitPhase::Uninitialized => {
                state.phase = InitPhase::Initializing;
                Ok(())
            }
            InitPhase::Initializing | InitPhase::Ready => Err(ThemeError::AlreadyInitialized),
        }
    }

    /// `Initializing -> Uninitialized` after a failed load. Queued waiters stay
    /// queued for the next attempt.
    pub fn abort(&self) {
        let mut state = self.lock();
        if state.phase == InitPhase::Initializing {
            state.phase = InitPhase::Uninitialized;
        }
    }

    /// Transition to `Ready` and release every queued waiter.
    pub fn open(&self) {
        let waiters = {
            let mut state = self.lock();
            state.phase = InitPhase::Ready;
            std::mem::take(&mut state.waiters)
        };

        log::debug!("Init gate open, releasing {} waiters", waiters.len());
        for waiter in waiters {
            // A waiter that gave up has dropped its receiver.
            let _ = waiter.send(());
        }
    }

    /// Suspend until the gate is `Ready`.
    pub async fn wait(&self) {
        let receiver = {
            let mut state = self.lock();
            if state.phase == InitPhase::Ready {
                return;
            }
            let (sender, receiver) = oneshot::channel();
            state.waiters.push(sender);
            receiver
        };

        let _ = receiver.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::*;
    use futures::FutureExt;
    use std::sync::Arc;

    #[test]
    fn test_phase_transitions() {
        let gate = InitGate::new();
        assert_eq!(gate.phase(), InitPhase::Uninitialized);

        assert_ok!(gate.begin());
        assert_eq!(gate.phase(), InitPhase::Initializing);
        assert_matches!(gate.begin(), Err(ThemeError::AlreadyInitialized));

        gate.abort();
        assert_eq!(gate.phase(), InitPhase::Uninitialized);

        assert_ok!(gate.begin());
        gate.open();
        assert_eq!(gate.phase(), InitPhase::Ready);
        assert_matches!(gate.begin(), Err(ThemeError::AlreadyInitialized));

        gate.abort();
        assert_eq!(gate.phase(), InitPhase::Ready);
    }

    #[test]
    fn test_wait_returns_immediately_when_ready() {
        let gate = InitGate::new();
        gate.open();
        assert_some!(gate.wait().now_or_never());
    }

    #[tokio::test]
    async fn test_queued_waiters_released_together() {
        let gate = Arc::new(InitGate::new());
        gate.begin().unwrap();

        let waiters: Vec<_> = (0..3)
            .map(|_| {
                let gate = Arc::clone(&gate);
                tokio::spawn(async move { gate.wait().await })
            })
            .collect();

        tokio::task::yield_now().await;
        assert!(waiters.iter().all(|w| !w.is_finished()));

        // Queued waiters survive a failed attempt.
        gate.abort();
        gate.begin().unwrap();
        gate.open();

        for waiter in waiters {
            assert_ok!(waiter.await);
        }
    }
}
