use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::phase::Phase;
use crate::presenter::Presenter;
use crate::signal::SignalState;
use crate::tasks;

/// Owns the shared signal state and the running flag.
///
/// Cheap to clone; every clone controls the same set of loops, so a clone can
/// be handed to a Ctrl-C watcher or any other thread that needs to stop them.
#[derive(Debug, Clone)]
pub struct Lifecycle {
    signal: Arc<SignalState>,
    cancel: CancellationToken,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::with_signal(Arc::new(SignalState::new(Phase::INITIAL)))
    }

    pub fn with_signal(signal: Arc<SignalState>) -> Self {
        Self {
            signal,
            cancel: CancellationToken::new(),
        }
    }

    pub fn signal(&self) -> &Arc<SignalState> {
        &self.signal
    }

    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn is_running(&self) -> bool {
        !self.cancel.is_cancelled()
    }

    /// Clear the running flag and wake every observer parked on the change
    /// event. Safe to call repeatedly and from any thread.
    pub fn stop(&self) {
        let first = self.is_running();
        self.cancel.cancel();
        self.signal.notify();
        if first {
            info!(phase = %self.signal.phase(), "stop requested");
        }
    }

    /// Start the controller, countdown and presenter loops.
    ///
    /// The countdown reporter gets a clone of `presenter`; `presenter_poll`
    /// is the presenter's wait between re-reads.
    pub fn spawn<P>(&self, presenter: P, presenter_poll: Duration) -> RunningSignal
    where
        P: Presenter + Clone + 'static,
    {
        let mut tasks = JoinSet::new();

        // Cycle controller
        tasks.spawn({
            let signal = Arc::clone(&self.signal);
            let cancel = self.cancel.clone();
            async move {
                tasks::controller::run(signal, cancel)
                    .await
                    .context("cycle controller failed")
            }
        });

        // Countdown reporter
        tasks.spawn({
            let signal = Arc::clone(&self.signal);
            let presenter = presenter.clone();
            let cancel = self.cancel.clone();
            async move {
                tasks::countdown::run(signal, presenter, cancel)
                    .await
                    .context("countdown reporter failed")
            }
        });

        // Presenter
        tasks.spawn({
            let signal = Arc::clone(&self.signal);
            let cancel = self.cancel.clone();
            async move {
                tasks::presenter::run(signal, presenter, cancel, presenter_poll)
                    .await
                    .context("presenter failed")
            }
        });

        info!(phase = %self.signal.phase(), "signal loops started");
        RunningSignal {
            lifecycle: self.clone(),
            tasks,
        }
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to the loops started by [`Lifecycle::spawn`].
pub struct RunningSignal {
    lifecycle: Lifecycle,
    tasks: JoinSet<Result<()>>,
}

impl RunningSignal {
    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    /// Wait for every loop to exit.
    ///
    /// A loop that fails or panics stops the others, so one fault never
    /// leaves the rest running; the fault is reported as an error once all
    /// loops are down.
    pub async fn join(mut self) -> Result<()> {
        let mut failures = 0usize;
        while let Some(res) = self.tasks.join_next().await {
            match res {
                Ok(Ok(())) => continue,
                Ok(Err(e)) => error!("task error: {e:?}"),
                Err(e) => error!("join error: {e}"),
            }
            failures += 1;
            self.lifecycle.stop();
        }

        info!(
            transitions = self.lifecycle.signal.transitions(),
            phase = %self.lifecycle.signal.phase(),
            "signal loops stopped"
        );
        if failures > 0 {
            bail!("{failures} signal loop(s) terminated abnormally");
        }
        Ok(())
    }
}
