use crate::presenter::Presenter;
use crate::signal::SignalState;
use anyhow::Result;
use std::sync::Arc;
use tokio::select;
use tokio::time::{Duration, sleep};
use tokio_util::sync::CancellationToken;
use tracing::debug;

const TICK: Duration = Duration::from_secs(1);

/// Reports the seconds left in the current phase, once per tick.
///
/// The countdown starts from the phase's dwell and is abandoned as soon as a
/// tick observes a different phase; the next countdown then starts at once at
/// the new phase's full dwell. Phases that come and go between two ticks are
/// never reported.
pub async fn run<P: Presenter>(
    signal: Arc<SignalState>,
    mut presenter: P,
    cancel: CancellationToken,
) -> Result<()> {
    'outer: while !cancel.is_cancelled() {
        let phase = signal.phase();

        for remaining in (1..=phase.dwell_secs()).rev() {
            let current = signal.phase();
            if current != phase {
                debug!(from = %phase, to = %current, remaining, "countdown restarted");
                continue 'outer;
            }

            debug!(phase = %phase, remaining, "countdown tick");
            presenter.show_remaining(phase, remaining);

            select! {
                biased;
                _ = cancel.cancelled() => break 'outer,
                _ = sleep(TICK) => {}
            }
        }
    }

    presenter.finish();
    debug!("countdown reporter stopped");
    Ok(())
}
