use crate::phase::Phase;
use crate::signal::SignalState;
use anyhow::Result;
use humantime::format_duration;
use std::sync::Arc;
use tokio::select;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Drives the signal through `Phase::CYCLE`, holding each phase for its dwell.
///
/// Rules:
/// - Commit the phase first, then dwell; the dwell never depends on state.
/// - Cancellation is checked before every phase, so a stop during a dwell
///   never lights another lamp.
/// - The dwell races the cancellation token so shutdown does not wait out a
///   full red or green phase.
pub async fn run(signal: Arc<SignalState>, cancel: CancellationToken) -> Result<()> {
    'cycle: while !cancel.is_cancelled() {
        for phase in Phase::CYCLE {
            signal.set_phase(phase);
            info!(
                phase = %phase,
                dwell = %format_duration(phase.dwell()),
                "signal phase changed"
            );

            select! {
                biased;
                _ = cancel.cancelled() => break 'cycle,
                _ = sleep(phase.dwell()) => {}
            }

            if cancel.is_cancelled() {
                break 'cycle;
            }
        }
    }

    debug!(transitions = signal.transitions(), "cycle controller stopped");
    Ok(())
}
