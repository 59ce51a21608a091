use crate::phase::Phase;
use crate::presenter::Presenter;
use crate::signal::SignalState;
use anyhow::Result;
use std::sync::Arc;
use tokio::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

/// Default wait between re-reads when no change event arrives.
pub const DEFAULT_POLL: Duration = Duration::from_millis(500);

/// Renders every phase change it observes.
///
/// Wakes on the change event or after `poll`, whichever comes first, and
/// compares the phase against the last one rendered; wake-ups without a real
/// change render nothing. Shutdown relies on the stop path raising the change
/// event, otherwise exit latency is bounded by `poll`.
pub async fn run<P: Presenter>(
    signal: Arc<SignalState>,
    mut presenter: P,
    cancel: CancellationToken,
    poll: Duration,
) -> Result<()> {
    let mut last_rendered: Option<Phase> = None;

    while !cancel.is_cancelled() {
        let phase = signal.phase();
        if last_rendered != Some(phase) {
            debug!(phase = %phase, previous = ?last_rendered, "rendering phase");
            presenter.show_phase(phase);
            last_rendered = Some(phase);
        } else {
            trace!(phase = %phase, "woke without phase change");
        }

        signal.wait_for_change(poll).await;
    }

    presenter.finish();
    debug!("presenter stopped");
    Ok(())
}
