//! Restart-on-error supervision of pump attempts.

use super::backoff::Backoff;
use super::pump::{Direction, Pump};
use crate::config::BackoffConfig;
use crate::error::Result;
use crate::shutdown::CancelToken;
use tracing::{debug, info, warn};

/// What a supervisor did before it stopped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SupervisorReport {
    /// Pump attempts started (including ones that failed to connect).
    pub attempts: u64,
    /// Attempts that ended in a failure.
    pub failures: u64,
    /// Values forwarded across all attempts.
    pub delivered: u64,
}

/// Run pump attempts built by `connect` until cancellation.
///
/// A failed attempt (connect or run) is logged and retried after the next
/// backoff delay. The backoff resets once an attempt forwards a value.
/// Cancellation, whether observed by the pump or during a backoff wait,
/// ends supervision without error.
pub fn supervise<F>(
    direction: Direction,
    mut connect: F,
    backoff: BackoffConfig,
    cancel: &CancelToken,
) -> SupervisorReport
where
    F: FnMut() -> Result<Pump>,
{
    let mut backoff = Backoff::new(backoff);
    let mut report = SupervisorReport::default();

    info!(%direction, "sync started");

    while !cancel.is_cancelled() {
        report.attempts += 1;
        let mut progressed = false;

        let outcome = connect().and_then(|mut pump| {
            let result = pump.run();
            report.delivered += pump.delivered();
            progressed = pump.delivered() > 0;
            result
        });

        match outcome {
            Ok(()) => break,
            Err(e) if e.is_cancelled() => break,
            Err(e) => {
                report.failures += 1;
                warn!(%direction, error = %e, attempt = report.attempts, "sync failed");

                if progressed {
                    backoff.reset();
                }
                let delay = backoff.next_delay();
                debug!(%direction, ?delay, "restarting sync");

                if cancel.wait_timeout(delay) {
                    break;
                }
            }
        }
    }

    info!(
        %direction,
        attempts = report.attempts,
        failures = report.failures,
        "sync stopped"
    );
    report
}
