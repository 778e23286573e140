//! Exponential restart backoff.

use crate::config::BackoffConfig;
use std::time::Duration;

/// Floor for any delay, so an unvalidated zero config cannot spin.
const MIN_DELAY: Duration = Duration::from_millis(1);

/// Delay generator for consecutive pump failures.
///
/// The first delay is `initial`; each following one is multiplied by
/// `multiplier` and capped at `max`. `reset` starts over.
#[derive(Clone, Debug)]
pub struct Backoff {
    config: BackoffConfig,
    last: Option<Duration>,
}

impl Backoff {
    pub fn new(config: BackoffConfig) -> Self {
        Self { config, last: None }
    }

    pub fn next_delay(&mut self) -> Duration {
        let delay = match self.last {
            None => self.config.initial,
            Some(last) => {
                let scaled = last.as_nanos() as f64 * self.config.multiplier;
                if scaled >= self.config.max.as_nanos() as f64 {
                    self.config.max
                } else {
                    Duration::from_nanos(scaled as u64)
                }
            }
        }
        .min(self.config.max)
        .max(MIN_DELAY);

        self.last = Some(delay);
        delay
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}
