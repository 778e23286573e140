//! Configuration for the clipboard service and the reconciliation loop.
//!
//! One `ClipConfig` is built by the host (from defaults or JSON) and handed
//! to each component by value. Nothing here is global.

use crate::error::{ClipError, Result};
use serde::Deserialize;
use std::time::Duration;

/// Top-level configuration.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClipConfig {
    /// Max retained history entries.
    /// Default: 100
    pub history_size: usize,

    /// Interval between local clipboard polls.
    /// Default: 1s
    #[serde(with = "millis")]
    pub poll_interval: Duration,

    /// Per-subscriber buffer before the subscriber is disconnected.
    /// Default: 16
    pub subscriber_buffer: usize,

    /// Restart backoff for reconciliation pumps.
    pub backoff: BackoffConfig,

    /// Max time to wait for pumps on shutdown.
    /// Default: 5s
    #[serde(with = "millis")]
    pub shutdown_timeout: Duration,
}

impl Default for ClipConfig {
    fn default() -> Self {
        Self {
            history_size: 100,
            poll_interval: Duration::from_secs(1),
            subscriber_buffer: 16,
            backoff: BackoffConfig::default(),
            shutdown_timeout: Duration::from_secs(5),
        }
    }
}

impl ClipConfig {
    /// Parse a JSON document. Missing fields take their defaults.
    ///
    /// Durations are given in milliseconds.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ClipConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.history_size == 0 {
            return Err(ClipError::InvalidConfig(
                "history_size must be positive".to_string(),
            ));
        }
        if self.subscriber_buffer == 0 {
            return Err(ClipError::InvalidConfig(
                "subscriber_buffer must be positive".to_string(),
            ));
        }
        if self.poll_interval.is_zero() {
            return Err(ClipError::InvalidConfig(
                "poll_interval must be positive".to_string(),
            ));
        }
        self.backoff.validate()
    }
}

/// Exponential backoff between pump restarts.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct BackoffConfig {
    /// First delay after a failure.
    #[serde(with = "millis")]
    pub initial: Duration,
    /// Upper bound on any delay.
    #[serde(with = "millis")]
    pub max: Duration,
    /// Growth factor per consecutive failure.
    pub multiplier: f64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            initial: Duration::from_millis(100),
            max: Duration::from_secs(30),
            multiplier: 2.0,
        }
    }
}

impl BackoffConfig {
    pub fn validate(&self) -> Result<()> {
        if self.multiplier.is_nan() || self.multiplier < 1.0 {
            return Err(ClipError::InvalidConfig(format!(
                "backoff multiplier must be >= 1, got {}",
                self.multiplier
            )));
        }
        if self.initial.is_zero() {
            return Err(ClipError::InvalidConfig(
                "backoff initial must be positive".to_string(),
            ));
        }
        if self.max < self.initial {
            return Err(ClipError::InvalidConfig(
                "backoff max must not be below initial".to_string(),
            ));
        }
        Ok(())
    }
}

mod millis {
    use serde::{Deserialize, Deserializer};
    use std::time::Duration;

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}
