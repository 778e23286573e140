//! A single pump attempt.

use super::streams::{InputStream, OutputStream};
use crate::error::Result;
use std::fmt;
use tracing::trace;

/// Which way a pump moves values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    RemoteToLocal,
    LocalToRemote,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::RemoteToLocal => "remote-to-local",
            Direction::LocalToRemote => "local-to-remote",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one `consume` step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// A value was forwarded to the output.
    Delivered,
    /// The input produced an absent or empty value.
    Skipped,
    /// Cancellation was observed.
    Stopped,
}

/// Move at most one value from `input` to `output`.
///
/// Cancellation from either side becomes `Step::Stopped`; every other
/// error is returned.
pub fn consume(input: &mut dyn InputStream, output: &mut dyn OutputStream) -> Result<Step> {
    let value = match input.recv() {
        Ok(Some(value)) if !value.is_empty() => value,
        Ok(_) => return Ok(Step::Skipped),
        Err(e) if e.is_cancelled() => return Ok(Step::Stopped),
        Err(e) => return Err(e),
    };

    match output.send(&value) {
        Ok(()) => Ok(Step::Delivered),
        Err(e) if e.is_cancelled() => Ok(Step::Stopped),
        Err(e) => Err(e),
    }
}

/// An input/output pairing for one sync attempt.
pub struct Pump {
    direction: Direction,
    input: Box<dyn InputStream>,
    output: Box<dyn OutputStream>,
    delivered: u64,
}

impl Pump {
    pub fn new(
        direction: Direction,
        input: Box<dyn InputStream>,
        output: Box<dyn OutputStream>,
    ) -> Self {
        Self {
            direction,
            input,
            output,
            delivered: 0,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Values forwarded so far.
    pub fn delivered(&self) -> u64 {
        self.delivered
    }

    /// Repeat `consume` until cancellation (`Ok`) or a failure (`Err`).
    pub fn run(&mut self) -> Result<()> {
        loop {
            match consume(self.input.as_mut(), self.output.as_mut())? {
                Step::Delivered => {
                    self.delivered += 1;
                    trace!(direction = %self.direction, delivered = self.delivered, "value forwarded");
                }
                Step::Skipped => {}
                Step::Stopped => return Ok(()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClipError;
    use crate::types::ClipValue;
    use parking_lot::Mutex;
    use std::collections::VecDeque;
    use std::sync::Arc;

    /// Replays a script of results, then reports cancellation.
    struct Scripted(VecDeque<Result<Option<ClipValue>>>);

    impl InputStream for Scripted {
        fn recv(&mut self) -> Result<Option<ClipValue>> {
            self.0.pop_front().unwrap_or(Err(ClipError::Cancelled))
        }
    }

    #[derive(Clone, Default)]
    struct Collect(Arc<Mutex<Vec<ClipValue>>>);

    impl OutputStream for Collect {
        fn send(&mut self, value: &ClipValue) -> Result<()> {
            self.0.lock().push(value.clone());
            Ok(())
        }
    }

    struct Broken;

    impl OutputStream for Broken {
        fn send(&mut self, _value: &ClipValue) -> Result<()> {
            Err(ClipError::Transport("connection reset".to_string()))
        }
    }

    fn script(items: Vec<Result<Option<ClipValue>>>) -> Box<dyn InputStream> {
        Box::new(Scripted(items.into()))
    }

    #[test]
    fn test_consume_skips_absent_and_empty() {
        let mut input = Scripted(
            vec![Ok(None), Ok(Some(ClipValue::default())), Ok(Some(ClipValue::from("x")))].into(),
        );
        let mut out = Collect::default();

        assert_eq!(consume(&mut input, &mut out).unwrap(), Step::Skipped);
        assert_eq!(consume(&mut input, &mut out).unwrap(), Step::Skipped);
        assert_eq!(consume(&mut input, &mut out).unwrap(), Step::Delivered);
        assert_eq!(consume(&mut input, &mut out).unwrap(), Step::Stopped);
        assert_eq!(*out.0.lock(), vec![ClipValue::from("x")]);
    }

    #[test]
    fn test_run_stops_cleanly_on_cancel() {
        let out = Collect::default();
        let mut pump = Pump::new(
            Direction::RemoteToLocal,
            script(vec![Ok(Some(ClipValue::from("a"))), Ok(Some(ClipValue::from("b")))]),
            Box::new(out.clone()),
        );

        assert!(pump.run().is_ok());
        assert_eq!(pump.delivered(), 2);
        assert_eq!(out.0.lock().len(), 2);
    }

    #[test]
    fn test_run_propagates_input_failure() {
        let mut pump = Pump::new(
            Direction::LocalToRemote,
            script(vec![Err(ClipError::Clipboard("read failed".to_string()))]),
            Box::new(Collect::default()),
        );
        assert!(matches!(pump.run(), Err(ClipError::Clipboard(_))));
    }

    #[test]
    fn test_run_propagates_output_failure() {
        let mut pump = Pump::new(
            Direction::LocalToRemote,
            script(vec![Ok(Some(ClipValue::from("a")))]),
            Box::new(Broken),
        );
        assert!(matches!(pump.run(), Err(ClipError::Transport(_))));
        assert_eq!(pump.delivered(), 0);
    }

    #[test]
    fn test_direction_display() {
        assert_eq!(Direction::RemoteToLocal.to_string(), "remote-to-local");
        assert_eq!(Direction::LocalToRemote.to_string(), "local-to-remote");
    }
}
