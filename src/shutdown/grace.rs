//! Graceful shutdown supervisor.

use crossbeam_channel::{after, bounded, never, select, Receiver};
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

type Hook = Box<dyn FnOnce() + Send + 'static>;

/// How a graceful shutdown ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GraceOutcome {
    /// Shutdown and wait hooks both completed.
    Done,
    /// A second termination request arrived first.
    ForceQuit,
    /// The timeout elapsed first.
    Timeout,
}

/// Orderly shutdown driven by termination requests.
///
/// `run` blocks until the first request, then runs `on_shutdown`,
/// `shutdown` and `wait` on a helper thread. It returns as soon as one of
/// three things happens: the hooks finish, a second request arrives, or the
/// timeout elapses. In the last two cases the helper thread is abandoned.
pub struct Grace {
    shutdown: Hook,
    wait: Option<Hook>,
    timeout: Option<Duration>,
    on_shutdown: Option<Hook>,
    on_done: Option<Hook>,
    on_force_quit: Option<Hook>,
    on_timeout: Option<Hook>,
}

impl Grace {
    /// `shutdown` starts the teardown (typically cancels a token).
    pub fn new(shutdown: impl FnOnce() + Send + 'static) -> Self {
        Self {
            shutdown: Box::new(shutdown),
            wait: None,
            timeout: None,
            on_shutdown: None,
            on_done: None,
            on_force_quit: None,
            on_timeout: None,
        }
    }

    /// Blocks until teardown completes. Only needed if `shutdown` is asynchronous.
    pub fn with_wait(mut self, wait: impl FnOnce() + Send + 'static) -> Self {
        self.wait = Some(Box::new(wait));
        self
    }

    /// Bound on the time spent waiting. Zero disables the bound.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = if timeout.is_zero() { None } else { Some(timeout) };
        self
    }

    pub fn on_shutdown(mut self, hook: impl FnOnce() + Send + 'static) -> Self {
        self.on_shutdown = Some(Box::new(hook));
        self
    }

    pub fn on_done(mut self, hook: impl FnOnce() + Send + 'static) -> Self {
        self.on_done = Some(Box::new(hook));
        self
    }

    pub fn on_force_quit(mut self, hook: impl FnOnce() + Send + 'static) -> Self {
        self.on_force_quit = Some(Box::new(hook));
        self
    }

    pub fn on_timeout(mut self, hook: impl FnOnce() + Send + 'static) -> Self {
        self.on_timeout = Some(Box::new(hook));
        self
    }

    /// Wait for termination requests on `terminations` and shut down.
    ///
    /// A disconnected channel counts as the first request and is ignored
    /// afterwards.
    pub fn run(self, terminations: &Receiver<()>) -> GraceOutcome {
        let _ = terminations.recv();
        info!("termination requested, shutting down");

        let Grace {
            shutdown,
            wait,
            timeout,
            on_shutdown,
            on_done,
            on_force_quit,
            on_timeout,
        } = self;

        let (done_tx, done_rx) = bounded::<()>(1);
        let spawned = thread::Builder::new()
            .name("rclip-shutdown".to_string())
            .spawn(move || {
                if let Some(hook) = on_shutdown {
                    hook();
                }
                shutdown();
                if let Some(wait) = wait {
                    wait();
                }
                let _ = done_tx.send(());
            });
        if let Err(e) = spawned {
            warn!(error = %e, "failed to spawn shutdown thread");
            return Self::finish(GraceOutcome::ForceQuit, on_force_quit);
        }

        let deadline = match timeout {
            Some(t) => after(t),
            None => never(),
        };
        let mut second = terminations.clone();

        loop {
            select! {
                recv(done_rx) -> _ => {
                    debug!("shutdown completed");
                    return Self::finish(GraceOutcome::Done, on_done);
                }
                recv(second) -> msg => {
                    if msg.is_err() {
                        second = never();
                        continue;
                    }
                    warn!("second termination request, forcing exit");
                    return Self::finish(GraceOutcome::ForceQuit, on_force_quit);
                }
                recv(deadline) -> _ => {
                    warn!("shutdown timed out, forcing exit");
                    return Self::finish(GraceOutcome::Timeout, on_timeout);
                }
            }
        }
    }

    fn finish(outcome: GraceOutcome, hook: Option<Hook>) -> GraceOutcome {
        if let Some(hook) = hook {
            hook();
        }
        outcome
    }
}
