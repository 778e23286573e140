//! Syncer: both pumps on their own threads.

use super::pump::{Direction, Pump};
use super::streams::{LocalInput, LocalOutput, RemoteInput, RemoteOutput};
use super::supervisor::{supervise, SupervisorReport};
use crate::clipboard::{Clipboard, ClipboardWatcher};
use crate::config::ClipConfig;
use crate::error::{ClipError, Result};
use crate::service::ClipboardApi;
use crate::shutdown::{CancelToken, Grace};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{error, info};

/// Keeps a local clipboard and the shared service in sync.
pub struct Syncer {
    api: Arc<dyn ClipboardApi>,
    clipboard: Arc<dyn Clipboard>,
    config: ClipConfig,
}

impl Syncer {
    pub fn new(api: Arc<dyn ClipboardApi>, clipboard: Arc<dyn Clipboard>, config: ClipConfig) -> Self {
        Self {
            api,
            clipboard,
            config,
        }
    }

    /// Build a remote-to-local pump: subscribe stream into the local clipboard.
    pub fn remote_to_local(&self, cancel: &CancelToken) -> Result<Pump> {
        let stream = self.api.subscribe()?;
        Ok(Pump::new(
            Direction::RemoteToLocal,
            Box::new(RemoteInput::new(stream, cancel.clone())),
            Box::new(LocalOutput::new(Arc::clone(&self.clipboard))),
        ))
    }

    /// Build a local-to-remote pump: clipboard watcher into service pushes.
    pub fn local_to_remote(&self, cancel: &CancelToken) -> Pump {
        let watcher = ClipboardWatcher::new(
            Arc::clone(&self.clipboard),
            self.config.poll_interval,
            cancel.clone(),
        );
        Pump::new(
            Direction::LocalToRemote,
            Box::new(LocalInput::new(watcher)),
            Box::new(RemoteOutput::new(Arc::clone(&self.api))),
        )
    }

    /// Check preconditions and start both pumps.
    ///
    /// Fails with `ClipboardUnsupported` if the local clipboard cannot be
    /// used, before any pump starts.
    pub fn start(self) -> Result<SyncerHandle> {
        self.config.validate()?;
        if !self.clipboard.is_supported() {
            error!("system clipboard is unsupported");
            return Err(ClipError::ClipboardUnsupported);
        }

        let cancel = CancelToken::new();
        let syncer = Arc::new(self);
        let mut threads = Vec::with_capacity(2);

        for direction in [Direction::RemoteToLocal, Direction::LocalToRemote] {
            let syncer = Arc::clone(&syncer);
            let cancel_for_thread = cancel.clone();
            let spawned = thread::Builder::new()
                .name(format!("rclip-{}", direction))
                .spawn(move || syncer.run(direction, &cancel_for_thread));

            match spawned {
                Ok(handle) => threads.push((direction, handle)),
                Err(e) => {
                    cancel.cancel();
                    for (_, handle) in threads {
                        let _ = handle.join();
                    }
                    return Err(ClipError::Io(e));
                }
            }
        }

        info!("syncer started");
        Ok(SyncerHandle { cancel, threads })
    }

    fn run(&self, direction: Direction, cancel: &CancelToken) -> SupervisorReport {
        let backoff = self.config.backoff.clone();
        match direction {
            Direction::RemoteToLocal => {
                supervise(direction, || self.remote_to_local(cancel), backoff, cancel)
            }
            Direction::LocalToRemote => {
                supervise(direction, || Ok(self.local_to_remote(cancel)), backoff, cancel)
            }
        }
    }
}

/// Running syncer.
pub struct SyncerHandle {
    cancel: CancelToken,
    threads: Vec<(Direction, JoinHandle<SupervisorReport>)>,
}

impl SyncerHandle {
    /// Ask both pumps to stop. Idempotent.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.threads.iter().all(|(_, handle)| handle.is_finished())
    }

    /// Block until both pumps have stopped.
    pub fn wait(self) -> Vec<(Direction, SupervisorReport)> {
        let mut reports = Vec::with_capacity(self.threads.len());
        for (direction, handle) in self.threads {
            match handle.join() {
                Ok(report) => reports.push((direction, report)),
                Err(_) => error!(%direction, "sync thread panicked"),
            }
        }
        reports
    }

    /// Graceful shutdown that cancels the pumps and waits for them, bounded
    /// by `timeout`.
    pub fn into_grace(self, timeout: Duration) -> Grace {
        let cancel = self.cancel_token();
        Grace::new(move || cancel.cancel())
            .with_wait(move || {
                self.wait();
            })
            .with_timeout(timeout)
            .on_shutdown(|| info!("gracefully stopping, request again to force"))
            .on_done(|| info!("stopped"))
            .on_force_quit(|| info!("force stopping"))
            .on_timeout(|| info!("graceful stop is taking too long, force stopping"))
    }
}
