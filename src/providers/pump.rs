// SPDX-License-Identifier: GPL-3.0-only

//! Worker-thread lifecycle for capture pumps
//!
//! Streams and the clip recorder run their capture work on a dedicated
//! thread. [`CaptureLoop`] owns that thread: it drives a closure until the
//! closure asks to stop or the loop is signalled, and joining it is the
//! acknowledgement that every resource created inside the thread (device
//! handles included) has been released.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use tracing::{debug, warn};

/// Action returned by a pump iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopAction {
    /// Run another iteration
    Continue,
    /// Leave the loop
    Stop,
}

/// Handle to a capture worker thread
pub struct CaptureLoop {
    handle: Option<JoinHandle<()>>,
    stop_signal: Arc<AtomicBool>,
    name: &'static str,
}

impl CaptureLoop {
    /// Spawn a worker that calls `work` until it returns [`LoopAction::Stop`]
    /// or [`CaptureLoop::stop`] is invoked.
    pub fn spawn<F>(name: &'static str, mut work: F) -> Self
    where
        F: FnMut() -> LoopAction + Send + 'static,
    {
        Self::spawn_with_setup(name, || Ok(()), move |()| work())
    }

    /// Spawn a worker with a setup step running inside the thread.
    ///
    /// Resources acquired by `setup` live on the worker thread and are
    /// dropped when it exits, so a joined loop means a released device.
    /// A setup failure logs and ends the thread without running `work`.
    pub fn spawn_with_setup<S, I, F>(name: &'static str, setup: I, mut work: F) -> Self
    where
        S: Send + 'static,
        I: FnOnce() -> Result<S, String> + Send + 'static,
        F: FnMut(&mut S) -> LoopAction + Send + 'static,
    {
        let stop_signal = Arc::new(AtomicBool::new(false));
        let signal = Arc::clone(&stop_signal);

        debug!(name, "Starting capture loop");

        let handle = thread::spawn(move || {
            let mut state = match setup() {
                Ok(s) => s,
                Err(e) => {
                    warn!(name, error = %e, "Capture loop setup failed");
                    return;
                }
            };

            while !signal.load(Ordering::SeqCst) {
                if work(&mut state) == LoopAction::Stop {
                    break;
                }
            }

            debug!(name, "Capture loop exiting");
        });

        Self {
            handle: Some(handle),
            stop_signal,
            name,
        }
    }

    /// Whether the worker thread is still alive
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Signal the worker to stop without waiting for it
    pub fn request_stop(&self) {
        self.stop_signal.store(true, Ordering::SeqCst);
    }

    /// Signal the worker and block until the thread has exited
    pub fn stop(&mut self) {
        self.request_stop();
        self.join();
    }

    /// Block until the thread has exited without signalling it
    pub fn join(&mut self) {
        if let Some(handle) = self.handle.take()
            && handle.join().is_err()
        {
            warn!(name = self.name, "Capture loop thread panicked");
        }
    }
}

impl Drop for CaptureLoop {
    fn drop(&mut self) {
        if self.handle.is_some() {
            self.stop();
        }
    }
}
