//! Request worker for non-blocking collaborator calls.
//!
//! Each submission runs on its own thread so the TUI main loop keeps
//! drawing and accepting input while a call is in flight. There is no
//! cancellation: a worker always runs its call to completion, and a
//! dropped handle simply discards the result.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::application::{execute, Action, Outcome, Submission};
use crate::ports::RecordService;

/// Handle to a running request worker.
pub struct RequestWorkerHandle {
    action: Action,
    outcome_rx: Receiver<Outcome>,
    _handle: JoinHandle<()>,
}

impl RequestWorkerHandle {
    /// Try to receive the settled outcome (non-blocking).
    ///
    /// A worker that died without reporting is treated as a failed call.
    #[must_use]
    pub fn try_recv(&self) -> Option<Outcome> {
        match self.outcome_rx.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                tracing::error!(action = %self.action, "Request worker exited without a result");
                Some(Outcome::Failed(self.action))
            }
        }
    }
}

/// Spawns one background thread per submission.
pub struct RequestWorker;

impl RequestWorker {
    /// Spawn a background call for `submission`.
    ///
    /// Returns a handle to receive the outcome.
    pub fn spawn<S>(service: Arc<S>, submission: Submission) -> RequestWorkerHandle
    where
        S: RecordService + 'static,
    {
        let action = submission.action();
        let (tx, rx) = mpsc::channel();

        let handle = thread::spawn(move || {
            let outcome = execute(service.as_ref(), &submission);
            // The receiver is gone if the app quit mid-flight.
            let _ = tx.send(outcome);
        });

        RequestWorkerHandle {
            action,
            outcome_rx: rx,
            _handle: handle,
        }
    }
}
