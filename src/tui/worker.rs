//! Background worker for the classifier call.
//!
//! The risk check runs on its own thread and reports progress over a
//! channel, so the TUI main loop keeps drawing while the model is scored.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::application::{AssessmentService, AssessmentStage};
use crate::domain::{Assessment, HealthMetrics};
use crate::ports::RiskClassifier;

/// Reported when the worker goes away without a result.
pub const WORKER_STOPPED: &str = "risk check stopped unexpectedly";

/// Progress updates from the assessment worker.
#[derive(Debug, Clone)]
pub enum AssessmentProgress {
    /// A pipeline stage has started
    Stage(AssessmentStage),
    /// Finished with a result
    Complete(Box<Assessment>),
    /// Error occurred during the check
    Error(String),
}

impl AssessmentProgress {
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete(_) | Self::Error(_))
    }
}

impl From<AssessmentStage> for AssessmentProgress {
    fn from(stage: AssessmentStage) -> Self {
        Self::Stage(stage)
    }
}

/// Handle to a running assessment worker.
pub struct AssessmentWorkerHandle {
    /// Receiver for progress updates
    progress_rx: Receiver<AssessmentProgress>,
    /// Set once `Complete` or `Error` has been handed out
    finished: bool,
    /// Thread handle (for joining)
    _handle: JoinHandle<()>,
}

impl AssessmentWorkerHandle {
    /// Try to receive the next progress update (non-blocking).
    ///
    /// `None` means the worker is still running. If the worker hangs up
    /// before sending a result (for example, the classifier panicked), this
    /// yields a single `Error` so the caller never waits forever.
    pub fn try_recv(&mut self) -> Option<AssessmentProgress> {
        if self.finished {
            return None;
        }
        let progress = match self.progress_rx.try_recv() {
            Ok(progress) => progress,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => {
                tracing::error!("Assessment worker exited without a result");
                AssessmentProgress::Error(WORKER_STOPPED.to_string())
            }
        };
        self.finished = progress.is_terminal();
        Some(progress)
    }
}

/// Worker that runs one risk check in the background.
pub struct AssessmentWorker;

impl AssessmentWorker {
    /// Spawn a background assessment.
    ///
    /// Returns a handle to receive progress updates.
    pub fn spawn<C>(
        service: Arc<AssessmentService<C>>,
        metrics: HealthMetrics,
    ) -> AssessmentWorkerHandle
    where
        C: RiskClassifier + 'static,
    {
        let (tx, rx) = mpsc::channel();

        let handle = thread::spawn(move || {
            Self::run_with_progress(&service, metrics, &tx);
        });

        AssessmentWorkerHandle {
            progress_rx: rx,
            finished: false,
            _handle: handle,
        }
    }

    fn run_with_progress<C>(
        service: &AssessmentService<C>,
        metrics: HealthMetrics,
        tx: &Sender<AssessmentProgress>,
    ) where
        C: RiskClassifier,
    {
        // A closed receiver only means the UI moved on.
        let result = service.assess_with_progress(metrics, |stage| {
            let _ = tx.send(stage.into());
        });

        let _ = match result {
            Ok(assessment) => tx.send(AssessmentProgress::Complete(Box::new(assessment))),
            Err(e) => tx.send(AssessmentProgress::Error(e.to_string())),
        };
    }
}
