//! Timer scheduler - cancelable delayed step activations
//!
//! Converts a plan into delayed [`PlaybackCommand`]s when no narration
//! timeline exists: `Advance(i)` fires at `i * step_duration` and `Complete`
//! at `steps * step_duration`, exactly `steps + 1` timers per session. Every
//! handle for a session is recorded in one set so cancellation can never
//! leave a stale timer behind.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use super::messages::PlaybackCommand;

/// Owns the delayed-callback handles for the live timer session
#[derive(Debug, Default)]
pub struct StepTimers {
    handles: Vec<JoinHandle<()>>,
}

impl StepTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule one session's activations
    ///
    /// Any previously scheduled set is cancelled first; two sets never
    /// coexist. A dropped orchestrator makes the sends fail silently, which
    /// is fine: there is no state left to corrupt.
    pub fn schedule(
        &mut self,
        tx: mpsc::Sender<PlaybackCommand>,
        steps: usize,
        step_duration: Duration,
        generation: u64,
    ) {
        self.cancel_all();
        debug!(steps, ?step_duration, generation, "StepTimers::schedule: called");

        for index in 0..steps {
            let tx = tx.clone();
            let delay = step_duration * index as u32;
            self.handles.push(tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                let _ = tx.send(PlaybackCommand::Advance { generation, index }).await;
            }));
        }

        let delay = step_duration * steps as u32;
        self.handles.push(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(PlaybackCommand::Complete { generation }).await;
        }));
    }

    /// Abort every recorded timer and drop the handles
    ///
    /// Idempotent; aborting an already-fired handle is a benign no-op.
    pub fn cancel_all(&mut self) {
        if !self.handles.is_empty() {
            debug!(count = self.handles.len(), "StepTimers::cancel_all: aborting");
        }
        for handle in self.handles.drain(..) {
            handle.abort();
        }
    }

    /// Number of handles recorded for the live set
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl Drop for StepTimers {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
