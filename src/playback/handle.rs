//! PlaybackHandle - client interface to the orchestrator

use eyre::{Result, eyre};
use tokio::sync::{mpsc, watch};

use super::messages::{PlaybackCommand, PlaybackSnapshot};

/// Handle for the presentation layer to drive playback
///
/// Cloneable; every operation is a channel send to the orchestrator task,
/// which applies its own validation (blank prompts and busy-phase submits
/// are dropped there, not here).
#[derive(Debug, Clone)]
pub struct PlaybackHandle {
    tx: mpsc::Sender<PlaybackCommand>,
    snapshot_rx: watch::Receiver<PlaybackSnapshot>,
}

impl PlaybackHandle {
    pub(crate) fn new(
        tx: mpsc::Sender<PlaybackCommand>,
        snapshot_rx: watch::Receiver<PlaybackSnapshot>,
    ) -> Self {
        Self { tx, snapshot_rx }
    }

    /// Submit a prompt for explanation
    pub async fn submit(&self, prompt: impl Into<String>) -> Result<()> {
        self.tx
            .send(PlaybackCommand::Submit { prompt: prompt.into() })
            .await
            .map_err(|_| eyre!("playback channel closed"))
    }

    /// Replay the finished plan from the first step
    pub async fn repeat(&self) -> Result<()> {
        self.tx
            .send(PlaybackCommand::Repeat)
            .await
            .map_err(|_| eyre!("playback channel closed"))
    }

    /// Tear the orchestrator down, cancelling all pending timers
    pub async fn shutdown(&self) -> Result<()> {
        self.tx
            .send(PlaybackCommand::Shutdown)
            .await
            .map_err(|_| eyre!("playback channel closed"))
    }

    /// The latest published snapshot
    pub fn snapshot(&self) -> PlaybackSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// Subscribe to snapshot changes
    pub fn subscribe(&self) -> watch::Receiver<PlaybackSnapshot> {
        self.snapshot_rx.clone()
    }
}
