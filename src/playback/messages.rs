//! Message and status types for the playback orchestrator

use std::sync::Arc;

use crate::llm::{FetchError, PlanResponse};
use crate::plan::Step;

/// Coarse lifecycle phase of the orchestrator
///
/// Exactly one value is live at any time, owned by the orchestrator task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    /// Nothing submitted yet
    #[default]
    Idle,
    /// A plan is being fetched
    Thinking,
    /// Steps are playing back on the canvas
    Drawing,
    /// Playback finished; the last frame stays on the board
    Done,
    /// The fetch failed; the message is in the snapshot
    Error,
}

impl Status {
    /// Phases during which new submissions are rejected
    pub fn is_busy(&self) -> bool {
        matches!(self, Status::Thinking | Status::Drawing)
    }
}

/// Commands consumed by the orchestrator actor
///
/// `Submit`, `Repeat` and `Shutdown` come from the presentation layer via
/// [`PlaybackHandle`](super::PlaybackHandle). The rest are internal callbacks
/// from the fetch task and the timing strategies, each stamped with the
/// generation it was scheduled under so stale ones can be dropped.
#[derive(Debug)]
pub enum PlaybackCommand {
    /// Request a new plan and play it back
    Submit { prompt: String },

    /// Replay the finished plan from the first step
    Repeat,

    /// The fetch task finished
    PlanReady {
        generation: u64,
        result: Result<PlanResponse, FetchError>,
    },

    /// Activate step `index`
    Advance { generation: u64, index: usize },

    /// Every step has played
    Complete { generation: u64 },

    /// Cancel everything and exit the actor loop
    Shutdown,
}

/// Point-in-time view of playback state, published over a watch channel
///
/// This is the whole contract between the orchestrator and the presentation
/// layer: the TUI, the headless printer and the tests all consume it.
#[derive(Debug, Clone)]
pub struct PlaybackSnapshot {
    pub status: Status,

    /// Overall explanation, the active step caption, or the failure sentence
    pub caption: String,

    /// Human-readable fetch failure; set while status is Error
    pub error: Option<String>,

    /// Steps of the live session (empty when there is none)
    pub steps: Arc<Vec<Step>>,

    /// Active step index; `Some` only while status is Drawing
    pub current_step: Option<usize>,

    /// Session generation; a change tells the renderer to wipe the board
    pub generation: u64,
}

impl Default for PlaybackSnapshot {
    fn default() -> Self {
        Self {
            status: Status::Idle,
            caption: String::new(),
            error: None,
            steps: Arc::new(Vec::new()),
            current_step: None,
            generation: 0,
        }
    }
}
