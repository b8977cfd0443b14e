//! Audio sync adapter - step advancement keyed to a narration timeline
//!
//! When a plan response carries pre-synthesized narration, step boundaries
//! come from the track (explicit per-step marks when the synthesizer
//! provides them, otherwise a proportional split of the total duration) and
//! the same Advance/Complete commands fire at the boundary offsets. Without
//! narration this component is inert and the timer scheduler is
//! authoritative.
//!
//! The adapter honors the same discipline as
//! [`StepTimers`](super::scheduler::StepTimers): one cancelable handle set,
//! every command stamped with its generation.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use super::messages::PlaybackCommand;

/// Raw narration audio accompanying a plan
#[derive(Debug, Clone)]
pub struct AudioTrack {
    /// Mono PCM samples
    pub samples: Arc<Vec<f32>>,

    /// Samples per second
    pub sample_rate: u32,

    /// Explicit step start offsets, when the synthesizer provides them
    pub step_marks: Option<Vec<Duration>>,
}

impl AudioTrack {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples: Arc::new(samples),
            sample_rate,
            step_marks: None,
        }
    }

    pub fn with_step_marks(mut self, marks: Vec<Duration>) -> Self {
        self.step_marks = Some(marks);
        self
    }

    /// Total track duration derived from the sample count
    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.samples.len() as f64 / self.sample_rate as f64)
    }
}

/// Per-step start offsets plus the track end
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepTimeline {
    /// When each step activates, relative to playback start
    pub starts: Vec<Duration>,

    /// When playback completes
    pub total: Duration,
}

impl StepTimeline {
    /// Derive boundaries for `steps` steps from a narration track
    ///
    /// Explicit marks win when there are enough of them (extras are
    /// truncated); otherwise the total duration is split proportionally.
    pub fn for_track(steps: usize, track: &AudioTrack) -> Self {
        let total = track.duration();
        match &track.step_marks {
            Some(marks) if marks.len() >= steps => Self {
                starts: marks[..steps].to_vec(),
                total,
            },
            _ => Self::proportional(steps, total),
        }
    }

    /// Divide `total` evenly across `steps` steps
    pub fn proportional(steps: usize, total: Duration) -> Self {
        let starts = (0..steps)
            .map(|index| total.mul_f64(index as f64 / steps.max(1) as f64))
            .collect();
        Self { starts, total }
    }
}

/// Drives Advance/Complete from a narration timeline
#[derive(Debug, Default)]
pub struct AudioSync {
    handles: Vec<JoinHandle<()>>,
}

impl AudioSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start driving the given timeline
    ///
    /// Any previous subscription is cancelled first.
    pub fn start(&mut self, tx: mpsc::Sender<PlaybackCommand>, timeline: StepTimeline, generation: u64) {
        self.cancel_all();
        debug!(
            steps = timeline.starts.len(),
            total = ?timeline.total,
            generation,
            "AudioSync::start: called"
        );

        for (index, start) in timeline.starts.iter().copied().enumerate() {
            let tx = tx.clone();
            self.handles.push(tokio::spawn(async move {
                tokio::time::sleep(start).await;
                let _ = tx.send(PlaybackCommand::Advance { generation, index }).await;
            }));
        }

        let total = timeline.total;
        self.handles.push(tokio::spawn(async move {
            tokio::time::sleep(total).await;
            let _ = tx.send(PlaybackCommand::Complete { generation }).await;
        }));
    }

    /// Abort the subscription. Idempotent.
    pub fn cancel_all(&mut self) {
        if !self.handles.is_empty() {
            debug!(count = self.handles.len(), "AudioSync::cancel_all: aborting");
        }
        for handle in self.handles.drain(..) {
            handle.abort();
        }
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl Drop for AudioSync {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
