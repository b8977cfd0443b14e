//! Playback orchestrator task
//!
//! Single owner of playback state: the status, the live session and its
//! caption. Everything else either reads snapshots or sends commands. Every
//! delayed callback is stamped with the generation it was scheduled under
//! and stale ones are dropped on arrival, so a superseded session can never
//! corrupt a later one - the same goes for a late plan fetch, whose
//! generation doubles as the in-flight request token.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use crate::config::PlaybackConfig;
use crate::llm::{FetchError, PlanFetcher, PlanResponse};
use crate::plan::Step;

use super::audio::{AudioSync, AudioTrack, StepTimeline};
use super::handle::PlaybackHandle;
use super::messages::{PlaybackCommand, PlaybackSnapshot, Status};
use super::scheduler::StepTimers;

/// Appended to the caption when the last step finishes
pub const CLOSING_REMARK: &str = " And that's the whole picture!";

/// Shown instead of a caption when the plan fetch fails
pub const FAILURE_CAPTION: &str = "I couldn't come up with a drawing for that. Please try again.";

/// One playback attempt of a plan
///
/// Superseded (never mutated in place) by the next submission; `repeat`
/// reuses the plan but restamps the generation.
struct PlaybackSession {
    steps: Arc<Vec<Step>>,
    narration: Option<AudioTrack>,
    /// Meaningful only while status is Drawing
    current_step: usize,
    generation: u64,
}

/// The playback orchestrator
///
/// Construct it, take a [`PlaybackHandle`] with [`handle`](Self::handle),
/// then consume it with [`run`](Self::run) in a spawned task.
pub struct Orchestrator {
    config: PlaybackConfig,
    fetcher: Arc<dyn PlanFetcher>,
    tx: mpsc::Sender<PlaybackCommand>,
    rx: mpsc::Receiver<PlaybackCommand>,
    snapshot_tx: watch::Sender<PlaybackSnapshot>,

    status: Status,
    caption: String,
    error: Option<String>,
    session: Option<PlaybackSession>,
    /// Monotonically increasing; bumped by every submit and repeat
    generation: u64,

    timers: StepTimers,
    audio: AudioSync,
}

impl Orchestrator {
    pub fn new(config: PlaybackConfig, fetcher: Arc<dyn PlanFetcher>) -> Self {
        let (tx, rx) = mpsc::channel(config.channel_buffer);
        let (snapshot_tx, _) = watch::channel(PlaybackSnapshot::default());
        Self {
            config,
            fetcher,
            tx,
            rx,
            snapshot_tx,
            status: Status::Idle,
            caption: String::new(),
            error: None,
            session: None,
            generation: 0,
            timers: StepTimers::new(),
            audio: AudioSync::new(),
        }
    }

    /// Create a handle before consuming the orchestrator with [`run`](Self::run)
    pub fn handle(&self) -> PlaybackHandle {
        PlaybackHandle::new(self.tx.clone(), self.snapshot_tx.subscribe())
    }

    /// Run the actor loop until a Shutdown command arrives
    pub async fn run(mut self) {
        info!("Orchestrator::run: started");
        while let Some(command) = self.rx.recv().await {
            match command {
                PlaybackCommand::Submit { prompt } => self.handle_submit(prompt),
                PlaybackCommand::Repeat => self.handle_repeat(),
                PlaybackCommand::PlanReady { generation, result } => {
                    self.handle_plan_ready(generation, result)
                }
                PlaybackCommand::Advance { generation, index } => {
                    self.handle_advance(generation, index)
                }
                PlaybackCommand::Complete { generation } => self.handle_complete(generation),
                PlaybackCommand::Shutdown => {
                    debug!("Orchestrator::run: shutdown requested");
                    break;
                }
            }
        }
        self.cancel_all();
        info!("Orchestrator::run: stopped");
    }

    fn handle_submit(&mut self, prompt: String) {
        let prompt = prompt.trim().to_string();
        if prompt.is_empty() {
            debug!("Orchestrator::handle_submit: blank prompt, ignoring");
            return;
        }
        if self.status.is_busy() {
            debug!(status = ?self.status, "Orchestrator::handle_submit: busy, ignoring");
            return;
        }

        self.cancel_all();
        self.generation += 1;
        let generation = self.generation;
        info!(generation, "Orchestrator::handle_submit: fetching plan");

        self.status = Status::Thinking;
        self.caption.clear();
        self.error = None;
        self.session = None;

        let fetcher = Arc::clone(&self.fetcher);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = fetcher.fetch_plan(&prompt).await;
            // Orchestrator gone means nothing left to update
            let _ = tx.send(PlaybackCommand::PlanReady { generation, result }).await;
        });

        self.publish();
    }

    fn handle_plan_ready(&mut self, generation: u64, result: Result<PlanResponse, FetchError>) {
        if generation != self.generation {
            debug!(
                generation,
                live = self.generation,
                "Orchestrator::handle_plan_ready: superseded fetch, dropping"
            );
            return;
        }

        match result {
            Ok(response) => {
                let step_count = response.plan.steps.len();
                info!(generation, step_count, "Orchestrator::handle_plan_ready: plan received");
                self.caption = response.plan.explanation;
                self.session = Some(PlaybackSession {
                    steps: Arc::new(response.plan.steps),
                    narration: response.narration,
                    current_step: 0,
                    generation,
                });
                if step_count == 0 {
                    self.status = Status::Done;
                } else {
                    self.status = Status::Drawing;
                    self.start_playback();
                }
            }
            Err(error) => {
                warn!(generation, %error, "Orchestrator::handle_plan_ready: fetch failed");
                self.status = Status::Error;
                self.error = Some(error.to_string());
                self.caption = FAILURE_CAPTION.to_string();
                self.session = None;
            }
        }
        self.publish();
    }

    /// Hand the live session to a timing strategy
    ///
    /// Narration drives the timeline only when both the track exists and
    /// audio sync is enabled; otherwise the fixed per-step timers are
    /// authoritative.
    fn start_playback(&mut self) {
        let Some(session) = &self.session else { return };
        let steps = session.steps.len();
        let generation = session.generation;

        if self.config.audio_sync {
            if let Some(track) = &session.narration {
                let timeline = StepTimeline::for_track(steps, track);
                self.audio.start(self.tx.clone(), timeline, generation);
                return;
            }
        }
        self.timers
            .schedule(self.tx.clone(), steps, self.config.step_duration(), generation);
    }

    fn handle_advance(&mut self, generation: u64, index: usize) {
        if generation != self.generation || self.status != Status::Drawing {
            debug!(
                generation,
                live = self.generation,
                status = ?self.status,
                "Orchestrator::handle_advance: stale callback, dropping"
            );
            return;
        }
        let Some(session) = &mut self.session else { return };
        let Some(step) = session.steps.get(index) else {
            warn!(index, "Orchestrator::handle_advance: index out of range, dropping");
            return;
        };

        session.current_step = index;
        self.caption = step.explanation.clone();
        self.publish();
    }

    fn handle_complete(&mut self, generation: u64) {
        if generation != self.generation || self.status != Status::Drawing {
            debug!(
                generation,
                live = self.generation,
                "Orchestrator::handle_complete: stale callback, dropping"
            );
            return;
        }

        info!(generation, "Orchestrator::handle_complete: playback finished");
        self.status = Status::Done;
        self.caption.push_str(CLOSING_REMARK);
        // The set is spent; clear the handles
        self.cancel_all();
        self.publish();
    }

    fn handle_repeat(&mut self) {
        if self.status != Status::Done {
            debug!(status = ?self.status, "Orchestrator::handle_repeat: not done, ignoring");
            return;
        }
        let has_steps = self.session.as_ref().is_some_and(|s| !s.steps.is_empty());
        if !has_steps {
            debug!("Orchestrator::handle_repeat: nothing to replay");
            return;
        }

        self.cancel_all();
        self.generation += 1;
        let generation = self.generation;
        info!(generation, "Orchestrator::handle_repeat: replaying plan");

        if let Some(session) = &mut self.session {
            session.generation = generation;
            session.current_step = 0;
        }
        self.status = Status::Drawing;
        self.start_playback();
        self.publish();
    }

    /// Cancel every pending timer and audio subscription. Idempotent.
    fn cancel_all(&mut self) {
        self.timers.cancel_all();
        self.audio.cancel_all();
    }

    fn publish(&self) {
        let snapshot = PlaybackSnapshot {
            status: self.status,
            caption: self.caption.clone(),
            error: self.error.clone(),
            steps: self
                .session
                .as_ref()
                .map(|s| Arc::clone(&s.steps))
                .unwrap_or_default(),
            current_step: match (self.status, &self.session) {
                (Status::Drawing, Some(session)) => Some(session.current_step),
                _ => None,
            },
            generation: self.generation,
        };
        self.snapshot_tx.send_replace(snapshot);
    }
}
