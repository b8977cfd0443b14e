//! TUI runner - main loop that owns the terminal and the playback handle
//!
//! Responsibilities:
//! - Rendering at ~30 FPS (the tick also drives the reveal animation)
//! - Folding playback snapshots into the App on each tick
//! - Draining queued prompt/replay requests into the playback handle
//! - Shutting the orchestrator down on quit

use std::time::Duration;

use eyre::Result;
use tokio::sync::watch;
use tracing::debug;

use crate::playback::{PlaybackHandle, PlaybackSnapshot};

use super::Tui;
use super::app::App;
use super::events::{Event, EventHandler};
use super::views;

/// TUI runner that manages the terminal and event loop
pub struct TuiRunner {
    app: App,
    terminal: Tui,
    events: EventHandler,
    playback: PlaybackHandle,
    snapshots: watch::Receiver<PlaybackSnapshot>,
    initial_prompt: Option<String>,
}

impl TuiRunner {
    pub fn new(terminal: Tui, playback: PlaybackHandle) -> Self {
        let snapshots = playback.subscribe();
        Self {
            app: App::new(),
            terminal,
            events: EventHandler::new(Duration::from_millis(33)), // ~30 FPS
            playback,
            snapshots,
            initial_prompt: None,
        }
    }

    /// Submit this prompt as soon as the loop starts
    pub fn with_initial_prompt(mut self, prompt: Option<String>) -> Self {
        self.initial_prompt = prompt;
        self
    }

    /// Run the TUI main loop
    pub async fn run(&mut self) -> Result<()> {
        if let Some(prompt) = self.initial_prompt.take() {
            self.playback.submit(prompt).await?;
        }

        loop {
            self.terminal.draw(|frame| views::render(&self.app, frame))?;

            match self.events.next().await? {
                Event::Tick => self.handle_tick().await?,
                Event::Key(key) => self.app.handle_key(key),
                Event::Resize(width, height) => {
                    debug!(width, height, "TuiRunner::run: resize");
                }
            }

            if self.app.should_quit() {
                // Cancels any pending timers before the terminal is restored
                self.playback.shutdown().await.ok();
                break;
            }
        }

        Ok(())
    }

    async fn handle_tick(&mut self) -> Result<()> {
        if self.snapshots.has_changed().unwrap_or(false) {
            let snapshot = self.snapshots.borrow_and_update().clone();
            self.app.observe(snapshot);
        }
        self.app.tick();

        if let Some(prompt) = self.app.take_pending_prompt() {
            self.playback.submit(prompt).await?;
        }
        if self.app.take_pending_repeat() {
            self.playback.repeat().await?;
        }
        Ok(())
    }
}
