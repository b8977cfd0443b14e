//! chalkboard - AI whiteboard explainer
//!
//! A prompt becomes a multi-step drawing [`Plan`] via an LLM; the playback
//! orchestrator then draws each step on a terminal canvas in lock-step with
//! its caption, on fixed per-step timers or an optional narration timeline,
//! and can replay the finished drawing.
//!
//! # Core concepts
//!
//! - **Single owner**: one actor task ([`Orchestrator`]) owns status,
//!   session and caption; everything else sends commands or reads snapshots.
//! - **Generation stamping**: every submit/repeat bumps a counter; delayed
//!   callbacks carry the generation they were scheduled under and stale ones
//!   are dropped, so a superseded session can never corrupt a later one.
//! - **One timer set**: all pending timers for a session live in one
//!   cancelable set, cleared before any new set is created.
//!
//! # Modules
//!
//! - [`plan`] - the immutable plan/step/draw-op data model
//! - [`llm`] - the [`PlanFetcher`] trait and Anthropic implementation
//! - [`playback`] - the orchestrator, timer scheduler and audio sync adapter
//! - [`render`] - cumulative sketch state consumed by the TUI canvas
//! - [`tui`] - terminal front end
//! - [`config`] - configuration types and loading

pub mod cli;
pub mod config;
pub mod llm;
pub mod plan;
pub mod playback;
pub mod render;
pub mod tui;

// Re-export commonly used types
pub use config::{Config, LlmConfig, PlaybackConfig};
pub use llm::{AnthropicFetcher, FetchError, PlanFetcher, PlanResponse, create_fetcher};
pub use plan::{CANVAS_SIZE, DrawOp, Plan, Point, Step};
pub use playback::{
    AudioSync, AudioTrack, CLOSING_REMARK, FAILURE_CAPTION, Orchestrator, PlaybackCommand,
    PlaybackHandle, PlaybackSnapshot, Status, StepTimeline, StepTimers,
};
pub use render::Sketch;
