//! Whiteboard playback
//!
//! The orchestrator state machine and its two timing strategies. The
//! orchestrator task is the sole mutator of playback state; the presentation
//! layer drives it through [`PlaybackHandle`] and observes it through
//! [`PlaybackSnapshot`]s on a watch channel.

pub mod audio;
mod core;
mod handle;
mod messages;
pub mod scheduler;

pub use self::audio::{AudioSync, AudioTrack, StepTimeline};
pub use self::core::{CLOSING_REMARK, FAILURE_CAPTION, Orchestrator};
pub use self::handle::PlaybackHandle;
pub use self::messages::{PlaybackCommand, PlaybackSnapshot, Status};
pub use self::scheduler::StepTimers;
