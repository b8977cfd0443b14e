//! Canvas renderer state
//!
//! Pure presentation over the playback snapshot: no timing, no channels.
//! Chalk is cumulative within a session - completed steps stay on the board
//! while the active step's marks appear a few per UI tick - and a generation
//! change wipes the board clean, the explicit stand-in for tearing the
//! canvas down and rebuilding it.

use std::sync::Arc;

use crate::plan::{DrawOp, Step};
use crate::playback::{PlaybackSnapshot, Status};

/// Marks currently on the board
#[derive(Debug, Default)]
pub struct Sketch {
    generation: u64,
    steps: Arc<Vec<Step>>,
    /// Ops of every step the playhead has moved past
    committed: Vec<DrawOp>,
    committed_steps: usize,
    active_step: Option<usize>,
    /// How many of the active step's ops are visible
    revealed: usize,
    frozen: bool,
}

impl Sketch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold the latest snapshot in
    ///
    /// Resets on a new generation, commits steps the playhead has moved
    /// past, and freezes the frame on Done. Idle, Thinking and Error carry
    /// no steps, so the board stays blank for them.
    pub fn sync(&mut self, snapshot: &PlaybackSnapshot) {
        if snapshot.generation != self.generation {
            *self = Self {
                generation: snapshot.generation,
                ..Self::default()
            };
        }
        self.steps = Arc::clone(&snapshot.steps);

        match snapshot.status {
            Status::Drawing => {
                let Some(index) = snapshot.current_step else { return };
                self.frozen = false;
                self.commit_through(index);
                if self.active_step != Some(index) {
                    self.active_step = Some(index);
                    self.revealed = 0;
                }
            }
            Status::Done => {
                self.commit_through(self.steps.len());
                self.active_step = None;
                self.revealed = 0;
                self.frozen = true;
            }
            Status::Idle | Status::Thinking | Status::Error => {}
        }
    }

    /// Advance the reveal animation by one op of the active step
    ///
    /// Called once per UI tick; does nothing once the frame is frozen.
    pub fn tick(&mut self) {
        if self.frozen {
            return;
        }
        let Some(step) = self.active_step.and_then(|i| self.steps.get(i)) else {
            return;
        };
        if self.revealed < step.drawing_instructions.len() {
            self.revealed += 1;
        }
    }

    /// Everything currently visible: committed marks, then the active reveal
    pub fn marks(&self) -> impl Iterator<Item = &DrawOp> {
        let active = self
            .active_step
            .and_then(|i| self.steps.get(i))
            .map(|step| &step.drawing_instructions[..self.revealed.min(step.drawing_instructions.len())])
            .unwrap_or(&[]);
        self.committed.iter().chain(active.iter())
    }

    pub fn is_blank(&self) -> bool {
        self.marks().next().is_none()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn commit_through(&mut self, end: usize) {
        while self.committed_steps < end {
            if let Some(step) = self.steps.get(self.committed_steps) {
                self.committed.extend(step.drawing_instructions.iter().cloned());
            }
            self.committed_steps += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::Point;

    fn op() -> DrawOp {
        DrawOp::Line {
            from: Point::new(0.0, 0.0),
            to: Point::new(10.0, 10.0),
        }
    }

    fn steps() -> Arc<Vec<Step>> {
        Arc::new(vec![
            Step::new("a", vec![op(), op()]),
            Step::new("b", vec![op(), op(), op()]),
            Step::new("c", vec![op()]),
        ])
    }

    fn drawing(index: usize, generation: u64) -> PlaybackSnapshot {
        PlaybackSnapshot {
            status: Status::Drawing,
            steps: steps(),
            current_step: Some(index),
            generation,
            ..PlaybackSnapshot::default()
        }
    }

    #[test]
    fn test_reveal_is_incremental_and_capped() {
        let mut sketch = Sketch::new();
        sketch.sync(&drawing(0, 1));
        assert!(sketch.is_blank());

        sketch.tick();
        assert_eq!(sketch.marks().count(), 1);
        sketch.tick();
        sketch.tick();
        sketch.tick();
        // Step 0 only has two ops
        assert_eq!(sketch.marks().count(), 2);
    }

    #[test]
    fn test_marks_accumulate_across_steps() {
        let mut sketch = Sketch::new();
        sketch.sync(&drawing(0, 1));
        sketch.tick();

        // Playhead moves to step 1: step 0 commits in full
        sketch.sync(&drawing(1, 1));
        assert_eq!(sketch.marks().count(), 2);
        sketch.tick();
        assert_eq!(sketch.marks().count(), 3);
    }

    #[test]
    fn test_skipped_steps_commit_in_full() {
        let mut sketch = Sketch::new();
        // Playhead lands on step 2 without visiting 0 and 1
        sketch.sync(&drawing(2, 1));
        assert_eq!(sketch.marks().count(), 5);
    }

    #[test]
    fn test_generation_change_wipes_the_board() {
        let mut sketch = Sketch::new();
        sketch.sync(&drawing(2, 1));
        assert!(!sketch.is_blank());

        sketch.sync(&drawing(0, 2));
        assert!(sketch.is_blank());
        assert_eq!(sketch.generation(), 2);
    }

    #[test]
    fn test_done_commits_everything_and_freezes() {
        let mut sketch = Sketch::new();
        sketch.sync(&drawing(1, 1));
        sketch.sync(&PlaybackSnapshot {
            status: Status::Done,
            steps: steps(),
            generation: 1,
            ..PlaybackSnapshot::default()
        });
        assert_eq!(sketch.marks().count(), 6);

        // Frozen: ticks change nothing
        sketch.tick();
        assert_eq!(sketch.marks().count(), 6);
    }

    #[test]
    fn test_blank_statuses_draw_nothing() {
        let mut sketch = Sketch::new();
        for status in [Status::Idle, Status::Thinking, Status::Error] {
            sketch.sync(&PlaybackSnapshot {
                status,
                generation: 1,
                ..PlaybackSnapshot::default()
            });
            sketch.tick();
            assert!(sketch.is_blank());
        }
    }
}
