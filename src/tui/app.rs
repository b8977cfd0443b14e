//! TUI application - input handling and per-frame state
//!
//! The App owns the prompt box, the latest playback snapshot and the sketch.
//! It does no rendering (that's the views module) and no playback mutation:
//! submitted prompts and replay requests are queued here and drained by the
//! runner, which owns the playback handle.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::playback::{PlaybackSnapshot, Status};
use crate::render::Sketch;

/// TUI application state
#[derive(Debug, Default)]
pub struct App {
    /// Prompt box contents
    input: String,
    /// Latest observed playback snapshot
    snapshot: PlaybackSnapshot,
    /// Marks on the board
    sketch: Sketch,
    should_quit: bool,
    pending_prompt: Option<String>,
    pending_repeat: bool,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) | (KeyCode::Esc, _) => {
                self.should_quit = true;
            }
            (KeyCode::Char('r'), KeyModifiers::CONTROL) => {
                self.pending_repeat = true;
            }
            // Plain `r` replays from the done screen; with text in the box
            // it falls through to typing below
            (KeyCode::Char('r'), KeyModifiers::NONE)
                if self.input.is_empty() && self.snapshot.status == Status::Done =>
            {
                self.pending_repeat = true;
            }
            (KeyCode::Enter, _) => {
                // Keep the typed prompt while playback is busy; the
                // orchestrator would drop the submit anyway
                if self.snapshot.status.is_busy() {
                    return;
                }
                let prompt = self.input.trim().to_string();
                if !prompt.is_empty() {
                    self.pending_prompt = Some(prompt);
                    self.input.clear();
                }
            }
            (KeyCode::Backspace, _) => {
                self.input.pop();
            }
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                self.input.push(c);
            }
            _ => {}
        }
    }

    /// Fold a new playback snapshot into the sketch
    pub fn observe(&mut self, snapshot: PlaybackSnapshot) {
        self.sketch.sync(&snapshot);
        self.snapshot = snapshot;
    }

    /// Per-frame update: advances the reveal animation
    pub fn tick(&mut self) {
        self.sketch.tick();
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn snapshot(&self) -> &PlaybackSnapshot {
        &self.snapshot
    }

    pub fn sketch(&self) -> &Sketch {
        &self.sketch
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Prompt submitted since the last drain, if any
    pub fn take_pending_prompt(&mut self) -> Option<String> {
        self.pending_prompt.take()
    }

    /// Whether a replay was requested since the last drain
    pub fn take_pending_repeat(&mut self) -> bool {
        std::mem::take(&mut self.pending_repeat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_typing_builds_the_prompt() {
        let mut app = App::new();
        for c in "hi".chars() {
            app.handle_key(press(KeyCode::Char(c)));
        }
        assert_eq!(app.input(), "hi");
        app.handle_key(press(KeyCode::Backspace));
        assert_eq!(app.input(), "h");
    }

    #[test]
    fn test_enter_queues_the_prompt() {
        let mut app = App::new();
        for c in " siphon ".chars() {
            app.handle_key(press(KeyCode::Char(c)));
        }
        app.handle_key(press(KeyCode::Enter));
        assert_eq!(app.take_pending_prompt(), Some("siphon".to_string()));
        assert_eq!(app.input(), "");
        // Drained
        assert_eq!(app.take_pending_prompt(), None);
    }

    #[test]
    fn test_enter_on_blank_input_queues_nothing() {
        let mut app = App::new();
        app.handle_key(press(KeyCode::Char(' ')));
        app.handle_key(press(KeyCode::Enter));
        assert_eq!(app.take_pending_prompt(), None);
    }

    #[test]
    fn test_ctrl_r_queues_replay_and_keeps_input() {
        let mut app = App::new();
        app.handle_key(press(KeyCode::Char('r')));
        assert!(!app.take_pending_repeat());
        app.handle_key(ctrl('r'));
        assert!(app.take_pending_repeat());
        assert!(!app.take_pending_repeat());
        assert_eq!(app.input(), "r");
    }

    #[test]
    fn test_enter_while_busy_keeps_the_prompt() {
        let mut app = App::new();
        app.observe(PlaybackSnapshot {
            status: Status::Thinking,
            ..PlaybackSnapshot::default()
        });
        for c in "osmosis".chars() {
            app.handle_key(press(KeyCode::Char(c)));
        }
        app.handle_key(press(KeyCode::Enter));
        // Nothing queued and nothing lost
        assert_eq!(app.take_pending_prompt(), None);
        assert_eq!(app.input(), "osmosis");

        // Once playback settles, the same Enter goes through
        app.observe(PlaybackSnapshot {
            status: Status::Done,
            ..PlaybackSnapshot::default()
        });
        app.handle_key(press(KeyCode::Enter));
        assert_eq!(app.take_pending_prompt(), Some("osmosis".to_string()));
        assert_eq!(app.input(), "");
    }

    #[test]
    fn test_plain_r_replays_only_from_the_done_screen() {
        let mut app = App::new();
        // Idle: `r` is just a character
        app.handle_key(press(KeyCode::Char('r')));
        assert!(!app.take_pending_repeat());
        assert_eq!(app.input(), "r");
        app.handle_key(press(KeyCode::Backspace));

        app.observe(PlaybackSnapshot {
            status: Status::Done,
            ..PlaybackSnapshot::default()
        });
        app.handle_key(press(KeyCode::Char('r')));
        assert!(app.take_pending_repeat());
        assert_eq!(app.input(), "");

        // With text in the box it types even when done
        app.handle_key(press(KeyCode::Char('d')));
        app.handle_key(press(KeyCode::Char('r')));
        assert!(!app.take_pending_repeat());
        assert_eq!(app.input(), "dr");
    }

    #[test]
    fn test_quit_keys() {
        let mut app = App::new();
        assert!(!app.should_quit());
        app.handle_key(press(KeyCode::Esc));
        assert!(app.should_quit());

        let mut app = App::new();
        app.handle_key(ctrl('c'));
        assert!(app.should_quit());
    }
}
