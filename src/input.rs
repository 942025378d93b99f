//! Keyboard sampling.
//!
//! Instead of acting on each key event individually, `KeyTracker` records the
//! frame of the last press/repeat event for every key.  Each frame the keys
//! that are still "fresh" (within `HOLD_WINDOW` frames) become the player's
//! intent, which lets Space and the arrows be held together.
//!
//! Works on two classes of terminal:
//! * **Keyboard-enhancement capable** (Ghostty, kitty, etc.): proper
//!   `Press` / `Repeat` / `Release` events → keys are removed on release.
//! * **Classic terminals**: only `Press` events (OS key-repeat shows as
//!   repeated `Press`).  Keys expire after `HOLD_WINDOW` frames of silence.

use std::collections::HashMap;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  At 60 FPS that is ≈133 ms, longer than the usual OS
/// key-repeat interval.
pub const HOLD_WINDOW: u64 = 8;

/// What the player wants to do this tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

#[derive(Debug, Default)]
pub struct KeyTracker {
    /// Each held key → the frame it was last seen (press or repeat).
    key_frame: HashMap<KeyCode, u64>,
    quit: bool,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one terminal event observed during `frame`.
    pub fn record(&mut self, event: &Event, frame: u64) {
        let Event::Key(KeyEvent {
            code,
            kind,
            modifiers,
            ..
        }) = event
        else {
            return;
        };

        match kind {
            KeyEventKind::Press => {
                match code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.quit = true,
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        self.quit = true
                    }
                    _ => {}
                }
                self.key_frame.insert(*code, frame);
            }
            KeyEventKind::Repeat => {
                self.key_frame.insert(*code, frame);
            }
            KeyEventKind::Release => {
                self.key_frame.remove(code);
            }
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    fn is_held(&self, key: &KeyCode, frame: u64) -> bool {
        self.key_frame
            .get(key)
            .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    fn any_held(&self, keys: &[KeyCode], frame: u64) -> bool {
        keys.iter().any(|k| self.is_held(k, frame))
    }

    /// Latest held-key state as of `frame`.
    pub fn sample(&self, frame: u64) -> InputState {
        use KeyCode::{Char, Down, Left, Right, Up};
        InputState {
            up: self.any_held(&[Up, Char('w'), Char('W')], frame),
            down: self.any_held(&[Down, Char('s'), Char('S')], frame),
            left: self.any_held(&[Left, Char('a'), Char('A')], frame),
            right: self.any_held(&[Right, Char('d'), Char('D')], frame),
            fire: self.any_held(&[Char(' ')], frame),
        }
    }
}
