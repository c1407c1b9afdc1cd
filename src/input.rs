/// Keyboard handling: mapping terminal key events to game keys and
/// emulating "key held" state on top of a press/repeat event stream.
///
/// Terminals that report releases (keyboard enhancement) keep a key held
/// until its `Release` arrives.  Plain terminals only ever send `Press`
/// events, with OS auto-repeat showing up as more presses after an initial
/// delay.  There a freshly pressed key stays held for `REPEAT_DELAY_FRAMES`
/// so the gap before the first auto-repeat is bridged; once repeats flow
/// it expires `HOLD_WINDOW_FRAMES` after the last one.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// 8 frames @ 60 FPS ≈ 133 ms, longer than a typical auto-repeat interval.
pub const HOLD_WINDOW_FRAMES: u64 = 8;

/// 40 frames @ 60 FPS ≈ 667 ms, longer than a typical auto-repeat delay.
pub const REPEAT_DELAY_FRAMES: u64 = 40;

/// Snapshot of the movement keys for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameKey {
    Left,
    Right,
    Escape,
    /// Ctrl+C, the terminal's equivalent of closing the window.
    Interrupt,
    Other,
}

impl GameKey {
    pub fn from_event(event: &KeyEvent) -> GameKey {
        match event.code {
            KeyCode::Char('c') | KeyCode::Char('C')
                if event.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                GameKey::Interrupt
            }
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => GameKey::Left,
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => GameKey::Right,
            KeyCode::Esc => GameKey::Escape,
            _ => GameKey::Other,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct KeyState {
    last_seen: u64,
    /// Auto-repeat has started for this key.
    repeating: bool,
}

/// Remembers the frame each key was last seen pressed or repeating.
#[derive(Debug)]
pub struct KeyTracker {
    keys: HashMap<KeyCode, KeyState>,
    /// Only a `Release` event drops a key.
    releases_reported: bool,
}

impl KeyTracker {
    pub fn new(releases_reported: bool) -> Self {
        KeyTracker {
            keys: HashMap::new(),
            releases_reported,
        }
    }

    /// Record one key event observed during `frame`.
    ///
    /// Returns `true` only for a fresh key-down: a `Press` of a key that is
    /// not already held.  Presses of a held key are auto-repeats.
    pub fn record(&mut self, event: &KeyEvent, frame: u64) -> bool {
        match event.kind {
            KeyEventKind::Press => {
                let fresh = !self.is_held(&event.code, frame);
                self.keys.insert(
                    event.code,
                    KeyState {
                        last_seen: frame,
                        repeating: !fresh,
                    },
                );
                fresh
            }
            KeyEventKind::Repeat => {
                self.keys.insert(
                    event.code,
                    KeyState {
                        last_seen: frame,
                        repeating: true,
                    },
                );
                false
            }
            KeyEventKind::Release => {
                self.keys.remove(&event.code);
                false
            }
        }
    }

    fn alive(&self, state: &KeyState, frame: u64) -> bool {
        if self.releases_reported {
            return true;
        }
        let window = if state.repeating {
            HOLD_WINDOW_FRAMES
        } else {
            REPEAT_DELAY_FRAMES
        };
        frame.saturating_sub(state.last_seen) <= window
    }

    pub fn is_held(&self, key: &KeyCode, frame: u64) -> bool {
        self.keys
            .get(key)
            .map(|state| self.alive(state, frame))
            .unwrap_or(false)
    }

    pub fn controls(&self, frame: u64) -> Controls {
        let any_held = |keys: &[KeyCode]| keys.iter().any(|k| self.is_held(k, frame));
        Controls {
            left: any_held(&[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')]),
            right: any_held(&[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')]),
        }
    }

    /// Forget keys that no longer count as held.
    pub fn expire(&mut self, frame: u64) {
        if self.releases_reported {
            return;
        }
        let stale: Vec<KeyCode> = self
            .keys
            .iter()
            .filter(|(_, state)| !self.alive(state, frame))
            .map(|(&code, _)| code)
            .collect();
        for code in stale {
            self.keys.remove(&code);
        }
    }
}
