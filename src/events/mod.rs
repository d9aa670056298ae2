pub mod app;
pub mod keyboard;

pub use app::{FocusOutcome, Pid, RunningApp};
pub use keyboard::{KeyChord, KeyCode, KeyState, Modifiers};

/// События для инъекции в системный поток ввода
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualKeyEvent {
    pub key_code: KeyCode,
    pub state: KeyState,
    pub modifiers: Modifiers,
}

impl VirtualKeyEvent {
    pub fn new(key_code: KeyCode, state: KeyState, modifiers: Modifiers) -> Self {
        Self {
            key_code,
            state,
            modifiers,
        }
    }

    pub fn press(chord: KeyChord) -> Self {
        Self::new(chord.key_code, KeyState::Pressed, chord.modifiers)
    }

    pub fn release(chord: KeyChord) -> Self {
        Self::new(chord.key_code, KeyState::Released, chord.modifiers)
    }

    pub fn is_key_down(&self) -> bool {
        self.state == KeyState::Pressed
    }
}
