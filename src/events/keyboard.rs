use serde::{Deserialize, Serialize};
use std::fmt;

/// Состояние клавиши
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Код клавиши (виртуальные коды macOS, kVK_*)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyCode(pub u16);

impl KeyCode {
    pub fn new(code: u16) -> Self {
        Self(code)
    }

    pub fn value(&self) -> u16 {
        self.0
    }

    /// Код, сдвинутый на `offset` позиций от текущего
    pub fn offset(&self, offset: u16) -> Self {
        Self(self.0 + offset)
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "kVK_0x{:02X}", self.0)
    }
}

// Биты CGEventFlags
pub const FLAG_MASK_SHIFT: u64 = 0x0002_0000;
pub const FLAG_MASK_CONTROL: u64 = 0x0004_0000;
pub const FLAG_MASK_ALTERNATE: u64 = 0x0008_0000;
pub const FLAG_MASK_COMMAND: u64 = 0x0010_0000;

/// Модификаторы клавиш
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub cmd: bool,
}

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ctrl(mut self, ctrl: bool) -> Self {
        self.ctrl = ctrl;
        self
    }

    #[cfg(test)]
    pub fn with_alt(mut self, alt: bool) -> Self {
        self.alt = alt;
        self
    }

    #[cfg(test)]
    pub fn with_shift(mut self, shift: bool) -> Self {
        self.shift = shift;
        self
    }

    pub fn with_cmd(mut self, cmd: bool) -> Self {
        self.cmd = cmd;
        self
    }

    pub fn is_empty(&self) -> bool {
        !self.ctrl && !self.alt && !self.shift && !self.cmd
    }

    /// Маска флагов для CGEventSetFlags
    pub fn event_flags(&self) -> u64 {
        let mut flags = 0;
        if self.shift { flags |= FLAG_MASK_SHIFT; }
        if self.ctrl { flags |= FLAG_MASK_CONTROL; }
        if self.alt { flags |= FLAG_MASK_ALTERNATE; }
        if self.cmd { flags |= FLAG_MASK_COMMAND; }
        flags
    }

    pub fn to_vec(&self) -> Vec<String> {
        let mut result = Vec::new();
        if self.ctrl { result.push("ctrl".to_string()); }
        if self.alt { result.push("alt".to_string()); }
        if self.shift { result.push("shift".to_string()); }
        if self.cmd { result.push("cmd".to_string()); }
        result
    }

    /// Разобрать список имён модификаторов; неизвестное имя возвращается как ошибка
    pub fn from_names(modifiers: &[String]) -> Result<Self, String> {
        let mut result = Self::new();
        for modifier in modifiers {
            match modifier.to_lowercase().as_str() {
                "ctrl" | "control" => result.ctrl = true,
                "alt" | "option" => result.alt = true,
                "shift" => result.shift = true,
                "cmd" | "command" => result.cmd = true,
                _ => return Err(format!("Unknown modifier: {}", modifier)),
            }
        }
        Ok(result)
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let modifiers = self.to_vec();
        if modifiers.is_empty() {
            write!(f, "none")
        } else {
            write!(f, "{}", modifiers.join("+"))
        }
    }
}

/// Аккорд: код клавиши плюс набор модификаторов, нажимается и отпускается целиком
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyChord {
    pub key_code: KeyCode,
    pub modifiers: Modifiers,
}

impl KeyChord {
    pub fn new(key_code: KeyCode, modifiers: Modifiers) -> Self {
        Self { key_code, modifiers }
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.is_empty() {
            write!(f, "{}", self.key_code)
        } else {
            write!(f, "{}+{}", self.modifiers, self.key_code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifiers_creation() {
        let modifiers = Modifiers::new()
            .with_ctrl(true)
            .with_shift(true);

        assert!(modifiers.ctrl);
        assert!(modifiers.shift);
        assert!(!modifiers.alt);
        assert!(!modifiers.cmd);
        assert!(!modifiers.is_empty());
    }

    #[test]
    fn test_event_flags() {
        assert_eq!(Modifiers::new().event_flags(), 0);
        assert_eq!(Modifiers::new().with_cmd(true).event_flags(), 0x0010_0000);
        assert_eq!(
            Modifiers::new().with_ctrl(true).with_alt(true).event_flags(),
            FLAG_MASK_CONTROL | FLAG_MASK_ALTERNATE
        );
    }

    #[test]
    fn test_modifiers_from_names() {
        let names = vec!["Command".to_string(), "ctrl".to_string()];
        let modifiers = Modifiers::from_names(&names).unwrap();
        assert_eq!(modifiers, Modifiers::new().with_cmd(true).with_ctrl(true));
        assert_eq!(modifiers.to_vec(), vec!["ctrl", "cmd"]);

        assert!(Modifiers::from_names(&["hyper".to_string()]).is_err());
    }

    #[test]
    fn test_chord_display() {
        let chord = KeyChord::new(KeyCode::new(0x32), Modifiers::new().with_cmd(true));
        assert_eq!(chord.to_string(), "cmd+kVK_0x32");

        let bare = KeyChord::new(KeyCode::new(0x12), Modifiers::new());
        assert_eq!(bare.to_string(), "kVK_0x12");
    }
}
