use serde::{Deserialize, Serialize};
use std::fmt;

/// Идентификатор процесса, выданный платформой
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pid(pub i32);

impl Pid {
    #[cfg(any(test, target_os = "macos"))]
    pub fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Запущенное приложение в том виде, в каком его перечисляет платформа
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunningApp {
    pub pid: Pid,
    pub name: String,
}

impl RunningApp {
    pub fn new(pid: i32, name: impl Into<String>) -> Self {
        Self {
            pid: Pid(pid),
            name: name.into(),
        }
    }

    /// Точное, регистрозависимое сравнение отображаемого имени
    pub fn matches(&self, identifier: &str) -> bool {
        self.name == identifier
    }
}

impl fmt::Display for RunningApp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (PID {})", self.name, self.pid)
    }
}

/// Итог одного вызова open-or-focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusOutcome {
    AppOpened,
    AppFocused,
    AppNotFound,
    Failed,
}

impl fmt::Display for FocusOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FocusOutcome::AppOpened => "AppOpened",
            FocusOutcome::AppFocused => "AppFocused",
            FocusOutcome::AppNotFound => "AppNotFound",
            FocusOutcome::Failed => "Failed",
        };
        write!(f, "{}", name)
    }
}
