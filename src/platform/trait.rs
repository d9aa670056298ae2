use crate::error::Result;
use crate::events::{Pid, RunningApp, VirtualKeyEvent};
use std::sync::Arc;

/// Внешние возможности ОС, которыми управляет утилита.
///
/// Все вызовы синхронные и блокирующие: каждый выполняется ровно один раз,
/// без повторов и таймаутов.
pub trait Platform: Send + Sync {
    /// Выдано ли процессу разрешение Accessibility
    fn is_process_trusted(&self) -> bool;

    /// Открыть раздел Accessibility в системных настройках
    fn open_accessibility_settings(&self) -> Result<()>;

    /// Отправить одно событие клавиатуры на уровне HID
    fn post_key_event(&self, event: &VirtualKeyEvent) -> Result<()>;

    /// Запустить приложение (или найти уже запущенное) по пути или bundle id
    fn launch_application(&self, identifier: &str) -> Result<()>;

    /// Запущенные приложения в порядке перечисления платформы
    fn running_applications(&self) -> Result<Vec<RunningApp>>;

    /// PID процесса, получающего ввод с клавиатуры
    fn frontmost_pid(&self) -> Option<Pid>;

    /// Вывести процесс на передний план (только его переднее окно)
    fn activate(&self, pid: Pid) -> Result<()>;

    /// Число окон верхнего уровня процесса по данным Accessibility
    fn window_count(&self, pid: Pid) -> Result<usize>;

    /// Выполнить действие с точным заголовком на строке меню процесса
    fn perform_menu_bar_action(&self, pid: Pid, action: &str) -> Result<()>;
}

/// Factory function to create an appropriate platform backend based on the dry_run flag
pub fn create_platform(dry_run: bool) -> Result<Arc<dyn Platform>> {
    if dry_run {
        return Ok(Arc::new(super::dry_run::DryRunPlatform::new()));
    }

    #[cfg(target_os = "macos")]
    {
        Ok(Arc::new(super::macos::MacosPlatform::new()))
    }

    #[cfg(not(target_os = "macos"))]
    {
        Err(crate::error::MacFocusError::UnsupportedPlatform(format!(
            "{} (доступен только режим --dry-run)",
            std::env::consts::OS
        )))
    }
}
