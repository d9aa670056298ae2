use crate::error::{MacFocusError, Result};
use crate::platform::Platform;
use tracing::{info, warn};

/// Инструкция, которая печатается при отсутствии разрешения
pub const ACCESSIBILITY_INSTRUCTIONS: [&str; 3] = [
    "Error: This application doesn't have the required accessibility permissions.",
    "Please grant accessibility permissions to Terminal (or your development environment) in:",
    "System Settings > Privacy & Security > Accessibility",
];

/// Проверить разрешение Accessibility один раз перед выполнением команды.
///
/// Без разрешения печатает инструкцию, пытается открыть нужный раздел настроек
/// и возвращает `PermissionDenied`; завершение процесса остаётся за `main`.
pub fn check_permissions(platform: &dyn Platform) -> Result<()> {
    info!("Проверка прав доступа...");

    if platform.is_process_trusted() {
        info!("Разрешение Accessibility подтверждено");
        return Ok(());
    }

    for line in ACCESSIBILITY_INSTRUCTIONS {
        println!("{}", line);
    }

    if let Err(e) = platform.open_accessibility_settings() {
        warn!("Не удалось открыть настройки Accessibility: {}", e);
    }

    Err(MacFocusError::PermissionDenied)
}
