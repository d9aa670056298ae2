//! Решение «запустить, вывести вперёд или создать окно» для одного приложения.

use crate::error::Result;
use crate::events::{FocusOutcome, Pid, RunningApp};
use crate::platform::Platform;
use crate::trace_if_enabled;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct FocusController {
    platform: Arc<dyn Platform>,
    new_window_action: String,
}

impl FocusController {
    pub fn new(platform: Arc<dyn Platform>, new_window_action: impl Into<String>) -> Self {
        Self {
            platform,
            new_window_action: new_window_action.into(),
        }
    }

    /// Открыть приложение или вывести его на передний план.
    ///
    /// Разрешение Accessibility должно быть проверено до вызова.
    pub fn open_or_focus(&self, app_identifier: &str) -> FocusOutcome {
        // Ошибка запуска не фатальна: она проявится при поиске процесса
        match self.platform.launch_application(app_identifier) {
            Ok(()) => debug!("DEBUG: запуск '{}' принят платформой", app_identifier),
            Err(e) => debug!("DEBUG: запуск '{}' не удался: {}", app_identifier, e),
        }

        let target = match self.find_process(app_identifier) {
            Ok(Some(app)) => app,
            Ok(None) => {
                debug!("DEBUG: App found: No");
                return FocusOutcome::AppNotFound;
            }
            Err(e) => {
                warn!("Не удалось перечислить процессы: {}", e);
                return FocusOutcome::Failed;
            }
        };
        debug!("DEBUG: App found: Yes, PID: {}", target.pid);

        let window_count = match self.platform.window_count(target.pid) {
            Ok(count) => count,
            Err(e) => {
                warn!("Failed to get windows for {}: {}", target, e);
                return FocusOutcome::Failed;
            }
        };
        debug!("DEBUG: Window count: {}", window_count);

        if window_count == 0 {
            debug!("DEBUG: Creating new window");
            // Неудача только сообщается, вызывающий не прерывается
            if let Err(e) = self.create_new_window(target.pid) {
                warn!("Failed to create new window: {}", e);
            }
            return FocusOutcome::AppOpened;
        }

        let front = self.platform.frontmost_pid();
        debug!(
            "DEBUG: Front app PID: {}",
            front.map(|pid| pid.to_string()).unwrap_or_else(|| "none".to_string())
        );

        if front != Some(target.pid) {
            debug!("DEBUG: Bringing app to front");
            if let Err(e) = self.platform.activate(target.pid) {
                warn!("Не удалось вывести {} на передний план: {}", target, e);
            }
        } else {
            // Уже впереди и с окнами: ничего не делаем, переключение окон это отдельная команда
            debug!("DEBUG: {} уже на переднем плане", target);
        }

        info!("Action completed for {}", target);
        FocusOutcome::AppFocused
    }

    /// Вызвать пункт меню «New Window» у процесса `pid`
    pub fn create_new_window(&self, pid: Pid) -> Result<()> {
        self.platform
            .perform_menu_bar_action(pid, &self.new_window_action)?;
        info!("Successfully created a new window");
        Ok(())
    }

    /// Первый процесс, чьё имя точно совпадает с идентификатором.
    /// Порядок перечисления задаёт платформа; других правил выбора нет.
    fn find_process(&self, app_identifier: &str) -> Result<Option<RunningApp>> {
        let apps = self.platform.running_applications()?;
        Ok(apps.into_iter().find(|app| {
            trace_if_enabled!("Сравнение '{}' с '{}'", app.name, app_identifier);
            app.matches(app_identifier)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MacFocusError;
    use crate::platform::fake::{FakePlatform, PlatformCall};

    fn controller(platform: &Arc<FakePlatform>) -> FocusController {
        FocusController::new(platform.clone(), "New Window")
    }

    #[test]
    fn test_no_matching_process_is_not_found() {
        let platform = Arc::new(
            FakePlatform::new()
                .with_app(10, "safari", Some(1))
                .with_app(11, "Safari Technology Preview", Some(1)),
        );

        let outcome = controller(&platform).open_or_focus("Safari");

        assert_eq!(outcome, FocusOutcome::AppNotFound);
        assert!(platform.mutations().is_empty());
        assert!(!platform
            .calls()
            .iter()
            .any(|call| matches!(call, PlatformCall::WindowCount(_))));
    }

    #[test]
    fn test_launch_is_requested_first() {
        let platform = Arc::new(FakePlatform::new());
        controller(&platform).open_or_focus("/Applications/Mail.app");

        assert_eq!(
            platform.calls()[0],
            PlatformCall::Launch("/Applications/Mail.app".to_string())
        );
    }

    #[test]
    fn test_zero_windows_creates_exactly_one_window() {
        let platform = Arc::new(
            FakePlatform::new()
                .with_app(20, "Mail", Some(0))
                .with_frontmost(1),
        );

        let outcome = controller(&platform).open_or_focus("Mail");

        assert_eq!(outcome, FocusOutcome::AppOpened);
        assert_eq!(
            platform.mutations(),
            vec![PlatformCall::MenuAction(Pid(20), "New Window".to_string())]
        );
    }

    #[test]
    fn test_rejected_new_window_still_opened() {
        let platform = Arc::new(
            FakePlatform::new()
                .with_app(20, "Mail", Some(0))
                .rejecting_menu_actions(),
        );

        assert_eq!(controller(&platform).open_or_focus("Mail"), FocusOutcome::AppOpened);
        assert_eq!(platform.mutations().len(), 1);
    }

    #[test]
    fn test_background_app_is_activated() {
        let platform = Arc::new(
            FakePlatform::new()
                .with_app(30, "Safari", Some(2))
                .with_frontmost(1),
        );

        let outcome = controller(&platform).open_or_focus("Safari");

        assert_eq!(outcome, FocusOutcome::AppFocused);
        assert_eq!(platform.mutations(), vec![PlatformCall::Activate(Pid(30))]);
    }

    #[test]
    fn test_frontmost_app_with_windows_is_noop() {
        let platform = Arc::new(
            FakePlatform::new()
                .with_app(30, "Safari", Some(3))
                .with_frontmost(30),
        );

        let outcome = controller(&platform).open_or_focus("Safari");

        assert_eq!(outcome, FocusOutcome::AppFocused);
        assert!(platform.mutations().is_empty());
    }

    #[test]
    fn test_window_query_failure_is_failed() {
        let platform = Arc::new(FakePlatform::new().with_app(40, "Notes", None));

        let outcome = controller(&platform).open_or_focus("Notes");

        assert_eq!(outcome, FocusOutcome::Failed);
        assert!(platform.mutations().is_empty());
    }

    #[test]
    fn test_first_match_in_enumeration_order_wins() {
        let platform = Arc::new(
            FakePlatform::new()
                .with_app(50, "Terminal", Some(0))
                .with_app(51, "Terminal", Some(4)),
        );

        let outcome = controller(&platform).open_or_focus("Terminal");

        assert_eq!(outcome, FocusOutcome::AppOpened);
        assert_eq!(
            platform.mutations(),
            vec![PlatformCall::MenuAction(Pid(50), "New Window".to_string())]
        );
    }

    #[test]
    fn test_create_new_window_reports_rejection() {
        let platform = Arc::new(FakePlatform::new().rejecting_menu_actions());

        let result = controller(&platform).create_new_window(Pid(7));

        assert!(matches!(
            result,
            Err(MacFocusError::ActionRejected { ref action, .. }) if action == "New Window"
        ));
    }
}
