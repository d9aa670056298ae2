use crate::error::Result;
use crate::events::{Pid, RunningApp, VirtualKeyEvent};
use crate::macfocus_error;
use parking_lot::RwLock;
use tracing::info;

use super::r#trait::Platform;

/// Эмулируемое приложение: имя, PID и число окон
struct FakeApp {
    app: RunningApp,
    windows: usize,
}

/// Платформа для режима --dry-run: ничего не меняет в системе, только логирует
pub struct DryRunPlatform {
    apps: Vec<FakeApp>,
    frontmost: RwLock<Option<Pid>>,
}

impl DryRunPlatform {
    pub fn new() -> Self {
        info!("Dry-run режим - платформа работает в режиме эмуляции");

        let apps = vec![
            FakeApp { app: RunningApp::new(101, "Finder"), windows: 2 },
            FakeApp { app: RunningApp::new(202, "Safari"), windows: 1 },
            FakeApp { app: RunningApp::new(303, "Mail"), windows: 0 },
        ];

        Self {
            apps,
            frontmost: RwLock::new(Some(Pid(101))),
        }
    }

    fn find(&self, pid: Pid) -> Result<&FakeApp> {
        self.apps
            .iter()
            .find(|fake| fake.app.pid == pid)
            .ok_or_else(|| macfocus_error!(query_failed, "[DRY RUN] нет процесса с PID {}", pid))
    }
}

impl Platform for DryRunPlatform {
    fn is_process_trusted(&self) -> bool {
        true
    }

    fn open_accessibility_settings(&self) -> Result<()> {
        info!("[DRY RUN] Открытие настроек Accessibility");
        Ok(())
    }

    fn post_key_event(&self, event: &VirtualKeyEvent) -> Result<()> {
        info!("[DRY RUN] Виртуальное событие: {:?}", event);
        Ok(())
    }

    fn launch_application(&self, identifier: &str) -> Result<()> {
        info!("[DRY RUN] Запуск приложения '{}'", identifier);
        Ok(())
    }

    fn running_applications(&self) -> Result<Vec<RunningApp>> {
        Ok(self.apps.iter().map(|fake| fake.app.clone()).collect())
    }

    fn frontmost_pid(&self) -> Option<Pid> {
        *self.frontmost.read()
    }

    fn activate(&self, pid: Pid) -> Result<()> {
        let fake = self.find(pid)?;
        info!("[DRY RUN] Вывод на передний план: {}", fake.app);
        *self.frontmost.write() = Some(pid);
        Ok(())
    }

    fn window_count(&self, pid: Pid) -> Result<usize> {
        Ok(self.find(pid)?.windows)
    }

    fn perform_menu_bar_action(&self, pid: Pid, action: &str) -> Result<()> {
        let fake = self.find(pid)?;
        info!("[DRY RUN] Действие меню '{}' для {}", action, fake.app);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activate_moves_frontmost() {
        let platform = DryRunPlatform::new();
        assert_eq!(platform.frontmost_pid(), Some(Pid(101)));

        platform.activate(Pid(202)).unwrap();
        assert_eq!(platform.frontmost_pid(), Some(Pid(202)));
    }

    #[test]
    fn test_unknown_pid_is_query_failure() {
        let platform = DryRunPlatform::new();
        assert!(platform.window_count(Pid(999)).is_err());
        assert!(platform.activate(Pid(999)).is_err());
        assert_eq!(platform.frontmost_pid(), Some(Pid(101)));
    }

    #[test]
    fn test_emulated_apps() {
        let platform = DryRunPlatform::new();
        let names: Vec<String> = platform
            .running_applications()
            .unwrap()
            .into_iter()
            .map(|app| app.name)
            .collect();

        assert_eq!(names, vec!["Finder", "Safari", "Mail"]);
        assert_eq!(platform.window_count(Pid(303)).unwrap(), 0);
    }
}
