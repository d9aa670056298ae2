//! Записывающая платформа для тестов: хранит сценарий и журнал всех вызовов.

use crate::error::{MacFocusError, Result};
use crate::events::{Pid, RunningApp, VirtualKeyEvent};
use parking_lot::Mutex;
use std::collections::HashMap;
use tokio::time::Instant;

use super::r#trait::Platform;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformCall {
    IsTrusted,
    OpenSettings,
    PostKey(VirtualKeyEvent),
    Launch(String),
    RunningApps,
    FrontmostPid,
    Activate(Pid),
    WindowCount(Pid),
    MenuAction(Pid, String),
}

impl PlatformCall {
    /// Вызовы, которые меняют состояние системы
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            PlatformCall::PostKey(_) | PlatformCall::Activate(_) | PlatformCall::MenuAction(..)
        )
    }
}

#[derive(Default)]
pub struct FakePlatform {
    pub trusted: bool,
    pub apps: Vec<RunningApp>,
    pub frontmost: Option<Pid>,
    /// None означает сбой запроса окон
    pub windows: HashMap<Pid, Option<usize>>,
    pub reject_menu_action: bool,
    calls: Mutex<Vec<(Instant, PlatformCall)>>,
}

impl FakePlatform {
    pub fn new() -> Self {
        Self {
            trusted: true,
            ..Self::default()
        }
    }

    pub fn with_app(mut self, pid: i32, name: &str, windows: Option<usize>) -> Self {
        self.apps.push(RunningApp::new(pid, name));
        self.windows.insert(Pid(pid), windows);
        self
    }

    pub fn with_frontmost(mut self, pid: i32) -> Self {
        self.frontmost = Some(Pid(pid));
        self
    }

    pub fn untrusted(mut self) -> Self {
        self.trusted = false;
        self
    }

    pub fn rejecting_menu_actions(mut self) -> Self {
        self.reject_menu_action = true;
        self
    }

    pub fn calls(&self) -> Vec<PlatformCall> {
        self.calls.lock().iter().map(|(_, call)| call.clone()).collect()
    }

    pub fn timed_calls(&self) -> Vec<(Instant, PlatformCall)> {
        self.calls.lock().clone()
    }

    pub fn key_events(&self) -> Vec<VirtualKeyEvent> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                PlatformCall::PostKey(event) => Some(event),
                _ => None,
            })
            .collect()
    }

    pub fn mutations(&self) -> Vec<PlatformCall> {
        self.calls().into_iter().filter(|c| c.is_mutation()).collect()
    }

    fn record(&self, call: PlatformCall) {
        self.calls.lock().push((Instant::now(), call));
    }
}

impl Platform for FakePlatform {
    fn is_process_trusted(&self) -> bool {
        self.record(PlatformCall::IsTrusted);
        self.trusted
    }

    fn open_accessibility_settings(&self) -> Result<()> {
        self.record(PlatformCall::OpenSettings);
        Ok(())
    }

    fn post_key_event(&self, event: &VirtualKeyEvent) -> Result<()> {
        self.record(PlatformCall::PostKey(event.clone()));
        Ok(())
    }

    fn launch_application(&self, identifier: &str) -> Result<()> {
        self.record(PlatformCall::Launch(identifier.to_string()));
        if identifier.starts_with('/') {
            Ok(())
        } else {
            MacFocusError::query_failed(format!("LSOpen status -10814 для '{}'", identifier))
        }
    }

    fn running_applications(&self) -> Result<Vec<RunningApp>> {
        self.record(PlatformCall::RunningApps);
        Ok(self.apps.clone())
    }

    fn frontmost_pid(&self) -> Option<Pid> {
        self.record(PlatformCall::FrontmostPid);
        self.frontmost
    }

    fn activate(&self, pid: Pid) -> Result<()> {
        self.record(PlatformCall::Activate(pid));
        Ok(())
    }

    fn window_count(&self, pid: Pid) -> Result<usize> {
        self.record(PlatformCall::WindowCount(pid));
        match self.windows.get(&pid).copied().flatten() {
            Some(count) => Ok(count),
            None => MacFocusError::query_failed(format!("AXError -25204 для PID {}", pid)),
        }
    }

    fn perform_menu_bar_action(&self, pid: Pid, action: &str) -> Result<()> {
        self.record(PlatformCall::MenuAction(pid, action.to_string()));
        if self.reject_menu_action {
            Err(MacFocusError::ActionRejected {
                action: action.to_string(),
                code: -25206,
            })
        } else {
            Ok(())
        }
    }
}
