#![allow(unused_unsafe)]

use accessibility_sys::{
    kAXErrorSuccess, kAXMenuBarAttribute, kAXWindowsAttribute, AXError, AXIsProcessTrusted,
    AXUIElementCopyAttributeValue, AXUIElementCreateApplication, AXUIElementGetTypeID,
    AXUIElementPerformAction, AXUIElementRef,
};
use core_foundation::array::{CFArray, CFArrayRef};
use core_foundation::base::{CFGetTypeID, CFRelease, CFType, CFTypeID, CFTypeRef, TCFType};
use core_foundation::string::CFString;
use core_graphics::event::{CGEvent, CGEventFlags, CGEventTapLocation};
use core_graphics::event_source::{CGEventSource, CGEventSourceStateID};
use objc2_app_kit::{NSApplicationActivationOptions, NSRunningApplication, NSWorkspace};
use objc2_foundation::NSString;
use std::process::Command;
use tracing::debug;

use crate::error::{MacFocusError, Result};
use crate::events::{Pid, RunningApp, VirtualKeyEvent};
use crate::macfocus_error;

use super::r#trait::Platform;

const ACCESSIBILITY_SETTINGS_URL: &str =
    "x-apple.systempreferences:com.apple.preference.security?Privacy_Accessibility";

/// Владеющая ссылка на AXUIElement, освобождается в Drop
struct AxElement(AXUIElementRef);

impl AxElement {
    fn application(pid: Pid) -> Result<Self> {
        let element = unsafe { AXUIElementCreateApplication(pid.value()) };
        if element.is_null() {
            return MacFocusError::query_failed(format!(
                "Не удалось создать accessibility-элемент для PID {}",
                pid
            ));
        }
        Ok(Self(element))
    }

    /// Скопировать значение атрибута; вызывающий владеет результатом
    fn copy_attribute(&self, attribute: &'static str) -> std::result::Result<CFTypeRef, AXError> {
        let attribute = CFString::from_static_string(attribute);
        let mut value: CFTypeRef = std::ptr::null();
        let status = unsafe {
            AXUIElementCopyAttributeValue(self.0, attribute.as_concrete_TypeRef(), &mut value)
        };

        if status != kAXErrorSuccess {
            return Err(status);
        }
        if value.is_null() {
            return Err(accessibility_sys::kAXErrorNoValue);
        }
        Ok(value)
    }
}

/// Проверить тип значения атрибута; при несовпадении значение освобождается
fn expect_type(value: CFTypeRef, type_id: CFTypeID, what: &str) -> Result<CFTypeRef> {
    if unsafe { CFGetTypeID(value) } != type_id {
        unsafe { CFRelease(value) };
        return MacFocusError::query_failed(format!("{} имеет неожиданный тип", what));
    }
    Ok(value)
}

impl Drop for AxElement {
    fn drop(&mut self) {
        unsafe { CFRelease(self.0 as CFTypeRef) }
    }
}

pub struct MacosPlatform;

impl MacosPlatform {
    pub fn new() -> Self {
        Self
    }

    fn running_application(pid: Pid) -> Result<objc2::rc::Retained<NSRunningApplication>> {
        unsafe { NSRunningApplication::runningApplicationWithProcessIdentifier(pid.value()) }
            .ok_or_else(|| macfocus_error!(query_failed, "Нет запущенного приложения с PID {}", pid))
    }
}

impl Platform for MacosPlatform {
    fn is_process_trusted(&self) -> bool {
        unsafe { AXIsProcessTrusted() }
    }

    fn open_accessibility_settings(&self) -> Result<()> {
        let status = Command::new("open").arg(ACCESSIBILITY_SETTINGS_URL).status()?;
        if !status.success() {
            return MacFocusError::query_failed(format!("open завершился с кодом {}", status));
        }
        Ok(())
    }

    fn post_key_event(&self, event: &VirtualKeyEvent) -> Result<()> {
        let source = CGEventSource::new(CGEventSourceStateID::HIDSystemState)
            .map_err(|_| macfocus_error!(query_failed, "Не удалось создать CGEventSource"))?;

        let cg_event = CGEvent::new_keyboard_event(source, event.key_code.value(), event.is_key_down())
            .map_err(|_| macfocus_error!(query_failed, "Не удалось создать событие {}", event.key_code))?;

        if !event.modifiers.is_empty() {
            cg_event.set_flags(CGEventFlags::from_bits_truncate(event.modifiers.event_flags()));
        }

        cg_event.post(CGEventTapLocation::HID);
        Ok(())
    }

    fn launch_application(&self, identifier: &str) -> Result<()> {
        let workspace = unsafe { NSWorkspace::sharedWorkspace() };
        let name = NSString::from_str(identifier);

        #[allow(deprecated)]
        let launched = unsafe { workspace.launchApplication(&name) };

        debug!("DEBUG: launchApplication('{}') -> {}", identifier, launched);
        if !launched {
            return MacFocusError::query_failed(format!("Не удалось запустить '{}'", identifier));
        }
        Ok(())
    }

    fn running_applications(&self) -> Result<Vec<RunningApp>> {
        let workspace = unsafe { NSWorkspace::sharedWorkspace() };
        let apps = unsafe { workspace.runningApplications() };

        let mut result = Vec::with_capacity(apps.count());
        for app in apps.iter() {
            // Процессы без отображаемого имени сравнивать не с чем
            let Some(name) = (unsafe { app.localizedName() }) else {
                continue;
            };
            let pid = unsafe { app.processIdentifier() };
            result.push(RunningApp::new(pid, name.to_string()));
        }

        Ok(result)
    }

    fn frontmost_pid(&self) -> Option<Pid> {
        let workspace = unsafe { NSWorkspace::sharedWorkspace() };
        let app = unsafe { workspace.frontmostApplication() }?;
        let pid = unsafe { app.processIdentifier() };
        (pid > 0).then_some(Pid(pid))
    }

    fn activate(&self, pid: Pid) -> Result<()> {
        let app = Self::running_application(pid)?;
        // Без ActivateAllWindows поднимается только переднее окно
        let activated = unsafe { app.activateWithOptions(NSApplicationActivationOptions::empty()) };
        if !activated {
            return MacFocusError::query_failed(format!("Не удалось активировать PID {}", pid));
        }
        Ok(())
    }

    fn window_count(&self, pid: Pid) -> Result<usize> {
        let app = AxElement::application(pid)?;
        let value = app.copy_attribute(kAXWindowsAttribute).map_err(|status| {
            macfocus_error!(query_failed, "Не удалось получить окна. AXError: {}", status)
        })?;

        let value = expect_type(value, CFArray::<CFType>::type_id(), "AXWindows")?;
        let windows: CFArray<CFType> = unsafe { CFArray::wrap_under_create_rule(value as CFArrayRef) };
        Ok(windows.len().max(0) as usize)
    }

    fn perform_menu_bar_action(&self, pid: Pid, action: &str) -> Result<()> {
        let app = AxElement::application(pid)?;
        let value = app.copy_attribute(kAXMenuBarAttribute).map_err(|status| {
            macfocus_error!(query_failed, "Не удалось получить строку меню. AXError: {}", status)
        })?;

        let value = expect_type(value, unsafe { AXUIElementGetTypeID() }, "AXMenuBar")?;
        let menu_bar = AxElement(value as AXUIElementRef);

        let action_name = CFString::new(action);
        let status = unsafe { AXUIElementPerformAction(menu_bar.0, action_name.as_concrete_TypeRef()) };
        if status != kAXErrorSuccess {
            return Err(MacFocusError::ActionRejected {
                action: action.to_string(),
                code: status,
            });
        }
        Ok(())
    }
}
