use crate::error::{MacFocusError, Result};
use crate::events::FocusOutcome;
use crate::macfocus_error;
use async_trait::async_trait;
use tracing::info;

use super::command_router::CommandContext;

/// Одна именованная команда CLI
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Имя, по которому команда вызывается (точное совпадение)
    fn name(&self) -> &'static str;

    /// Выполнить команду с аргументами, следующими за её именем
    async fn run(&self, ctx: &CommandContext, args: &[String]) -> Result<()>;
}

fn required_arg<'a>(command: &str, args: &'a [String], what: &str) -> Result<&'a str> {
    match args.first() {
        Some(arg) if !arg.is_empty() => Ok(arg.as_str()),
        _ => MacFocusError::invalid_input(format!("{}: не указан аргумент <{}>", command, what)),
    }
}

/// `open <app>`: открыть или сфокусировать приложение
pub struct OpenCommand;

#[async_trait]
impl CommandHandler for OpenCommand {
    fn name(&self) -> &'static str {
        "open"
    }

    async fn run(&self, ctx: &CommandContext, args: &[String]) -> Result<()> {
        let app = required_arg(self.name(), args, "app")?;
        let outcome = ctx.focus.open_or_focus(app);
        info!("open '{}': {}", app, outcome);

        match outcome {
            FocusOutcome::AppOpened | FocusOutcome::AppFocused => Ok(()),
            FocusOutcome::AppNotFound => Err(macfocus_error!(not_found, "{}", app)),
            FocusOutcome::Failed => Err(macfocus_error!(query_failed, "окна '{}' недоступны", app)),
        }
    }
}

/// `cycle`: переключить окна текущего приложения
pub struct CycleCommand;

#[async_trait]
impl CommandHandler for CycleCommand {
    fn name(&self) -> &'static str {
        "cycle"
    }

    async fn run(&self, ctx: &CommandContext, _args: &[String]) -> Result<()> {
        ctx.input.cycle_windows().await
    }
}

/// `open-cycle <app>`: open-or-focus, затем всегда одно переключение окон
pub struct OpenCycleCommand;

#[async_trait]
impl CommandHandler for OpenCycleCommand {
    fn name(&self) -> &'static str {
        "open-cycle"
    }

    async fn run(&self, ctx: &CommandContext, args: &[String]) -> Result<()> {
        let app = required_arg(self.name(), args, "app")?;
        let outcome = ctx.focus.open_or_focus(app);
        info!("open-cycle '{}': {}", app, outcome);
        ctx.input.cycle_windows().await
    }
}

/// `switch-desktop <n>`: перейти на рабочий стол 1..=9
pub struct SwitchDesktopCommand;

#[async_trait]
impl CommandHandler for SwitchDesktopCommand {
    fn name(&self) -> &'static str {
        "switch-desktop"
    }

    async fn run(&self, ctx: &CommandContext, args: &[String]) -> Result<()> {
        let raw = required_arg(self.name(), args, "n")?;
        let number: i64 = raw
            .trim()
            .parse()
            .map_err(|_| macfocus_error!(invalid_input, "Please specify a valid desktop number, got '{}'", raw))?;
        ctx.input.switch_to_desktop(number).await
    }
}

/// `focused`: напечатать PID и имя приложения на переднем плане
pub struct FocusedCommand;

#[async_trait]
impl CommandHandler for FocusedCommand {
    fn name(&self) -> &'static str {
        "focused"
    }

    async fn run(&self, ctx: &CommandContext, _args: &[String]) -> Result<()> {
        let pid = ctx
            .platform
            .frontmost_pid()
            .ok_or_else(|| macfocus_error!(query_failed, "Failed to get focused app PID."))?;

        let name = ctx
            .platform
            .running_applications()?
            .into_iter()
            .find(|app| app.pid == pid)
            .map(|app| app.name);

        match name {
            Some(name) => println!("Focused app PID: {} ({})", pid, name),
            None => println!("Focused app PID: {}", pid),
        }
        Ok(())
    }
}
