use crate::config::Config;
use crate::error::{MacFocusError, Result};
use crate::platform::Platform;
use crate::utils::permissions::check_permissions;
use std::sync::Arc;
use tracing::{debug, error};

use super::commands::{
    CommandHandler, CycleCommand, FocusedCommand, OpenCommand, OpenCycleCommand,
    SwitchDesktopCommand,
};
use super::{FocusController, InputSimulator};

/// Всё, что нужно обработчикам команд на время одного запуска
pub struct CommandContext {
    pub platform: Arc<dyn Platform>,
    pub focus: FocusController,
    pub input: InputSimulator,
}

impl CommandContext {
    pub fn new(platform: Arc<dyn Platform>, config: &Config) -> Result<Self> {
        Ok(Self {
            focus: FocusController::new(platform.clone(), config.focus.new_window_action.clone()),
            input: InputSimulator::new(platform.clone(), config)?,
            platform,
        })
    }
}

/// Упорядоченная таблица команд; имена уникальны, поиск по точному совпадению
pub struct CommandTable {
    handlers: Vec<Box<dyn CommandHandler>>,
}

/// Чем закончилась маршрутизация одного вызова
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Команда найдена и выполнена (даже если сообщила об ошибке)
    Dispatched,
    /// Команда не указана или неизвестна
    Unknown,
    /// Нет разрешения Accessibility
    PermissionDenied,
}

impl RouteOutcome {
    pub fn exit_code(&self) -> u8 {
        match self {
            RouteOutcome::Dispatched => 0,
            RouteOutcome::Unknown | RouteOutcome::PermissionDenied => 1,
        }
    }
}

impl CommandTable {
    pub fn empty() -> Self {
        Self { handlers: Vec::new() }
    }

    /// Стандартный набор команд в порядке вывода
    pub fn standard() -> Result<Self> {
        let handlers: Vec<Box<dyn CommandHandler>> = vec![
            Box::new(OpenCommand),
            Box::new(CycleCommand),
            Box::new(OpenCycleCommand),
            Box::new(SwitchDesktopCommand),
            Box::new(FocusedCommand),
        ];
        Self::from_handlers(handlers)
    }

    /// Собрать таблицу; повторное имя команды является ошибкой
    pub fn from_handlers(handlers: Vec<Box<dyn CommandHandler>>) -> Result<Self> {
        let mut table = Self::empty();
        for handler in handlers {
            table.register(handler)?;
        }
        Ok(table)
    }

    pub fn register(&mut self, handler: Box<dyn CommandHandler>) -> Result<()> {
        if self.find(handler.name()).is_some() {
            return MacFocusError::invalid_input(format!(
                "Команда '{}' уже зарегистрирована",
                handler.name()
            ));
        }
        self.handlers.push(handler);
        Ok(())
    }

    pub fn find(&self, name: &str) -> Option<&dyn CommandHandler> {
        self.handlers
            .iter()
            .find(|handler| handler.name() == name)
            .map(|handler| handler.as_ref())
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.handlers.iter().map(|handler| handler.name()).collect()
    }

    /// Имена всех команд через пробел
    pub fn names_line(&self) -> String {
        self.names().join(" ")
    }

    /// Найти команду по первому токену, проверить разрешение и выполнить её.
    ///
    /// `argv` не содержит имени программы: `argv[0]` это имя команды.
    pub async fn dispatch(&self, ctx: &CommandContext, argv: &[String]) -> RouteOutcome {
        let Some((handler, args)) = argv
            .split_first()
            .and_then(|(name, args)| self.find(name).map(|handler| (handler, args)))
        else {
            println!("Available commands: {}", self.names_line());
            return RouteOutcome::Unknown;
        };

        if let Err(e) = check_permissions(ctx.platform.as_ref()) {
            error!("{}", e);
            return RouteOutcome::PermissionDenied;
        }

        debug!("Выполнение команды '{}' с аргументами {:?}", handler.name(), args);
        if let Err(e) = handler.run(ctx, args).await {
            // Ошибки команд только сообщаются, код выхода остаётся 0
            error!("{}: {}", handler.name(), e);
        }

        RouteOutcome::Dispatched
    }
}
