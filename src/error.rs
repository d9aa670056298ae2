use thiserror::Error;

#[derive(Error, Debug)]
pub enum MacFocusError {
    #[error("Нет разрешения Accessibility для управления интерфейсом")]
    PermissionDenied,

    #[error("Приложение не найдено: {0}")]
    AppNotFound(String),

    #[error("Ошибка запуска или запроса к платформе: {0}")]
    LaunchOrQueryFailed(String),

    #[error("Платформа отклонила действие '{action}' (AXError: {code})")]
    ActionRejected { action: String, code: i32 },

    #[error("Неверные входные данные: {0}")]
    InvalidInput(String),

    #[error("Платформа не поддерживается: {0}")]
    UnsupportedPlatform(String),

    #[error("Ошибка конфигурации: {0}")]
    Config(#[from] anyhow::Error),

    #[error("Ошибка ввода-вывода: {0}")]
    Io(#[from] std::io::Error),
}

impl MacFocusError {
    pub fn invalid_input<T>(msg: impl Into<String>) -> Result<T> {
        Err(MacFocusError::InvalidInput(msg.into()))
    }

    pub fn query_failed<T>(msg: impl Into<String>) -> Result<T> {
        Err(MacFocusError::LaunchOrQueryFailed(msg.into()))
    }
}

pub type Result<T> = std::result::Result<T, MacFocusError>;

#[macro_export]
macro_rules! macfocus_error {
    (invalid_input, $($arg:tt)*) => {
        $crate::error::MacFocusError::InvalidInput(format!($($arg)*))
    };
    (query_failed, $($arg:tt)*) => {
        $crate::error::MacFocusError::LaunchOrQueryFailed(format!($($arg)*))
    };
    (not_found, $($arg:tt)*) => {
        $crate::error::MacFocusError::AppNotFound(format!($($arg)*))
    };
}
