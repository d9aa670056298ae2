pub mod permissions;

// ✅ Макрос условного логирования: аргументы не вычисляются, если TRACE выключен
#[macro_export]
macro_rules! trace_if_enabled {
    ($($arg:tt)*) => {
        if tracing::enabled!(tracing::Level::TRACE) {
            tracing::trace!($($arg)*);
        }
    };
}
