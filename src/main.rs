use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;
use tracing::{debug, warn};
mod config;
mod error;
mod events;
mod platform;
mod services;
mod utils;

use config::Config;
use platform::create_platform;
use services::{CommandContext, CommandTable};

#[derive(Parser, Debug)]
#[command(name = "macfocus", version)]
#[command(disable_help_flag = true, disable_version_flag = true)]
#[command(about = "Открыть или сфокусировать приложение, переключить окна и рабочие столы macOS")]
struct Args {
    /// Показывать отладочные строки (уровень debug)
    #[arg(short, long)]
    verbose: bool,

    /// Уровень логирования (перекрывает MACFOCUS_LOGGING__LEVEL и --verbose)
    #[arg(long)]
    log_level: Option<String>,

    /// Режим сухого запуска (без реальных действий)
    #[arg(long)]
    dry_run: bool,

    /// Команда и её аргументы: open <app>, cycle, open-cycle <app>, switch-desktop <n>, focused
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    command: Vec<String>,
}

impl Args {
    fn effective_log_level(&self, config: &Config) -> Result<String> {
        match (&self.log_level, self.verbose) {
            (Some(level), _) => {
                config::validate_log_level(level)?;
                Ok(level.clone())
            }
            (None, true) => Ok("debug".to_string()),
            (None, false) => Ok(config.logging.level.clone()),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    // Загрузка конфигурации (только значения по умолчанию и окружение)
    let config = Config::load()?;

    // Инициализация системы логирования
    init_tracing(&args.effective_log_level(&config)?, &config.logging.format)?;

    debug!("Запуск macfocus v{}", env!("CARGO_PKG_VERSION"));

    if args.dry_run {
        warn!("Режим сухого запуска - реальные действия отключены");
    }

    let platform = create_platform(args.dry_run).context("Не удалось инициализировать платформу")?;
    let ctx = CommandContext::new(platform, &config)?;

    let outcome = CommandTable::standard()?.dispatch(&ctx, &args.command).await;
    debug!("Результат маршрутизации: {:?}", outcome);

    Ok(ExitCode::from(outcome.exit_code()))
}

fn init_tracing(level: &str, format: &str) -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))?;

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        "full" => registry
            .with(tracing_subscriber::fmt::layer().with_target(false))
            .init(),
        _ => registry
            .with(tracing_subscriber::fmt::layer().compact().with_target(false))
            .init(),
    }

    Ok(())
}
