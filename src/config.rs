use anyhow::{Context, Result};
use figment::{
    providers::{Env, Serialized},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::events::{KeyChord, Modifiers};
use crate::services::keycode_map::KeycodeMap;

/// Допустимые уровни логирования
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Проверить уровень логирования из конфигурации или командной строки
pub fn validate_log_level(level: &str) -> Result<()> {
    if !LOG_LEVELS.contains(&level) {
        anyhow::bail!("Неверный уровень логирования: {}", level);
    }
    Ok(())
}

/// Префикс переменных окружения, например `MACFOCUS_PACING__OVERVIEW_SETTLE_MS=150`
pub const ENV_PREFIX: &str = "MACFOCUS_";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub logging: LoggingConfig,
    pub pacing: PacingConfig,
    pub chords: ChordsConfig,
    pub focus: FocusConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

/// Паузы между синтетическими событиями. Это лишь темп для оконного сервера,
/// а не гарантия того, что событие обработано.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PacingConfig {
    pub key_hold_ms: u64,
    pub overview_settle_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChordSpec {
    pub key: String,
    #[serde(default)]
    pub modifiers: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChordsConfig {
    pub cycle_windows: ChordSpec,
    pub desktop_overview: ChordSpec,
    /// Аккорд для рабочего стола 1; стол N получает код клавиши + (N-1)
    pub desktop_slot_base: ChordSpec,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FocusConfig {
    pub new_window_action: String,
}

/// Аккорды после разбора имён клавиш
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedChords {
    pub cycle_windows: KeyChord,
    pub desktop_overview: KeyChord,
    pub desktop_slot_base: KeyChord,
}

impl ChordSpec {
    pub fn new(key: &str, modifiers: &[&str]) -> Self {
        Self {
            key: key.to_string(),
            modifiers: modifiers.iter().map(|m| m.to_string()).collect(),
        }
    }

    pub fn resolve(&self) -> Result<KeyChord> {
        let key_code = KeycodeMap::get_keycode(&self.key).map_err(anyhow::Error::msg)?;
        let modifiers = Modifiers::from_names(&self.modifiers).map_err(anyhow::Error::msg)?;
        Ok(KeyChord::new(key_code, modifiers))
    }
}

impl PacingConfig {
    pub fn key_hold(&self) -> Duration {
        Duration::from_millis(self.key_hold_ms)
    }

    pub fn overview_settle(&self) -> Duration {
        Duration::from_millis(self.overview_settle_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "compact".to_string(),
            },
            pacing: PacingConfig {
                key_hold_ms: 1,
                overview_settle_ms: 100,
            },
            chords: ChordsConfig {
                cycle_windows: ChordSpec::new("grave", &["cmd"]),
                desktop_overview: ChordSpec::new("up", &["ctrl"]),
                desktop_slot_base: ChordSpec::new("1", &["ctrl"]),
            },
            focus: FocusConfig {
                new_window_action: "New Window".to_string(),
            },
        }
    }
}

impl Config {
    /// Значения по умолчанию, поверх которых накладываются переменные окружения
    pub fn load() -> Result<Self> {
        Self::from_figment(
            Figment::from(Serialized::defaults(Config::default()))
                .merge(Env::prefixed(ENV_PREFIX).split("__")),
        )
    }

    fn from_figment(figment: Figment) -> Result<Self> {
        let config: Config = figment
            .extract()
            .context("Не удалось загрузить конфигурацию из окружения")?;

        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        // Валидация настроек логирования
        validate_log_level(&self.logging.level)?;

        match self.logging.format.as_str() {
            "compact" | "full" => {}
            _ => anyhow::bail!("Неверный формат логирования: {}", self.logging.format),
        }

        // Валидация пауз
        if self.pacing.key_hold_ms == 0 {
            anyhow::bail!("key_hold_ms должно быть больше 0");
        }

        if self.pacing.key_hold_ms > 1000 {
            anyhow::bail!("key_hold_ms должно быть не больше 1000");
        }

        if self.pacing.overview_settle_ms > 5000 {
            anyhow::bail!("overview_settle_ms должно быть не больше 5000");
        }

        // Валидация аккордов
        self.resolve_chords()?;

        if self.focus.new_window_action.trim().is_empty() {
            anyhow::bail!("new_window_action не может быть пустым");
        }

        Ok(())
    }

    pub fn resolve_chords(&self) -> Result<ResolvedChords> {
        Ok(ResolvedChords {
            cycle_windows: self
                .chords
                .cycle_windows
                .resolve()
                .context("Неверный аккорд cycle_windows")?,
            desktop_overview: self
                .chords
                .desktop_overview
                .resolve()
                .context("Неверный аккорд desktop_overview")?,
            desktop_slot_base: self
                .chords
                .desktop_slot_base
                .resolve()
                .context("Неверный аккорд desktop_slot_base")?,
        })
    }
}
