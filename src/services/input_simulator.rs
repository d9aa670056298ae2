use crate::config::{Config, ResolvedChords};
use crate::error::{MacFocusError, Result};
use crate::events::{KeyChord, VirtualKeyEvent};
use crate::platform::Platform;
use crate::services::keycode_map::KeycodeMap;
use crate::trace_if_enabled;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Номера рабочих столов, доступные через цифровой ряд
pub const DESKTOP_RANGE: std::ops::RangeInclusive<i64> = 1..=9;

/// Синтез аккордов через платформенную инъекцию событий.
///
/// Паузы между событиями только дают оконному серверу время на обработку:
/// ни открытие обзора, ни переключение стола не проверяются.
pub struct InputSimulator {
    platform: Arc<dyn Platform>,
    chords: ResolvedChords,
    key_hold: Duration,
    overview_settle: Duration,
}

impl InputSimulator {
    pub fn new(platform: Arc<dyn Platform>, config: &Config) -> Result<Self> {
        let chords = config.resolve_chords()?;
        debug!(
            "InputSimulator: cycle={}, overview={}, desktop_base={}",
            chords.cycle_windows, chords.desktop_overview, chords.desktop_slot_base
        );

        Ok(Self {
            platform,
            chords,
            key_hold: config.pacing.key_hold(),
            overview_settle: config.pacing.overview_settle(),
        })
    }

    /// Нажать и отпустить аккорд, удерживая его `key_hold`
    pub async fn press_chord(&self, chord: KeyChord) -> Result<()> {
        trace_if_enabled!(
            "Аккорд {} ({})",
            chord,
            KeycodeMap::get_key_name(chord.key_code).unwrap_or("?")
        );

        self.platform.post_key_event(&VirtualKeyEvent::press(chord))?;
        tokio::time::sleep(self.key_hold).await;
        self.platform.post_key_event(&VirtualKeyEvent::release(chord))?;

        Ok(())
    }

    /// Переключить окна текущего приложения (по умолчанию Cmd+`)
    pub async fn cycle_windows(&self) -> Result<()> {
        self.press_chord(self.chords.cycle_windows).await?;
        info!("Simulated {} key press to cycle windows", self.chords.cycle_windows);
        Ok(())
    }

    /// Аккорд для рабочего стола `number`: базовая клавиша + (number - 1)
    pub fn desktop_chord(&self, number: i64) -> Result<KeyChord> {
        if !DESKTOP_RANGE.contains(&number) {
            return MacFocusError::invalid_input(format!(
                "Invalid desktop number {}. Must be between 1 and 9.",
                number
            ));
        }

        let base = self.chords.desktop_slot_base;
        Ok(KeyChord::new(base.key_code.offset((number - 1) as u16), base.modifiers))
    }

    /// Открыть обзор рабочих столов, подождать и выбрать стол `number`
    pub async fn switch_to_desktop(&self, number: i64) -> Result<()> {
        let slot = self.desktop_chord(number)?;

        self.press_chord(self.chords.desktop_overview).await?;
        tokio::time::sleep(self.overview_settle).await;
        self.press_chord(slot).await?;

        info!("Switched to desktop {}", number);
        Ok(())
    }
}
