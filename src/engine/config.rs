use std::{fs::File, io::BufReader, path::Path};

use crate::foundation::color::Color;
use crate::foundation::core::Fps;
use crate::foundation::error::{TurtleError, TurtleResult};
use crate::playback::player::{PlaybackConfig, PlaybackMode};
use crate::render::backend::GridStyle;
use crate::turtle::state::TurtleDefaults;

/// Environment variable that forces the playback mode (`instant` or `animated`).
pub const PLAYBACK_ENV: &str = "TURTLE_CANVAS_PLAYBACK";

/// Engine tuning. Every field has a default, so partial JSON documents are accepted.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Pen and pose applied on every bind.
    pub turtle: TurtleDefaults,
    /// Surface color behind the grid.
    pub background: Color,
    /// Reference grid.
    pub grid: GridStyle,
    /// Player speed and fill opacity.
    pub playback: PlaybackConfig,
    /// Arrowhead size in logical pixels.
    pub cursor_size: f64,
    /// Arrowhead color; `None` follows the pen color.
    pub cursor_color: Option<Color>,
    /// Nominal frame rate, passed to frame sinks.
    pub fps: Fps,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            turtle: TurtleDefaults::default(),
            background: Color::rgb(18, 20, 28),
            grid: GridStyle::default(),
            playback: PlaybackConfig::default(),
            cursor_size: 10.0,
            cursor_color: None,
            fps: Fps::default(),
        }
    }
}

impl EngineConfig {
    /// Read a JSON config file.
    pub fn from_json_path(path: &Path) -> TurtleResult<Self> {
        let f = File::open(path).map_err(|e| {
            TurtleError::validation(format!("open config '{}': {e}", path.display()))
        })?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| TurtleError::serde(format!("parse config '{}': {e}", path.display())))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values no session can run with.
    pub fn validate(&self) -> TurtleResult<()> {
        Fps::new(self.fps.num, self.fps.den)?;
        if !(self.cursor_size.is_finite() && self.cursor_size >= 0.0) {
            return Err(TurtleError::validation(format!(
                "cursor_size must be finite and >= 0, got {}",
                self.cursor_size
            )));
        }
        Ok(())
    }

    /// Apply [`PLAYBACK_ENV`] from the process environment.
    pub fn with_env_overrides(self) -> Self {
        let value = std::env::var(PLAYBACK_ENV).ok();
        self.with_playback_override(value.as_deref())
    }

    fn with_playback_override(mut self, value: Option<&str>) -> Self {
        let Some(value) = value else {
            return self;
        };
        match value.trim().to_ascii_lowercase().as_str() {
            "instant" => self.playback.mode = PlaybackMode::Instant,
            "animated" => self.playback.mode = PlaybackMode::Animated,
            "" => {}
            other => tracing::warn!(value = other, "ignoring unknown {PLAYBACK_ENV}"),
        }
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/config.rs"]
mod tests;
