use std::path::Path;
use std::time::Duration;

use log::warn;

use crate::error::ConfigError;
use crate::game::Player;

/// Widest board cell the terminal UI will lay out.
pub const MAX_CELL_WIDTH: u16 = 16;

/// Rules of a single session.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Player who drops the first piece
    pub first_player: Player,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            first_player: Player::One,
        }
    }
}

/// Presentation settings for the terminal UI.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Pause after the game ends before the window closes
    pub end_delay_ms: u64,
    /// Terminal columns taken by one board cell
    pub cell_width: u16,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            end_delay_ms: 1400,
            cell_width: 3,
        }
    }
}

impl UiConfig {
    pub fn end_delay(&self) -> Duration {
        Duration::from_millis(self.end_delay_ms)
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameConfig,
    pub ui: UiConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ui.cell_width == 0 {
            return Err(ConfigError::Validation(
                "ui.cell_width must be > 0".into(),
            ));
        }
        if self.ui.cell_width > MAX_CELL_WIDTH {
            return Err(ConfigError::Validation(format!(
                "ui.cell_width must be <= {MAX_CELL_WIDTH}"
            )));
        }
        if self.ui.end_delay_ms > 60_000 {
            return Err(ConfigError::Validation(
                "ui.end_delay_ms must be <= 60000".into(),
            ));
        }
        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}
