//! Front-end configuration, stored as `config.json`.
//!
//! The rules core reads none of this. `sessions_path` tells the front ends
//! where to append finished games; the connection fields are carried through
//! for a host UI.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ConfigError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GameMode {
    #[default]
    #[serde(rename = "Human vs Human")]
    HumanVsHuman,
    #[serde(rename = "Human vs Computer")]
    HumanVsComputer,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub game_mode: GameMode,
    pub ip_address: String,
    pub port: String,
    /// File finished sessions are appended to.
    pub sessions_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            game_mode: GameMode::HumanVsHuman,
            ip_address: String::new(),
            port: String::new(),
            sessions_path: PathBuf::from("chess_sessions.jsonl"),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let text = fs::read_to_string(path)?;
        let config = serde_json::from_str(&text)?;
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Like `load`, but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
        match Config::load(path) {
            Err(ConfigError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                info!(path = %path.display(), "no config file, using defaults");
                Ok(Config::default())
            }
            other => other,
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text)?;
        info!(path = %path.display(), "config saved");
        Ok(())
    }
}
