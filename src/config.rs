//! Environment driven configuration.
//!
//! Values are read once at start. A missing token or an unusable value is a
//! fatal startup error.

use std::env;
use std::path::PathBuf;
use thiserror::Error;

use crate::commands::music::utils::guild_player::PlayerSettings;

pub const DEFAULT_PREFIX: &str = "!";
pub const DEFAULT_SONGS_DIR: &str = "songs";
pub const DEFAULT_EXTENSION: &str = "mp3";
pub const DEFAULT_MAX_CONSECUTIVE_FAILURES: usize = 5;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub token: String,
    pub prefix: String,
    pub songs_dir: PathBuf,
    pub extension: String,
    pub max_consecutive_failures: usize,
}

impl Config {
    /// Read the configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// `DISCORD_TOKEN` is preferred over the older `DISCORD_BOT_TOKEN` name.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let token = non_blank("DISCORD_TOKEN")
            .or_else(|| non_blank("DISCORD_BOT_TOKEN"))
            .ok_or(ConfigError::Missing("DISCORD_TOKEN"))?;

        let prefix = match lookup("PREFIX") {
            Some(prefix) if prefix.trim().is_empty() => {
                return Err(ConfigError::Invalid {
                    key: "PREFIX",
                    value: prefix,
                });
            }
            Some(prefix) => prefix.trim().to_string(),
            None => DEFAULT_PREFIX.to_string(),
        };

        let songs_dir = non_blank("SONGS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SONGS_DIR));

        let extension = match non_blank("SONG_EXTENSION") {
            Some(raw) => {
                let ext = raw.trim().trim_start_matches('.').to_string();
                if ext.is_empty() || ext.contains(['/', '\\']) {
                    return Err(ConfigError::Invalid {
                        key: "SONG_EXTENSION",
                        value: raw,
                    });
                }
                ext
            }
            None => DEFAULT_EXTENSION.to_string(),
        };

        let max_consecutive_failures = match non_blank("MAX_CONSECUTIVE_FAILURES") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|_| ConfigError::Invalid {
                    key: "MAX_CONSECUTIVE_FAILURES",
                    value: raw,
                })?,
            None => DEFAULT_MAX_CONSECUTIVE_FAILURES,
        };

        Ok(Self {
            token,
            prefix,
            songs_dir,
            extension,
            max_consecutive_failures,
        })
    }

    pub fn player_settings(&self) -> PlayerSettings {
        PlayerSettings {
            max_consecutive_failures: self.max_consecutive_failures,
        }
    }
}
