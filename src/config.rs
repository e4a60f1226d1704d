//! Client settings read from the environment.

use crate::agents::DEFAULT_BOT_TURN_LIMIT;
use std::path::PathBuf;
use std::time::Duration;

pub const ENV_URL: &str = "FIVE_HUNDRED_URL";
pub const ENV_TIMEOUT_MS: &str = "FIVE_HUNDRED_TIMEOUT_MS";
pub const ENV_PLAYER: &str = "FIVE_HUNDRED_PLAYER";
pub const ENV_BOT_LIMIT: &str = "FIVE_HUNDRED_BOT_LIMIT";
pub const ENV_BOT_DELAY_MS: &str = "FIVE_HUNDRED_BOT_DELAY_MS";
pub const ENV_SEED: &str = "FIVE_HUNDRED_SEED";
pub const ENV_LOG: &str = "FIVE_HUNDRED_LOG";

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("{var} must be a number, got '{value}'")]
    NotANumber { var: &'static str, value: String },
    #[error("{0} must not be empty")]
    Empty(&'static str),
    #[error("{var} must start with http:// or https://, got '{value}'")]
    BadUrl { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct ClientConfig {
    pub server_url: String,
    pub timeout: Duration,
    pub player_name: String,
    pub bot_turn_limit: usize,
    pub bot_delay_ms: u64,
    pub seed: Option<u64>,
    pub log_file: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8080".to_string(),
            timeout: Duration::from_millis(5000),
            player_name: "Player".to_string(),
            bot_turn_limit: DEFAULT_BOT_TURN_LIMIT,
            bot_delay_ms: 400,
            seed: None,
            log_file: PathBuf::from("five-hundred.log"),
        }
    }
}

impl ClientConfig {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read settings through `lookup`; unset variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(url) = lookup(ENV_URL) {
            let url = url.trim().to_string();
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::BadUrl { var: ENV_URL, value: url });
            }
            cfg.server_url = url;
        }
        if let Some(ms) = number(&lookup, ENV_TIMEOUT_MS)? {
            cfg.timeout = Duration::from_millis(ms);
        }
        if let Some(name) = lookup(ENV_PLAYER) {
            let name = name.trim();
            if name.is_empty() {
                return Err(ConfigError::Empty(ENV_PLAYER));
            }
            cfg.player_name = name.to_string();
        }
        if let Some(limit) = number(&lookup, ENV_BOT_LIMIT)? {
            cfg.bot_turn_limit = limit as usize;
        }
        if let Some(ms) = number(&lookup, ENV_BOT_DELAY_MS)? {
            cfg.bot_delay_ms = ms;
        }
        cfg.seed = number(&lookup, ENV_SEED)?;
        if let Some(path) = lookup(ENV_LOG) {
            if path.trim().is_empty() {
                return Err(ConfigError::Empty(ENV_LOG));
            }
            cfg.log_file = PathBuf::from(path);
        }
        Ok(cfg)
    }
}

fn number<F>(lookup: &F, var: &'static str) -> Result<Option<u64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(None),
        Some(v) => v
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| ConfigError::NotANumber { var, value: v }),
    }
}
