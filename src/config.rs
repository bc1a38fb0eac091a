use std::env;
use std::time::Duration;

/// Bundled config for builds that ship without a `.env` (mobile, web)
const BUNDLED_CONFIG: &str = include_str!("../assets/config.env");

pub const REPLY_DELAY_VAR: &str = "RAGCHAT_REPLY_DELAY_MS";
pub const UPLOAD_DELAY_VAR: &str = "RAGCHAT_UPLOAD_DELAY_MS";

const DEFAULT_DELAY: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} must be a whole number of milliseconds, got '{value}'")]
    InvalidDelay { key: &'static str, value: String },
}

/// Latencies the simulators wait before answering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub reply_delay: Duration,
    pub upload_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reply_delay: DEFAULT_DELAY,
            upload_delay: DEFAULT_DELAY,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            reply_delay: parse_delay(REPLY_DELAY_VAR, lookup(REPLY_DELAY_VAR))?
                .unwrap_or(defaults.reply_delay),
            upload_delay: parse_delay(UPLOAD_DELAY_VAR, lookup(UPLOAD_DELAY_VAR))?
                .unwrap_or(defaults.upload_delay),
        })
    }
}

fn parse_delay(key: &'static str, raw: Option<String>) -> Result<Option<Duration>, ConfigError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    raw.trim()
        .parse::<u64>()
        .map(|ms| Some(Duration::from_millis(ms)))
        .map_err(|_| ConfigError::InvalidDelay { key, value: raw })
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_dotenv() {
    // First try to load from .env file (desktop dev)
    if dotenvy::dotenv().is_ok() {
        return;
    }

    load_bundled_config();
}

#[cfg(target_arch = "wasm32")]
pub fn load_dotenv() {
    load_bundled_config();
}

fn load_bundled_config() {
    for (key, value) in bundled_pairs(BUNDLED_CONFIG) {
        // Only set if not already set (allow env override)
        if env::var(key).is_err() {
            // SAFETY: called from main before the runtime spawns any threads
            unsafe {
                env::set_var(key, value);
            }
        }
    }
}

fn bundled_pairs(source: &str) -> impl Iterator<Item = (&str, &str)> {
    source.lines().filter_map(|line| {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }
        line.split_once('=')
            .map(|(key, value)| (key.trim(), value.trim()))
    })
}
