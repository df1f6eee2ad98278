//! Server configuration parsed from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use crate::series::DEFAULT_SEED;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_PREDICTION_PATH: &str = "resources/mill_prediction.jsonl";
pub const DEFAULT_SESSION_TTL_SECS: u64 = 8 * 3600;
pub const DEFAULT_SESSION_PRUNE_SECS: u64 = 60;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    /// Front-end bundle served at `/` when set.
    pub static_dir: Option<PathBuf>,
    pub prediction_path: PathBuf,
    pub series_seed: u64,
    pub session_ttl: Duration,
    pub session_prune_every: Duration,
    pub cookie_secure: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            static_dir: None,
            prediction_path: PathBuf::from(DEFAULT_PREDICTION_PATH),
            series_seed: DEFAULT_SEED,
            session_ttl: Duration::from_secs(DEFAULT_SESSION_TTL_SECS),
            session_prune_every: Duration::from_secs(DEFAULT_SESSION_PRUNE_SECS),
            cookie_secure: false,
        }
    }
}

impl AppConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `STATIC_DIR`: front-end directory served at `/`
    /// - `MILL_PREDICTION_PATH`: default `resources/mill_prediction.jsonl`
    /// - `SERIES_SEED`: default 42
    /// - `SESSION_TTL_SECS`: idle expiry, default 8 hours
    /// - `SESSION_PRUNE_SECS`: expiry sweep period, default 60
    /// - `COOKIE_SECURE`: mark the session cookie `Secure`, default false
    ///
    /// # Errors
    ///
    /// Fails when a variable is set but does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            port: env_parse("PORT", defaults.port)?,
            static_dir: env_nonempty("STATIC_DIR").map(PathBuf::from),
            prediction_path: env_nonempty("MILL_PREDICTION_PATH")
                .map_or(defaults.prediction_path, PathBuf::from),
            series_seed: env_parse("SERIES_SEED", defaults.series_seed)?,
            session_ttl: Duration::from_secs(env_parse("SESSION_TTL_SECS", DEFAULT_SESSION_TTL_SECS)?),
            session_prune_every: Duration::from_secs(
                env_parse("SESSION_PRUNE_SECS", DEFAULT_SESSION_PRUNE_SECS)?.max(1),
            ),
            cookie_secure: match env_nonempty("COOKIE_SECURE") {
                Some(raw) => parse_bool(&raw).ok_or(ConfigError::Invalid { key: "COOKIE_SECURE", value: raw })?,
                None => defaults.cookie_secure,
            },
        })
    }
}

fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_parse<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
{
    match env_nonempty(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
        None => Ok(default),
    }
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
