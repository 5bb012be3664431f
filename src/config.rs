//! Settings read from the environment at startup.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_CHAR_DELAY: Duration = Duration::from_millis(10);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    /// Typewriter delay per character; zero shows answers at once.
    pub char_delay: Duration,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            char_delay: DEFAULT_CHAR_DELAY,
            log_file: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(url) = lookup("ASK_BASE_URL").filter(|s| !s.trim().is_empty()) {
            config.base_url = url.trim().to_string();
        }
        if let Some(raw) = lookup("ASK_CHAR_DELAY_MS") {
            let ms: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidDelay {
                name: "ASK_CHAR_DELAY_MS",
                value: raw.clone(),
            })?;
            config.char_delay = Duration::from_millis(ms);
        }
        config.log_file = lookup("ASK_LOG_FILE")
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);
        Ok(config)
    }
}
