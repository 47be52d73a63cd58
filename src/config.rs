//! App Configuration
//!
//! A CSR bundle has no runtime environment, so overrides are baked in at
//! build time through `EISENHOWER_API_BASE` and `EISENHOWER_LOG`.

use std::time::Duration;

use log::LevelFilter;

const DEFAULT_API_BASE: &str = "/api";
const DEFAULT_SAVE_ACK: Duration = Duration::from_secs(3);
const DEFAULT_LOG_CAPACITY: usize = 500;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Prefix of the task store and session endpoints
    pub api_base: String,
    /// How long the "Saved" acknowledgment stays visible
    pub save_ack: Duration,
    pub log_level: LevelFilter,
    /// Lines kept in the rolling log buffer
    pub log_capacity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            save_ack: DEFAULT_SAVE_ACK,
            log_level: LevelFilter::Info,
            log_capacity: DEFAULT_LOG_CAPACITY,
        }
    }
}

impl AppConfig {
    /// Defaults with the build-time overrides applied
    pub fn from_build_env() -> Self {
        Self::from_values(option_env!("EISENHOWER_API_BASE"), option_env!("EISENHOWER_LOG"))
    }

    fn from_values(api_base: Option<&str>, log_level: Option<&str>) -> Self {
        let mut config = Self::default();
        if let Some(base) = api_base.map(str::trim).filter(|b| !b.is_empty()) {
            config.api_base = base.trim_end_matches('/').to_string();
        }
        if let Some(level) = log_level {
            match level.trim().parse::<LevelFilter>() {
                Ok(level) => config.log_level = level,
                Err(_) => log::warn!("[CONFIG] ignoring unknown log level {:?}", level),
            }
        }
        config
    }

    /// Absolute endpoint URL. Relative bases are joined to `origin`.
    pub fn endpoint(&self, origin: &str, path: &str) -> String {
        let path = path.trim_start_matches('/');
        if self.api_base.starts_with("http://") || self.api_base.starts_with("https://") {
            format!("{}/{}", self.api_base, path)
        } else {
            let base = self.api_base.trim_start_matches('/');
            format!("{}/{}/{}", origin.trim_end_matches('/'), base, path)
        }
    }
}
