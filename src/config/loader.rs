use std::{env, str::FromStr, time::Duration};

use clap::ValueEnum;

use super::env::{
    AppConfig, ConfigError, DirectoryConfig, FetchConfig, LoggingConfig, DEFAULT_USER_AGENT,
};
use crate::domain::CheckKind;

pub fn load_config() -> Result<AppConfig, ConfigError> {
    AppConfig::from_env()
}

impl AppConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let directories = DirectoryConfig {
            logs_dir: env::var("LOGS_DIR").unwrap_or_else(|_| "logs".to_string()),
        };

        let logging = LoggingConfig {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        };

        let fetch = FetchConfig {
            timeout: Duration::from_millis(parse_or("FETCH_TIMEOUT_MS", 12_000u64)?),
            max_redirects: parse_or("MAX_REDIRECTS", 10usize)?,
            user_agent: env::var("USER_AGENT")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        };

        let default_check = match env::var("DEFAULT_CHECK") {
            Ok(value) if !value.trim().is_empty() => <CheckKind as ValueEnum>::from_str(value.trim(), true)
                .map_err(|_| ConfigError::Invalid {
                    key: "DEFAULT_CHECK",
                    value,
                })?,
            _ => CheckKind::Portal,
        };

        Ok(Self {
            directories,
            logging,
            fetch,
            default_check,
        })
    }
}

fn parse_or<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { key, value }),
        _ => Ok(default),
    }
}
