use std::{env, time::Duration};

use url::Url;

use super::env::{
    AppConfig, ConfigError, DirectoryConfig, LoggingConfig, OllamaConfig, DEFAULT_OLLAMA_HOST,
    DEFAULT_OLLAMA_MODEL,
};

pub fn load_config() -> Result<AppConfig, ConfigError> {
    AppConfig::from_env()
}

impl AppConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = validate_host(
            &var("OLLAMA_HOST").unwrap_or_else(|| DEFAULT_OLLAMA_HOST.to_string()),
        )?;
        let model = validate_model(
            &var("OLLAMA_MODEL").unwrap_or_else(|| DEFAULT_OLLAMA_MODEL.to_string()),
        )?;

        let ollama = OllamaConfig {
            host,
            model,
            request_timeout: Duration::from_secs(
                var("OLLAMA_TIMEOUT_SECS")
                    .and_then(|v| v.trim().parse::<u64>().ok())
                    .filter(|secs| *secs > 0)
                    .unwrap_or(120),
            ),
        };

        let directories = DirectoryConfig {
            logs_dir: var("LOGS_DIR").unwrap_or_else(|| "logs".to_string()),
        };

        let logging = LoggingConfig {
            level: var("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        };

        Ok(Self {
            ollama,
            directories,
            logging,
        })
    }
}

/// Accepts only absolute http(s) URLs; returns the host without a trailing slash.
pub fn validate_host(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    let url = Url::parse(trimmed).map_err(|err| ConfigError::InvalidHost {
        value: trimmed.to_string(),
        reason: err.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidHost {
            value: trimmed.to_string(),
            reason: format!("unsupported scheme {}", url.scheme()),
        });
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

pub fn validate_model(raw: &str) -> Result<String, ConfigError> {
    let model = raw.trim();
    if model.is_empty() {
        return Err(ConfigError::EmptyModel);
    }
    Ok(model.to_string())
}
