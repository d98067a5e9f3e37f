use std::net::SocketAddr;
use std::str::FromStr;

// ConfigError reports unusable process settings at startup
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

// ServerConfig holds the process settings loaded from the environment
#[derive(Debug, Clone)]
pub(crate) struct ServerConfig {
    pub bind_address: SocketAddr,
    // None runs the service against the in-process store
    pub database_url: Option<String>,
    pub log_level: String,
    pub events_topic_arn: Option<String>,
    pub branch: String,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        let bind_address = env_or("BIND_ADDRESS", SocketAddr::from(([0, 0, 0, 0], 5000)))?;
        let database_url = non_empty_env("DATABASE_URL");
        let log_level = non_empty_env("RUST_LOG").unwrap_or_else(|| "info".to_string());
        let events_topic_arn = non_empty_env("LMS_EVENTS_TOPIC_ARN");
        let branch = non_empty_env("LMS_BRANCH").unwrap_or_else(|| "main".to_string());
        Ok(Self {
            bind_address,
            database_url,
            log_level,
            events_topic_arn,
            branch,
        })
    }
}

pub(crate) fn env_or<T: FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match non_empty_env(name) {
        Some(value) => value.parse::<T>().map_err(|_| {
            ConfigError::InvalidValue(name.to_string(), format!("'{}' cannot be parsed", value))
        }),
        None => Ok(default),
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
