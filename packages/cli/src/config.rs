// ABOUTME: Server configuration loaded from the environment
// ABOUTME: Reads .env through dotenvy and validates ports, token lifetime, and CORS origins

use std::env;
use std::num::ParseIntError;

use axum::http::HeaderValue;
use realworlded_core::constants::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid port number: {0}")]
    InvalidPort(#[from] ParseIntError),
    #[error("Port {0} is out of valid range (1-65535)")]
    PortOutOfRange(u16),
    #[error("Invalid token lifetime '{0}': expected a positive number of minutes")]
    InvalidTokenLifetime(String),
    #[error("Invalid CORS origin: {0}")]
    InvalidCorsOrigin(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub secret_key: String,
    pub access_token_expire_minutes: i64,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub cors_origins: Vec<String>,
}

impl Config {
    /// Load `.env` (if present) and read the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup; unset and blank values take the defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let port = match read(PORT) {
            Some(raw) => raw.parse::<u16>()?,
            None => DEFAULT_PORT,
        };
        if port == 0 {
            return Err(ConfigError::PortOutOfRange(port));
        }

        let access_token_expire_minutes = match read(ACCESS_TOKEN_EXPIRE_MINUTES) {
            Some(raw) => match raw.parse::<i64>() {
                Ok(minutes) if minutes > 0 => minutes,
                _ => return Err(ConfigError::InvalidTokenLifetime(raw)),
            },
            None => DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES,
        };

        let cors_origins = parse_origins(
            &read(CORS_ORIGINS).unwrap_or_else(|| DEFAULT_CORS_ORIGINS.to_string()),
        )?;

        Ok(Config {
            host: read(HOST).unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            database_url: read(DATABASE_URL).unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            secret_key: read(SECRET_KEY).unwrap_or_else(|| DEFAULT_SECRET_KEY.to_string()),
            access_token_expire_minutes,
            gemini_api_key: read(GEMINI_API_KEY),
            gemini_model: read(GEMINI_MODEL).unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            cors_origins,
        })
    }

    pub fn uses_default_secret(&self) -> bool {
        self.secret_key == DEFAULT_SECRET_KEY
    }

    /// Without a Gemini key every agent answers with canned text
    pub fn demo_mode(&self) -> bool {
        self.gemini_api_key.is_none()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn cors_header_values(&self) -> Vec<HeaderValue> {
        self.cors_origins
            .iter()
            .filter_map(|origin| HeaderValue::from_str(origin).ok())
            .collect()
    }
}

/// Comma-separated origin list; each entry must be a valid header value
fn parse_origins(raw: &str) -> Result<Vec<String>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            HeaderValue::from_str(origin)
                .map(|_| origin.trim_end_matches('/').to_string())
                .map_err(|_| ConfigError::InvalidCorsOrigin(origin.to_string()))
        })
        .collect()
}
