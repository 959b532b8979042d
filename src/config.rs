use axum::http::HeaderValue;
use std::env;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Runtime settings, read from the environment (and `.env` via dotenv).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub cors_origin: HeaderValue,
    pub session_secure: bool,
    pub session_ttl_hours: i64,
    pub bcrypt_cost: u32,
    pub db_pool_size: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// In-memory database and the cheapest bcrypt cost.
    pub fn for_tests() -> Self {
        Self {
            database_url: ":memory:".to_string(),
            bind_addr: "127.0.0.1:0".to_string(),
            cors_origin: HeaderValue::from_static("http://localhost:9999"),
            session_secure: false,
            session_ttl_hours: 1,
            bcrypt_cost: 4,
            db_pool_size: 1,
        }
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| "flashcards.db".into());
        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| "127.0.0.1:8000".into());

        let origin = lookup("CORS_ORIGIN").unwrap_or_else(|| "http://localhost:9999".into());
        let cors_origin = HeaderValue::from_str(&origin).map_err(|_| ConfigError::InvalidValue {
            key: "CORS_ORIGIN",
            value: origin.clone(),
        })?;

        let session_secure = parse_or("SESSION_SECURE", lookup("SESSION_SECURE"), false)?;
        let session_ttl_hours = parse_or("SESSION_TTL_HOURS", lookup("SESSION_TTL_HOURS"), 24i64)?;
        if session_ttl_hours <= 0 {
            return Err(ConfigError::InvalidValue {
                key: "SESSION_TTL_HOURS",
                value: session_ttl_hours.to_string(),
            });
        }

        let bcrypt_cost = parse_or("BCRYPT_COST", lookup("BCRYPT_COST"), bcrypt::DEFAULT_COST)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                key: "BCRYPT_COST",
                value: bcrypt_cost.to_string(),
            });
        }

        let db_pool_size = parse_or("DB_POOL_SIZE", lookup("DB_POOL_SIZE"), 8u32)?;
        if db_pool_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "DB_POOL_SIZE",
                value: "0".into(),
            });
        }

        Ok(Self {
            database_url,
            bind_addr,
            cors_origin,
            session_secure,
            session_ttl_hours,
            bcrypt_cost,
            db_pool_size,
        })
    }
}

fn parse_or<T: FromStr>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
    }
}
