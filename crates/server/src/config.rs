use chrono::{TimeDelta, Utc};
use models::conflict::ConflictRule;
use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_TOKEN_MINUTES: i64 = 15;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has an invalid value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Server settings read from the environment
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub secret_key: String,
    pub access_token_ttl: TimeDelta,
    pub database_url: String,
    pub conflict_rule: ConflictRule,
}

impl Config {
    /// Loads `.env` if present, then reads the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                log::warn!("Ignoring unreadable .env file: {e}");
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let port = match lookup("SERVER_PORT") {
            Some(value) => parse(&value, "SERVER_PORT")?,
            None => DEFAULT_PORT,
        };
        let minutes = match lookup("ACCESS_TOKEN_EXPIRE_MINUTES") {
            Some(value) => parse::<i64>(&value, "ACCESS_TOKEN_EXPIRE_MINUTES")?,
            None => DEFAULT_TOKEN_MINUTES,
        };
        // Tokens must get a representable expiry date
        let access_token_ttl = TimeDelta::try_minutes(minutes)
            .filter(|ttl| Utc::now().checked_add_signed(*ttl).is_some())
            .ok_or_else(|| ConfigError::Invalid {
                key: "ACCESS_TOKEN_EXPIRE_MINUTES",
                value: minutes.to_string(),
                reason: "out of range".to_string(),
            })?;
        let conflict_rule = match lookup("RESERVATION_CONFLICT_RULE") {
            Some(value) => parse(&value, "RESERVATION_CONFLICT_RULE")?,
            None => ConflictRule::default(),
        };

        Ok(Self {
            host: lookup("SERVER_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            secret_key: required("SECRET_KEY")?,
            access_token_ttl,
            database_url: required("DATABASE_URL")?,
            conflict_rule,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse<T>(value: &str, key: &'static str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[("SECRET_KEY", "s3cret"), ("DATABASE_URL", "sqlite::memory:")])
            .unwrap();

        assert_eq!(config.bind_address(), "0.0.0.0:3000");
        assert_eq!(config.access_token_ttl, TimeDelta::minutes(15));
        assert_eq!(config.conflict_rule, ConflictRule::EndpointMatch);
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("SECRET_KEY", "s3cret"),
            ("DATABASE_URL", "postgres://localhost/rooms"),
            ("SERVER_HOST", "127.0.0.1"),
            ("SERVER_PORT", "8080"),
            ("ACCESS_TOKEN_EXPIRE_MINUTES", "60"),
            ("RESERVATION_CONFLICT_RULE", "overlap"),
        ])
        .unwrap();

        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.access_token_ttl, TimeDelta::hours(1));
        assert_eq!(config.conflict_rule, ConflictRule::Overlap);
    }

    #[test]
    fn test_missing_secret() {
        let err = config(&[("DATABASE_URL", "sqlite::memory:")]).unwrap_err();
        assert_eq!(err, ConfigError::Missing("SECRET_KEY"));

        let err = config(&[("SECRET_KEY", "  "), ("DATABASE_URL", "sqlite::memory:")])
            .unwrap_err();
        assert_eq!(err, ConfigError::Missing("SECRET_KEY"));
    }

    #[test]
    fn test_invalid_values() {
        let err = config(&[
            ("SECRET_KEY", "s3cret"),
            ("DATABASE_URL", "sqlite::memory:"),
            ("SERVER_PORT", "http"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "SERVER_PORT", .. }));

        let err = config(&[
            ("SECRET_KEY", "s3cret"),
            ("DATABASE_URL", "sqlite::memory:"),
            ("RESERVATION_CONFLICT_RULE", "strict"),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: "RESERVATION_CONFLICT_RULE",
                ..
            }
        ));
    }

    #[test]
    fn test_token_lifetime_past_calendar_range() {
        let err = config(&[
            ("SECRET_KEY", "s3cret"),
            ("DATABASE_URL", "sqlite::memory:"),
            ("ACCESS_TOKEN_EXPIRE_MINUTES", "200000000000"),
        ])
        .unwrap_err();

        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: "ACCESS_TOKEN_EXPIRE_MINUTES",
                ..
            }
        ));
    }
}
