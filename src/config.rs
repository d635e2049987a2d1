use std::env;

use thiserror::Error;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;
const DEFAULT_JWT_SECRET: &str = "change-me-in-production";
const ACCESS_TOKEN_MINUTES: i64 = 15;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has an invalid value: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub mongo_uri: String,
    pub database_name: Option<String>,
    pub jwt_secret: String,
    pub access_token_minutes: i64,
    pub bcrypt_cost: u32,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds settings from any key lookup so tests need not touch the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| HOST.to_string());
        let port = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(PORT);

        let mongo_uri = lookup("MONGODB_URI").ok_or(ConfigError::Missing("MONGODB_URI"))?;
        let database_name = lookup("DATABASE_NAME").filter(|name| !name.is_empty());

        let jwt_secret = match lookup("JWT_SECRET") {
            Some(secret) if !secret.is_empty() => secret,
            _ => {
                log::warn!("JWT_SECRET not set, falling back to an insecure default");
                DEFAULT_JWT_SECRET.to_string()
            }
        };

        let access_token_minutes = parse_or(&lookup, "ACCESS_TOKEN_MINUTES", ACCESS_TOKEN_MINUTES)?;
        if access_token_minutes <= 0 {
            return Err(ConfigError::Invalid {
                key: "ACCESS_TOKEN_MINUTES",
                value: access_token_minutes.to_string(),
            });
        }
        let bcrypt_cost = parse_or(&lookup, "BCRYPT_COST", bcrypt::DEFAULT_COST)?;

        Ok(Settings {
            host,
            port,
            mongo_uri,
            database_name,
            jwt_secret,
            access_token_minutes,
            bcrypt_cost,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(pairs: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let s = settings(&[("MONGODB_URI", "mongodb://localhost:27017/backend_api_db")]).unwrap();
        assert_eq!(s.host, "0.0.0.0");
        assert_eq!(s.port, 8080);
        assert_eq!(s.access_token_minutes, 15);
        assert_eq!(s.bcrypt_cost, bcrypt::DEFAULT_COST);
        assert!(s.database_name.is_none());
    }

    #[test]
    fn test_mongo_uri_is_required() {
        assert_eq!(
            settings(&[]).unwrap_err(),
            ConfigError::Missing("MONGODB_URI")
        );
    }

    #[test]
    fn test_unparseable_port_falls_back() {
        let s = settings(&[("MONGODB_URI", "mongodb://x"), ("PORT", "http")]).unwrap();
        assert_eq!(s.port, 8080);
    }

    #[test]
    fn test_invalid_token_lifetime() {
        let err = settings(&[("MONGODB_URI", "mongodb://x"), ("ACCESS_TOKEN_MINUTES", "soon")])
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "ACCESS_TOKEN_MINUTES", .. }));

        let err = settings(&[("MONGODB_URI", "mongodb://x"), ("ACCESS_TOKEN_MINUTES", "0")])
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }
}
