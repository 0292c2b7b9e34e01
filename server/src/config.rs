use std::env;
use std::net::SocketAddr;

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Runtime settings, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    /// Origin used for absolute URLs handed to clients (short links, redirects)
    pub public_base_url: String,
    pub db_pool_size: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let bind_addr = match lookup("BIND_ADDR") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                name: "BIND_ADDR",
                value,
            })?,
            None => SocketAddr::from(([0, 0, 0, 0], 3000)),
        };

        let public_base_url = lookup("PUBLIC_BASE_URL")
            .unwrap_or_else(|| "http://localhost:3000".to_string())
            .trim_end_matches('/')
            .to_string();

        let db_pool_size = match lookup("DB_POOL_SIZE") {
            Some(value) => match value.parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "DB_POOL_SIZE",
                        value,
                    })
                }
            },
            None => 10,
        };

        Ok(Config {
            database_url,
            bind_addr,
            public_base_url,
            db_pool_size,
        })
    }

    /// Absolute URL for a path on the public site, e.g. `/s/abc123`
    pub fn public_url(&self, path: &str) -> String {
        format!("{}{}", self.public_base_url, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[("DATABASE_URL", "postgres://localhost/foodgram")]).unwrap();
        assert_eq!(config.bind_addr.port(), 3000);
        assert_eq!(config.public_base_url, "http://localhost:3000");
        assert_eq!(config.db_pool_size, 10);
    }

    #[test]
    fn test_missing_database_url() {
        assert_eq!(
            config_from(&[]).unwrap_err(),
            ConfigError::Missing("DATABASE_URL")
        );
    }

    #[test]
    fn test_trailing_slash_stripped() {
        let config = config_from(&[
            ("DATABASE_URL", "postgres://db"),
            ("PUBLIC_BASE_URL", "https://foodgram.example/"),
        ])
        .unwrap();
        assert_eq!(
            config.public_url("/s/abc"),
            "https://foodgram.example/s/abc"
        );
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            config_from(&[("DATABASE_URL", "postgres://db"), ("BIND_ADDR", "nope")]),
            Err(ConfigError::Invalid {
                name: "BIND_ADDR",
                ..
            })
        ));
        assert!(matches!(
            config_from(&[("DATABASE_URL", "postgres://db"), ("DB_POOL_SIZE", "0")]),
            Err(ConfigError::Invalid {
                name: "DB_POOL_SIZE",
                ..
            })
        ));
    }
}
