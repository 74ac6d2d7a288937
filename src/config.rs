use std::env;

use crate::errors::ServerError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_POOL_SIZE: u32 = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres { database_url: String, pool_size: u32 },
    Memory,
}

/// Read-only settings, loaded once at startup and handed to whoever needs them.
#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub store: StoreBackend,
}

impl Config {
    pub fn from_env() -> Result<Self, ServerError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ServerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = lookup("PORT")
            .ok_or_else(|| ServerError::EnvironmentError("PORT is not set".to_string()))?
            .parse::<u16>()
            .map_err(|_| ServerError::EnvironmentError("PORT must be a port number".to_string()))?;
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let store = match lookup("NOTE_STORE").as_deref() {
            None | Some("postgres") => {
                let database_url = lookup("DATABASE_URL").ok_or_else(|| {
                    ServerError::EnvironmentError("DATABASE_URL is not set".to_string())
                })?;
                let pool_size = match lookup("DATABASE_POOL_SIZE") {
                    Some(size) => size.parse::<u32>().ok().filter(|n| *n > 0).ok_or_else(|| {
                        ServerError::EnvironmentError(
                            "DATABASE_POOL_SIZE must be a positive integer".to_string(),
                        )
                    })?,
                    None => DEFAULT_POOL_SIZE,
                };
                StoreBackend::Postgres {
                    database_url,
                    pool_size,
                }
            }
            Some("memory") => StoreBackend::Memory,
            Some(other) => {
                return Err(ServerError::EnvironmentError(format!(
                    "NOTE_STORE must be postgres or memory, got {other}"
                )))
            }
        };

        Ok(Config { host, port, store })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ServerError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn postgres_is_the_default_store() {
        let config = load(&[("PORT", "8080"), ("DATABASE_URL", "postgres://localhost/notes")])
            .unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(
            config.store,
            StoreBackend::Postgres {
                database_url: "postgres://localhost/notes".to_string(),
                pool_size: 10,
            }
        );
    }

    #[test]
    fn memory_store_needs_no_database() {
        let config = load(&[("PORT", "80"), ("NOTE_STORE", "memory"), ("HOST", "127.0.0.1")])
            .unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.store, StoreBackend::Memory);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(load(&[]).is_err());
        assert!(load(&[("PORT", "eighty")]).is_err());
        assert!(load(&[("PORT", "80")]).is_err());
        assert!(load(&[("PORT", "80"), ("NOTE_STORE", "redis")]).is_err());
        assert!(load(&[
            ("PORT", "80"),
            ("DATABASE_URL", "postgres://x"),
            ("DATABASE_POOL_SIZE", "0"),
        ])
        .is_err());
    }
}
