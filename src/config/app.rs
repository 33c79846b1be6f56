use anyhow::{anyhow, Result};
use std::env;
use std::str::FromStr;

use super::env_or;

/// Which persistence engine backs the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" | "in-memory" => Ok(StoreBackend::Memory),
            other => Err(anyhow!(
                "Unknown STORE_BACKEND '{}'. Must be one of: postgres, memory",
                other
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub log_level: String,
    pub store_backend: StoreBackend,
    pub seed_database: bool,
    pub max_picture_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            environment: "development".to_string(),
            log_level: "info".to_string(),
            store_backend: StoreBackend::Postgres,
            seed_database: false,
            max_picture_bytes: 5 * 1024 * 1024,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = AppConfig::default();

        let store_backend = match env::var("STORE_BACKEND") {
            Ok(value) => value.parse()?,
            Err(_) => defaults.store_backend,
        };
        let seed_database = env::var("SEED_DATABASE")
            .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(defaults.seed_database);

        Ok(AppConfig {
            host: env_or("HOST", defaults.host),
            port: env_or("PORT", defaults.port),
            environment: env_or("ENVIRONMENT", defaults.environment),
            log_level: env_or("LOG_LEVEL", defaults.log_level),
            store_backend,
            seed_database,
            max_picture_bytes: env_or("MAX_PICTURE_BYTES", defaults.max_picture_bytes),
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The in-memory store starts empty, so it is always seeded.
    pub fn should_seed(&self) -> bool {
        self.seed_database || self.store_backend == StoreBackend::Memory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_backend_parsing() {
        assert_eq!("postgres".parse::<StoreBackend>().unwrap(), StoreBackend::Postgres);
        assert_eq!("Memory".parse::<StoreBackend>().unwrap(), StoreBackend::Memory);
        assert!("sqlite".parse::<StoreBackend>().is_err());
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server_address(), "0.0.0.0:8080");
        assert!(config.is_development());
        assert!(!config.should_seed());

        let memory = AppConfig {
            store_backend: StoreBackend::Memory,
            ..AppConfig::default()
        };
        assert!(memory.should_seed());
    }
}
