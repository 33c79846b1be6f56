// Environment-driven configuration and catalog seeding

pub mod app;
pub mod database;
pub mod seeding;

use std::env;
use std::str::FromStr;

pub use app::{AppConfig, StoreBackend};
pub use database::{run_migrations, DatabaseConfig};
pub use seeding::DatabaseSeeder;

/// Reads `key` from the environment, falling back to `default` when it is
/// unset or does not parse.
pub(crate) fn env_or<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(value) => value.parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring unparsable {}={:?}", key, value);
            default
        }),
        Err(_) => default,
    }
}
