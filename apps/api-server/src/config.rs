//! Application configuration loaded from environment variables.

use std::env;

use blog_infra::DatabaseConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: var("SERVER_PORT")
                .or_else(|| var("PORT"))
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database: database_from(&var),
        }
    }
}

/// `DATABASE_URL` wins; otherwise a URL is assembled from `DB_*` parts
/// when `DB_HOST` is set. `None` means in-memory storage.
fn database_from(var: &impl Fn(&str) -> Option<String>) -> Option<DatabaseConfig> {
    let url = var("DATABASE_URL").or_else(|| {
        let host = var("DB_HOST")?;
        Some(DatabaseConfig::postgres_url(
            &host,
            parse_or(var, "DB_PORT", 5432),
            &var("DB_USER").unwrap_or_else(|| "postgres".to_string()),
            &var("DB_PASSWORD").unwrap_or_else(|| "password".to_string()),
            &var("DB_NAME").unwrap_or_else(|| "blog_management".to_string()),
        ))
    })?;

    let mut config = DatabaseConfig::new(url);
    config.max_connections = parse_or(var, "DB_MAX_CONNECTIONS", config.max_connections);
    config.min_connections = parse_or(var, "DB_MIN_CONNECTIONS", config.min_connections);
    config.auto_migrate = var("DB_AUTO_MIGRATE")
        .map(|v| v != "false" && v != "0")
        .unwrap_or(true);

    Some(config)
}

fn parse_or<T: std::str::FromStr>(
    var: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> T {
    var(key).and_then(|s| s.parse().ok()).unwrap_or(default)
}
