//! Configuration management for user_routes
//!
//! Settings come from the process environment (after `.env` has been loaded
//! by `main`), on top of the defaults in [`AppConfig::default`].

use crate::types::{AppConfig, StartupError};
use ::config::{Config, ConfigError, Environment};
use actix_web::http::Uri;

impl From<ConfigError> for StartupError {
    fn from(error: ConfigError) -> Self {
        StartupError::Config(error.to_string())
    }
}

/// Load the app configuration from the environment
pub fn load_config() -> Result<AppConfig, StartupError> {
    build_config(Environment::default())
}

fn build_config(environment: Environment) -> Result<AppConfig, StartupError> {
    let defaults = AppConfig::default();

    // 1. Defaults, then the environment on top
    let settings = Config::builder()
        .set_default("bind_address", defaults.bind_address)?
        .set_default("database_max_connections", defaults.database_max_connections as u64)?
        .set_default("jwt_secret", defaults.jwt_secret)?
        .set_default("cors_origins", defaults.cors_origins)?
        .set_default("log_level", defaults.log_level)?
        .add_source(environment.try_parsing(true))
        .build()?;

    // 2. Into the typed config
    let config: AppConfig = settings.try_deserialize()?;

    // 3. Validate
    validate_config(&config)?;

    Ok(config)
}

fn validate_config(config: &AppConfig) -> Result<(), StartupError> {
    if config.jwt_secret.trim().is_empty() {
        return Err(StartupError::Config("JWT_SECRET must be set".to_string()));
    }

    if config.database_url.as_deref().is_some_and(|url| url.trim().is_empty()) {
        return Err(StartupError::Config("DATABASE_URL can't be empty when set".to_string()));
    }

    if config.database_max_connections == 0 {
        return Err(StartupError::Config(
            "DATABASE_MAX_CONNECTIONS must be at least 1".to_string(),
        ));
    }

    if config.workers == Some(0) {
        return Err(StartupError::Config("WORKERS must be at least 1".to_string()));
    }

    // actix-cors panics at worker start on an origin it can't parse
    for origin in config.cors_origin_list().iter().filter(|origin| *origin != "*") {
        if origin.parse::<Uri>().is_err() {
            return Err(StartupError::Config(format!("CORS_ORIGINS has an invalid origin: {origin}")));
        }
    }

    Ok(())
}
