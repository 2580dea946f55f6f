use crate::error::AppError;
use std::env;

pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

/// Hosting environment, mirrors the usual development/production split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    fn parse(value: &str) -> Result<Self, AppError> {
        match value.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(AppError::Configuration(format!(
                "APP_ENV must be 'development' or 'production', got '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// The `TodoDb` connection string.
    pub database_url: String,
    pub database_max_connections: u32,
    pub run_migrations: bool,
    /// Secret the JWT signing key is derived from.
    pub app_secret: String,
    pub environment: Environment,
    pub server_port: u16,
    pub server_host: String,
    pub cors_allowed_origin: String,
    /// When set, plain-HTTP requests are redirected to this port.
    pub https_port: Option<u16>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_vars<F>(var: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            var(key)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| AppError::Configuration(format!("{} must be set", key)))
        };

        Ok(Self {
            database_url: required("TODO_DB")?,
            database_max_connections: parse_or(
                "TODO_DB_MAX_CONNECTIONS",
                var("TODO_DB_MAX_CONNECTIONS"),
                5,
            )?,
            run_migrations: parse_or("TODO_DB_MIGRATE", var("TODO_DB_MIGRATE"), true)?,
            app_secret: required("APP_SECRET")?,
            environment: match var("APP_ENV") {
                Some(value) => Environment::parse(&value)?,
                None => Environment::Production,
            },
            server_port: parse_or("SERVER_PORT", var("SERVER_PORT"), 8080)?,
            server_host: var("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            cors_allowed_origin: var("CORS_ALLOWED_ORIGIN")
                .unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string()),
            https_port: var("HTTPS_PORT")
                .map(|value| parse_value("HTTPS_PORT", &value))
                .transpose()?,
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, AppError> {
    value
        .trim()
        .parse()
        .map_err(|_| AppError::Configuration(format!("{} has an invalid value '{}'", key, value)))
}

fn parse_or<T: std::str::FromStr>(
    key: &str,
    value: Option<String>,
    default: T,
) -> Result<T, AppError> {
    match value {
        Some(value) => parse_value(key, &value),
        None => Ok(default),
    }
}
