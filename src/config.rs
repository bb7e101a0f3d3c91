// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names, default values, and the
//! [`AppConfig`] loaded from them once at startup. Nothing here is re-read or
//! mutated after the first request is served.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `4000` |
//! | `APP_ENV` | Application environment (`development` or `production`) | `development` |
//! | `JWT_SECRET` | HS256 signing secret for bearer tokens | Required |
//! | `AUTH_DOMAIN` | Token issuer and audience | `mydomain.com` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::fmt;

use thiserror::Error;

use crate::auth::AuthSettings;

/// Environment variable name for the server bind address.
pub const HOST_ENV: &str = "HOST";

/// Environment variable name for the server bind port.
pub const PORT_ENV: &str = "PORT";

/// Environment variable name for the application environment.
pub const APP_ENV_ENV: &str = "APP_ENV";

/// Environment variable name for the token signing secret.
///
/// The value is never logged. An empty or missing value aborts startup.
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";

/// Environment variable name for the issuer/audience domain.
pub const AUTH_DOMAIN_ENV: &str = "AUTH_DOMAIN";

/// Environment variable name for the log output format.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 4000;
pub const DEFAULT_AUTH_DOMAIN: &str = "mydomain.com";

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

/// Startup configuration failures.
///
/// These are the only errors allowed to terminate the process, and only
/// before the listener is bound.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("JWT_SECRET must be set to a non-empty value")]
    MissingSecret,
    #[error("AUTH_DOMAIN must not be empty")]
    EmptyDomain,
    #[error("invalid PORT value '{0}'")]
    InvalidPort(String),
    #[error("invalid APP_ENV value '{0}' (expected development or production)")]
    InvalidEnvironment(String),
}

/// Deployment environment reported by `/status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }

    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(ConfigError::InvalidEnvironment(value.to_string())),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

impl LogFormat {
    /// Read `LOG_FORMAT`. Unknown values fall back to pretty output.
    pub fn from_env() -> Self {
        Self::parse(std::env::var(LOG_FORMAT_ENV).ok().as_deref())
    }

    fn parse(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()) {
            Some(v) if v == "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub auth: AuthSettings,
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup(PORT_ENV) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let environment = match lookup(APP_ENV_ENV) {
            Some(raw) => Environment::parse(&raw)?,
            None => Environment::default(),
        };

        let secret = lookup(JWT_SECRET_ENV).unwrap_or_default();
        let domain = lookup(AUTH_DOMAIN_ENV).unwrap_or_else(|| DEFAULT_AUTH_DOMAIN.to_string());
        let auth = AuthSettings::new(secret, domain)?;

        Ok(Self {
            host,
            port,
            environment,
            auth,
        })
    }

    /// `host:port` string for binding the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_only_secret_is_set() {
        let config = AppConfig::from_lookup(lookup_from(&[(JWT_SECRET_ENV, "s3cret")])).unwrap();
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.auth.domain(), DEFAULT_AUTH_DOMAIN);
        assert_eq!(config.bind_address(), "0.0.0.0:4000");
    }

    #[test]
    fn missing_secret_is_fatal() {
        let err = AppConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert_eq!(err, ConfigError::MissingSecret);
    }

    #[test]
    fn blank_secret_is_fatal() {
        let err = AppConfig::from_lookup(lookup_from(&[(JWT_SECRET_ENV, "   ")])).unwrap_err();
        assert_eq!(err, ConfigError::MissingSecret);
    }

    #[test]
    fn invalid_port_is_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[
            (JWT_SECRET_ENV, "s3cret"),
            (PORT_ENV, "http"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::InvalidPort("http".to_string()));
    }

    #[test]
    fn environment_parses_production() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (JWT_SECRET_ENV, "s3cret"),
            (APP_ENV_ENV, "Production"),
            (AUTH_DOMAIN_ENV, "movies.example"),
        ]))
        .unwrap();
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.auth.domain(), "movies.example");
    }

    #[test]
    fn unknown_environment_is_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[
            (JWT_SECRET_ENV, "s3cret"),
            (APP_ENV_ENV, "staging"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvironment(_)));
    }

    #[test]
    fn log_format_defaults_to_pretty() {
        assert_eq!(LogFormat::parse(None), LogFormat::Pretty);
        assert_eq!(LogFormat::parse(Some("JSON")), LogFormat::Json);
        assert_eq!(LogFormat::parse(Some("xml")), LogFormat::Pretty);
    }

    #[test]
    fn debug_output_never_contains_secret() {
        let config =
            AppConfig::from_lookup(lookup_from(&[(JWT_SECRET_ENV, "super-secret-value")])).unwrap();
        assert!(!format!("{config:?}").contains("super-secret-value"));
    }
}
