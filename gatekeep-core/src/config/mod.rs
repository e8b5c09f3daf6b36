//! Configuration management for Gatekeep Core

use anyhow::{anyhow, Context, Result};
use std::env;
use std::fmt;
use std::str::FromStr;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server host
    pub http_host: String,
    /// HTTP server port
    pub http_port: u16,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Password derivation configuration
    pub security: SecurityConfig,
    /// Per-request timeout applied by the HTTP layer
    pub request_timeout_secs: u64,
    /// Clear a dirty migration record and retry instead of aborting
    pub force_migration: bool,
    /// Logging and metrics configuration
    pub telemetry: TelemetryConfig,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// Process-wide secret used to derive stored password material
    pub secret_key: SecretKey,
    pub password_source: PasswordSource,
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// "json" or "pretty"
    pub log_format: String,
    pub metrics_enabled: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_format: "pretty".to_string(),
            metrics_enabled: false,
        }
    }
}

/// Secret value whose `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey(String);

impl SecretKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey([REDACTED])")
    }
}

/// Which value is hashed into a user's stored password.
///
/// `SecretKey` hashes the process-wide secret for every user and discards
/// the password supplied at registration. It is the default and matches the
/// behavior existing deployments rely on. `Supplied` hashes the caller's
/// password instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PasswordSource {
    #[default]
    SecretKey,
    Supplied,
}

impl FromStr for PasswordSource {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "secret_key" | "secret-key" => Ok(PasswordSource::SecretKey),
            "supplied" => Ok(PasswordSource::Supplied),
            other => Err(anyhow!(
                "unknown password source '{}', expected 'secret_key' or 'supplied'",
                other
            )),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            http_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            http_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("Invalid SERVER_PORT")?,
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").context("DATABASE_URL is required")?,
                max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()
                    .unwrap_or(10),
                min_connections: env::var("DATABASE_MIN_CONNECTIONS")
                    .unwrap_or_else(|_| "2".to_string())
                    .parse()
                    .unwrap_or(2),
            },
            security: SecurityConfig {
                secret_key: SecretKey::new(
                    env::var("SECRET_KEY").context("SECRET_KEY is required")?,
                ),
                password_source: env::var("PASSWORD_SOURCE")
                    .map(|value| value.parse())
                    .unwrap_or(Ok(PasswordSource::default()))
                    .context("Invalid PASSWORD_SOURCE")?,
            },
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .context("Invalid REQUEST_TIMEOUT_SECS")?,
            force_migration: env::var("FORCE_MIGRATION")
                .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
                .unwrap_or(false),
            telemetry: TelemetryConfig {
                log_format: env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),
                metrics_enabled: env::var("METRICS_ENABLED")
                    .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
                    .unwrap_or(false),
            },
        })
    }

    pub fn http_addr(&self) -> String {
        if self.http_host.contains(':') {
            format!("[{}]:{}", self.http_host, self.http_port)
        } else {
            format!("{}:{}", self.http_host, self.http_port)
        }
    }
}
