// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names, default values and the
//! immutable [`AppConfig`] built from them. Configuration is loaded from the
//! environment once at startup and handed to the token issuer and validator;
//! nothing mutates it afterwards. Changing the signing key therefore needs a
//! restart, which also invalidates every token signed with the old key.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `JWT_KEY` | HMAC-SHA256 signing secret | empty (warned) |
//! | `JWT_ISSUER` | `iss` claim placed in issued tokens | none |
//! | `JWT_AUDIENCE` | `aud` claim placed in issued tokens | none |
//! | `JWT_EXPIRATION_MINUTES` | Token lifetime in minutes | `60` |
//! | `ACCOUNT_USERNAME` | The single allowed login name | unset |
//! | `ACCOUNT_PASSWORD` | The single allowed password | unset |
//! | `AUTH_BYPASS_PATHS` | Comma-separated unauthenticated path prefixes | `/api/v1/login,/docs,/api-doc` |
//! | `AUTH_REASON_DETAIL` | `detailed` or `generic` rejection reasons | `detailed` |
//! | `AUTH_VALIDATE_LIFETIME` | Library-level expiry validation | `true` |
//! | `AUTH_VALIDATE_ISSUER` | Check `iss` against `JWT_ISSUER` | `false` |
//! | `AUTH_VALIDATE_AUDIENCE` | Check `aud` against `JWT_AUDIENCE` | `false` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |
//! | `SEED_CLASSES` | Comma-separated class names created at startup | none |

use std::{env, fmt, net::SocketAddr, str::FromStr};

pub const JWT_KEY_ENV: &str = "JWT_KEY";
pub const JWT_ISSUER_ENV: &str = "JWT_ISSUER";
pub const JWT_AUDIENCE_ENV: &str = "JWT_AUDIENCE";
pub const JWT_EXPIRATION_MINUTES_ENV: &str = "JWT_EXPIRATION_MINUTES";
pub const ACCOUNT_USERNAME_ENV: &str = "ACCOUNT_USERNAME";
pub const ACCOUNT_PASSWORD_ENV: &str = "ACCOUNT_PASSWORD";
pub const AUTH_BYPASS_PATHS_ENV: &str = "AUTH_BYPASS_PATHS";
pub const AUTH_REASON_DETAIL_ENV: &str = "AUTH_REASON_DETAIL";
pub const AUTH_VALIDATE_LIFETIME_ENV: &str = "AUTH_VALIDATE_LIFETIME";
pub const AUTH_VALIDATE_ISSUER_ENV: &str = "AUTH_VALIDATE_ISSUER";
pub const AUTH_VALIDATE_AUDIENCE_ENV: &str = "AUTH_VALIDATE_AUDIENCE";
pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";
pub const SEED_CLASSES_ENV: &str = "SEED_CLASSES";

/// Token lifetime used when `JWT_EXPIRATION_MINUTES` is unset.
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 60;

/// Paths reachable without a token: the login endpoint and the API docs.
pub const DEFAULT_BYPASS_PATHS: &[&str] = &["/api/v1/login", "/docs", "/api-doc"];

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

/// Default `RUST_LOG` filter when none is set.
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

/// Configuration loading error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {var}: {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(var: &'static str, value: &str, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            var,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Token signing parameters shared by the issuer and the validator.
#[derive(Clone)]
pub struct SigningConfig {
    /// HMAC-SHA256 secret. An empty key is accepted but makes signatures
    /// meaningless.
    pub secret_key: Vec<u8>,
    pub issuer: Option<String>,
    pub audience: Option<String>,
    /// Always greater than zero.
    pub expiration_minutes: i64,
}

impl fmt::Debug for SigningConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningConfig")
            .field("secret_key", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("expiration_minutes", &self.expiration_minutes)
            .finish()
    }
}

/// The single account allowed to log in.
///
/// Both fields are compared verbatim (case-sensitive, no hashing). An unset
/// field only matches a login request that omits the same field.
#[derive(Clone, Default)]
pub struct Credentials {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
        }
    }

    /// Exact equality against both configured fields.
    pub fn matches(&self, username: Option<&str>, password: Option<&str>) -> bool {
        self.username.as_deref() == username && self.password.as_deref() == password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// How much detail a 401 body carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReasonDetail {
    /// Expired, bad signature and malformed tokens are reported separately.
    #[default]
    Detailed,
    /// Every library-level failure is reported as a plain invalid token.
    Generic,
}

impl FromStr for ReasonDetail {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "detailed" => Ok(ReasonDetail::Detailed),
            "generic" => Ok(ReasonDetail::Generic),
            _ => Err("expected `detailed` or `generic`".to_string()),
        }
    }
}

/// Gateway behaviour knobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Path prefixes admitted without a token.
    pub bypass_paths: Vec<String>,
    pub reason_detail: ReasonDetail,
    /// Let the JWT library enforce `exp`. The gateway's own expiry check
    /// runs regardless.
    pub validate_lifetime: bool,
    pub validate_issuer: bool,
    pub validate_audience: bool,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bypass_paths: DEFAULT_BYPASS_PATHS.iter().map(|p| p.to_string()).collect(),
            reason_detail: ReasonDetail::Detailed,
            validate_lifetime: true,
            validate_issuer: false,
            validate_audience: false,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            _ => Err("expected `json` or `pretty`".to_string()),
        }
    }
}

/// Process-wide configuration, constructed once in `main`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub signing: SigningConfig,
    pub credentials: Credentials,
    pub gateway: GatewayConfig,
    pub host: String,
    pub port: u16,
    pub log_format: LogFormat,
    /// Class names inserted into the record store at startup.
    pub seed_classes: Vec<String>,
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let expiration_minutes = match lookup(JWT_EXPIRATION_MINUTES_ENV) {
            Some(raw) => {
                let minutes: i64 = raw.trim().parse().map_err(|_| {
                    ConfigError::invalid(JWT_EXPIRATION_MINUTES_ENV, &raw, "not an integer")
                })?;
                if minutes <= 0 {
                    return Err(ConfigError::invalid(
                        JWT_EXPIRATION_MINUTES_ENV,
                        &raw,
                        "must be greater than zero",
                    ));
                }
                minutes
            }
            None => DEFAULT_EXPIRATION_MINUTES,
        };

        let signing = SigningConfig {
            secret_key: lookup(JWT_KEY_ENV).unwrap_or_default().into_bytes(),
            issuer: non_empty(lookup(JWT_ISSUER_ENV)),
            audience: non_empty(lookup(JWT_AUDIENCE_ENV)),
            expiration_minutes,
        };

        let credentials = Credentials {
            username: lookup(ACCOUNT_USERNAME_ENV),
            password: lookup(ACCOUNT_PASSWORD_ENV),
        };

        let defaults = GatewayConfig::default();
        let gateway = GatewayConfig {
            bypass_paths: lookup(AUTH_BYPASS_PATHS_ENV)
                .map(|raw| split_list(&raw))
                .unwrap_or(defaults.bypass_paths),
            reason_detail: parse_or(
                &lookup,
                AUTH_REASON_DETAIL_ENV,
                defaults.reason_detail,
            )?,
            validate_lifetime: parse_bool_or(
                &lookup,
                AUTH_VALIDATE_LIFETIME_ENV,
                defaults.validate_lifetime,
            )?,
            validate_issuer: parse_bool_or(
                &lookup,
                AUTH_VALIDATE_ISSUER_ENV,
                defaults.validate_issuer,
            )?,
            validate_audience: parse_bool_or(
                &lookup,
                AUTH_VALIDATE_AUDIENCE_ENV,
                defaults.validate_audience,
            )?,
        };

        let port = match lookup(PORT_ENV) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::invalid(PORT_ENV, &raw, "not a valid port"))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            signing,
            credentials,
            gateway,
            host: lookup(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            log_format: parse_or(&lookup, LOG_FORMAT_ENV, LogFormat::default())?,
            seed_classes: lookup(SEED_CLASSES_ENV)
                .map(|raw| split_list(&raw))
                .unwrap_or_default(),
        })
    }

    /// Socket address the server binds to.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse()
            .map_err(|_| ConfigError::invalid(HOST_ENV, &self.host, "not a valid bind address"))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_or<T, F>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr<Err = String>,
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        Some(raw) => raw
            .parse()
            .map_err(|reason: String| ConfigError::invalid(var, &raw, reason)),
        None => Ok(default),
    }
}

fn parse_bool_or<F>(lookup: &F, var: &'static str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            _ => Err(ConfigError::invalid(var, &raw, "expected a boolean")),
        },
        None => Ok(default),
    }
}

/// Fixed configuration for unit tests across the crate.
#[cfg(test)]
pub fn test_config() -> AppConfig {
    AppConfig {
        signing: SigningConfig {
            secret_key: b"classroom-test-secret".to_vec(),
            issuer: Some("classroom-api".to_string()),
            audience: Some("classroom-clients".to_string()),
            expiration_minutes: 30,
        },
        credentials: Credentials::new("admin", "P@ssw0rd"),
        gateway: GatewayConfig::default(),
        host: DEFAULT_HOST.to_string(),
        port: DEFAULT_PORT,
        log_format: LogFormat::Pretty,
        seed_classes: Vec::new(),
    }
}
