// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables, deployment modes, and runtime configuration parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Pantry Contributors

//! Environment-based configuration management for production deployment

use crate::constants::{auth as auth_constants, service_names};
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::PathBuf;
use tracing::{info, warn};

/// Default HTTP port
const DEFAULT_HTTP_PORT: u16 = 8080;
/// Default database location
pub const DEFAULT_DATABASE_URL: &str = "sqlite:./data/smart_pantry.db";
/// Frontend origin allowed by default
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000";
/// Default Gemini model
const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
/// Gemini REST endpoint
const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Strongly typed log level configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    #[default]
    Info,
    /// Debug output
    Debug,
    /// Everything
    Trace,
}

impl LogLevel {
    /// Convert to `tracing::Level`
    #[must_use]
    pub const fn to_tracing_level(&self) -> tracing::Level {
        match self {
            Self::Error => tracing::Level::ERROR,
            Self::Warn => tracing::Level::WARN,
            Self::Info => tracing::Level::INFO,
            Self::Debug => tracing::Level::DEBUG,
            Self::Trace => tracing::Level::TRACE,
        }
    }

    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Environment type for security and other configurations
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Deployed service
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    /// Check if this is a development environment
    #[must_use]
    pub const fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    /// Check if this is a testing environment
    #[must_use]
    pub const fn is_testing(&self) -> bool {
        matches!(self, Self::Testing)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Type-safe database location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum DatabaseUrl {
    /// `SQLite` database with file path
    SQLite {
        /// Path of the database file
        path: PathBuf,
    },
    /// In-memory `SQLite` (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse from string with validation
    ///
    /// # Errors
    ///
    /// Returns an error if the URL names a database engine other than `SQLite`
    ///
    /// Query parameters such as `?mode=rwc` are dropped; the pool sets its
    /// own open mode.
    pub fn parse_url(s: &str) -> Result<Self> {
        if let Some(path_str) = s.strip_prefix("sqlite:") {
            let path_str = path_str.strip_prefix("//").unwrap_or(path_str);
            let path_str = path_str.split_once('?').map_or(path_str, |(path, _)| path);
            if path_str == ":memory:" {
                Ok(Self::Memory)
            } else {
                Ok(Self::SQLite {
                    path: PathBuf::from(path_str),
                })
            }
        } else if s.contains("://") {
            Err(anyhow!("Unsupported database URL scheme: {s}"))
        } else {
            // Bare path: treat as SQLite file
            Ok(Self::SQLite {
                path: PathBuf::from(s),
            })
        }
    }

    /// Convert to connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".to_owned(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::SQLite {
            path: PathBuf::from("./data/smart_pantry.db"),
        }
    }
}

impl fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Server configuration loaded from the environment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP API port
    pub http_port: u16,
    /// Bind address
    pub host: String,
    /// Deployment environment
    pub environment: Environment,
    /// Log level
    pub log_level: LogLevel,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Authentication configuration
    pub auth: AuthConfig,
    /// Cookie, CSRF, and header settings
    pub security: SecurityConfig,
    /// Cross-origin settings
    pub cors: CorsConfig,
    /// Language model settings
    pub llm: LlmConfig,
    /// HTTP transport limits
    pub http: HttpConfig,
    /// Service name reported in logs and health checks
    pub service_name: String,
    /// Service version (from Cargo.toml)
    pub service_version: String,
}

/// Database settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL (`SQLite` path or in-memory)
    pub url: DatabaseUrl,
    /// Maximum pooled connections
    pub max_connections: u32,
}

/// Token and password hashing settings
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HS256 signing secret
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    /// Access token lifetime in hours
    pub access_token_expiry_hours: i64,
    /// Refresh token lifetime in days
    pub refresh_token_expiry_days: i64,
    /// Lifetime of the `token` cookie in hours
    pub cookie_max_age_hours: i64,
    /// bcrypt work factor
    pub bcrypt_cost: u32,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("access_token_expiry_hours", &self.access_token_expiry_hours)
            .field("refresh_token_expiry_days", &self.refresh_token_expiry_days)
            .field("cookie_max_age_hours", &self.cookie_max_age_hours)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

/// Cookie, CSRF, and security header settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Mark cookies `Secure` (and `SameSite=None` for the auth cookie)
    pub cookie_secure: bool,
    /// Optional cookie `Domain` attribute
    pub cookie_domain: Option<String>,
    /// Enforce CSRF tokens on state-changing requests
    pub csrf_enabled: bool,
    /// Send `Strict-Transport-Security`
    pub hsts_enabled: bool,
}

/// Cross-origin settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated origins, or `*`
    pub allowed_origins: String,
    /// Frontend origin appended to the allowed list
    pub frontend_url: Option<String>,
}

impl CorsConfig {
    /// All allowed origins, frontend URL included, without duplicates
    #[must_use]
    pub fn origins(&self) -> Vec<String> {
        let mut origins = parse_origins(&self.allowed_origins);
        if let Some(frontend) = self.frontend_url.as_deref() {
            let frontend = frontend.trim().trim_end_matches('/');
            if !frontend.is_empty() && !origins.iter().any(|o| o == frontend) {
                origins.push(frontend.to_owned());
            }
        }
        origins
    }

    /// Whether any origin is allowed
    #[must_use]
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.trim() == "*"
    }
}

/// Language model settings
#[derive(Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Gemini API key; recipe suggestions fall back to a fixed message without it
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Model name
    pub model: String,
    /// REST base URL
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// HTTP transport limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Maximum request body size in bytes
    pub body_limit_bytes: usize,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric or boolean variable cannot be parsed, or
    /// if `SECRET` is missing in production
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists
        if let Err(e) = dotenvy::dotenv() {
            warn!("No .env file found or failed to load: {}", e);
        }

        info!("Loading configuration from environment variables");

        let environment = Environment::from_str_or_default(&env_var_or("ENVIRONMENT", "development"));
        let is_production = environment.is_production();

        let http_port = env::var("HTTP_PORT")
            .or_else(|_| env::var("PORT"))
            .unwrap_or_else(|_| DEFAULT_HTTP_PORT.to_string())
            .parse()
            .context("Invalid HTTP_PORT value")?;

        let config = Self {
            http_port,
            host: env_var_or("HOST", "0.0.0.0"),
            environment,
            log_level: LogLevel::from_str_or_default(&env_var_or("RUST_LOG", "info")),

            database: DatabaseConfig {
                url: DatabaseUrl::parse_url(&env_var_or("DATABASE_URL", DEFAULT_DATABASE_URL))?,
                max_connections: env_var_or("DATABASE_MAX_CONNECTIONS", "5")
                    .parse()
                    .context("Invalid DATABASE_MAX_CONNECTIONS value")?,
            },

            auth: AuthConfig {
                jwt_secret: load_jwt_secret(environment)?,
                access_token_expiry_hours: env_var_or(
                    "JWT_EXPIRY_HOURS",
                    &auth_constants::ACCESS_TOKEN_EXPIRY_HOURS.to_string(),
                )
                .parse()
                .context("Invalid JWT_EXPIRY_HOURS value")?,
                refresh_token_expiry_days: env_var_or(
                    "REFRESH_TOKEN_EXPIRY_DAYS",
                    &auth_constants::REFRESH_TOKEN_EXPIRY_DAYS.to_string(),
                )
                .parse()
                .context("Invalid REFRESH_TOKEN_EXPIRY_DAYS value")?,
                cookie_max_age_hours: env_var_or(
                    "AUTH_COOKIE_MAX_AGE_HOURS",
                    &auth_constants::AUTH_COOKIE_MAX_AGE_HOURS.to_string(),
                )
                .parse()
                .context("Invalid AUTH_COOKIE_MAX_AGE_HOURS value")?,
                bcrypt_cost: env_var_or(
                    "BCRYPT_COST",
                    &auth_constants::DEFAULT_BCRYPT_COST.to_string(),
                )
                .parse()
                .context("Invalid BCRYPT_COST value")?,
            },

            security: SecurityConfig {
                cookie_secure: env_var_or("COOKIE_SECURE", &is_production.to_string())
                    .parse()
                    .context("Invalid COOKIE_SECURE value")?,
                cookie_domain: env::var("COOKIE_DOMAIN").ok().filter(|d| !d.is_empty()),
                csrf_enabled: env_var_or("CSRF_ENABLED", "true")
                    .parse()
                    .context("Invalid CSRF_ENABLED value")?,
                hsts_enabled: env_var_or("HSTS_ENABLED", &is_production.to_string())
                    .parse()
                    .context("Invalid HSTS_ENABLED value")?,
            },

            cors: CorsConfig {
                allowed_origins: env_var_or("CORS_ALLOWED_ORIGINS", DEFAULT_CORS_ORIGINS),
                frontend_url: env::var("FRONTEND_URL").ok().filter(|u| !u.is_empty()),
            },

            llm: LlmConfig {
                api_key: env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty()),
                model: env_var_or("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
                base_url: env_var_or("GEMINI_BASE_URL", DEFAULT_GEMINI_BASE_URL),
                timeout_secs: env_var_or("LLM_TIMEOUT_SECS", "30")
                    .parse()
                    .context("Invalid LLM_TIMEOUT_SECS value")?,
            },

            http: HttpConfig {
                request_timeout_secs: env_var_or("REQUEST_TIMEOUT_SECS", "60")
                    .parse()
                    .context("Invalid REQUEST_TIMEOUT_SECS value")?,
                body_limit_bytes: env_var_or("REQUEST_BODY_LIMIT_BYTES", "1048576")
                    .parse()
                    .context("Invalid REQUEST_BODY_LIMIT_BYTES value")?,
            },

            service_name: env_var_or("SERVICE_NAME", service_names::SMART_PANTRY_SERVER),
            service_version: env!("CARGO_PKG_VERSION").to_owned(),
        };

        config.validate()?;
        Ok(config)
    }

    /// Configuration suitable for tests: in-memory database, fixed secret,
    /// cheap bcrypt, no LLM key
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            http_port: 0,
            host: "127.0.0.1".to_owned(),
            environment: Environment::Testing,
            log_level: LogLevel::Warn,
            database: DatabaseConfig {
                url: DatabaseUrl::Memory,
                max_connections: 1,
            },
            auth: AuthConfig {
                jwt_secret: "test-secret-with-enough-entropy-for-hs256-signing".to_owned(),
                access_token_expiry_hours: auth_constants::ACCESS_TOKEN_EXPIRY_HOURS,
                refresh_token_expiry_days: auth_constants::REFRESH_TOKEN_EXPIRY_DAYS,
                cookie_max_age_hours: auth_constants::AUTH_COOKIE_MAX_AGE_HOURS,
                bcrypt_cost: 4,
            },
            security: SecurityConfig {
                cookie_secure: false,
                cookie_domain: None,
                csrf_enabled: true,
                hsts_enabled: false,
            },
            cors: CorsConfig {
                allowed_origins: DEFAULT_CORS_ORIGINS.to_owned(),
                frontend_url: None,
            },
            llm: LlmConfig {
                api_key: None,
                model: DEFAULT_GEMINI_MODEL.to_owned(),
                base_url: DEFAULT_GEMINI_BASE_URL.to_owned(),
                timeout_secs: 5,
            },
            http: HttpConfig {
                request_timeout_secs: 30,
                body_limit_bytes: 1024 * 1024,
            },
            service_name: service_names::SMART_PANTRY_SERVER.to_owned(),
            service_version: env!("CARGO_PKG_VERSION").to_owned(),
        }
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns an error if secrets, lifetimes, or the bcrypt cost are unusable
    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.is_empty() {
            return Err(anyhow!("JWT secret must not be empty"));
        }

        if self.environment.is_production()
            && self.auth.jwt_secret.len() < auth_constants::MIN_JWT_SECRET_BYTES
        {
            return Err(anyhow!(
                "SECRET must be at least {} bytes in production",
                auth_constants::MIN_JWT_SECRET_BYTES
            ));
        }

        let bcrypt_costs = auth_constants::MIN_BCRYPT_COST..=auth_constants::MAX_BCRYPT_COST;
        if !bcrypt_costs.contains(&self.auth.bcrypt_cost) {
            return Err(anyhow!(
                "BCRYPT_COST must be between {} and {}",
                auth_constants::MIN_BCRYPT_COST,
                auth_constants::MAX_BCRYPT_COST
            ));
        }

        if self.auth.access_token_expiry_hours <= 0
            || self.auth.refresh_token_expiry_days <= 0
            || self.auth.cookie_max_age_hours <= 0
        {
            return Err(anyhow!("Token and cookie lifetimes must be positive"));
        }

        if self.environment.is_production() && !self.security.cookie_secure {
            warn!("COOKIE_SECURE is disabled in production; auth cookies will be sent over plain HTTP");
        }

        if self.llm.api_key.is_none() {
            warn!("GEMINI_API_KEY is not set; recipe suggestions will return a fallback message");
        }

        Ok(())
    }

    /// Get a summary of the configuration for logging (secrets excluded)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Smart Pantry Configuration:\n\
             - Environment: {}\n\
             - HTTP: {}:{}\n\
             - Log Level: {}\n\
             - Database: {}\n\
             - Access Token Lifetime: {}h\n\
             - Refresh Token Lifetime: {}d\n\
             - CSRF Protection: {}\n\
             - Secure Cookies: {}\n\
             - CORS Origins: {}\n\
             - Recipe LLM: {} ({})",
            self.environment,
            self.host,
            self.http_port,
            self.log_level,
            self.database.url,
            self.auth.access_token_expiry_hours,
            self.auth.refresh_token_expiry_days,
            enabled_label(self.security.csrf_enabled),
            enabled_label(self.security.cookie_secure),
            self.cors.origins().join(", "),
            self.llm.model,
            if self.llm.api_key.is_some() {
                "configured"
            } else {
                "not configured"
            },
        )
    }
}

const fn enabled_label(enabled: bool) -> &'static str {
    if enabled {
        "Enabled"
    } else {
        "Disabled"
    }
}

/// Read the JWT signing secret, generating a throwaway one outside production
fn load_jwt_secret(environment: Environment) -> Result<String> {
    if let Some(secret) = env::var("SECRET")
        .or_else(|_| env::var("JWT_SECRET"))
        .ok()
        .filter(|s| !s.is_empty())
    {
        return Ok(secret);
    }

    if environment.is_production() {
        return Err(anyhow!("SECRET must be set in production"));
    }

    warn!("SECRET is not set; generated an ephemeral JWT secret (tokens will not survive restarts)");
    Ok(hex::encode(crate::auth::generate_jwt_secret()))
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse comma-separated CORS origins
fn parse_origins(origins_str: &str) -> Vec<String> {
    if origins_str.trim() == "*" {
        vec!["*".to_owned()]
    } else {
        origins_str
            .split(',')
            .map(|s| s.trim().trim_end_matches('/').to_owned())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins() {
        assert_eq!(parse_origins("*"), vec!["*"]);
        assert_eq!(
            parse_origins("http://localhost:3000, https://app.example.com/"),
            vec!["http://localhost:3000", "https://app.example.com"]
        );
        assert_eq!(parse_origins(""), Vec::<String>::new());
    }

    #[test]
    fn test_cors_origins_include_frontend_url_once() {
        let cors = CorsConfig {
            allowed_origins: "http://localhost:3000".to_owned(),
            frontend_url: Some("https://pantry.example.com/".to_owned()),
        };
        assert_eq!(
            cors.origins(),
            vec!["http://localhost:3000", "https://pantry.example.com"]
        );

        let duplicate = CorsConfig {
            allowed_origins: "http://localhost:3000".to_owned(),
            frontend_url: Some("http://localhost:3000".to_owned()),
        };
        assert_eq!(duplicate.origins(), vec!["http://localhost:3000"]);
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str_or_default("error"), LogLevel::Error);
        assert_eq!(LogLevel::from_str_or_default("WARN"), LogLevel::Warn);
        assert_eq!(LogLevel::from_str_or_default("Debug"), LogLevel::Debug);
        assert_eq!(LogLevel::from_str_or_default("invalid"), LogLevel::Info);
    }

    #[test]
    fn test_environment_parsing() {
        assert_eq!(
            Environment::from_str_or_default("production"),
            Environment::Production
        );
        assert_eq!(Environment::from_str_or_default("test"), Environment::Testing);
        assert_eq!(
            Environment::from_str_or_default("anything"),
            Environment::Development
        );
    }

    #[test]
    fn test_database_url_parsing() {
        assert_eq!(
            DatabaseUrl::parse_url("sqlite::memory:").unwrap(),
            DatabaseUrl::Memory
        );
        assert_eq!(
            DatabaseUrl::parse_url("sqlite:./data/pantry.db").unwrap(),
            DatabaseUrl::SQLite {
                path: PathBuf::from("./data/pantry.db")
            }
        );
        assert_eq!(
            DatabaseUrl::parse_url("sqlite://tmp/pantry.db")
                .unwrap()
                .to_connection_string(),
            "sqlite:tmp/pantry.db"
        );
        assert!(DatabaseUrl::parse_url("postgres://localhost/pantry").is_err());
    }

    #[test]
    fn test_database_url_query_is_dropped() {
        assert_eq!(
            DatabaseUrl::parse_url("sqlite:./data/pantry.db?mode=rwc").unwrap(),
            DatabaseUrl::SQLite {
                path: PathBuf::from("./data/pantry.db")
            }
        );
        assert_eq!(
            DatabaseUrl::parse_url("sqlite::memory:?cache=shared").unwrap(),
            DatabaseUrl::Memory
        );
    }

    #[test]
    fn test_testing_config_is_valid() {
        let config = ServerConfig::for_testing();
        assert!(config.validate().is_ok());
        assert!(config.database.url.is_memory());
    }

    #[test]
    fn test_validate_rejects_bad_bcrypt_cost() {
        let mut config = ServerConfig::for_testing();
        config.auth.bcrypt_cost = 40;
        assert!(config.validate().is_err());
        config.auth.bcrypt_cost = auth_constants::MIN_BCRYPT_COST - 1;
        assert!(config.validate().is_err());

        // Both bounds are accepted by bcrypt itself
        config.auth.bcrypt_cost = auth_constants::MIN_BCRYPT_COST;
        assert!(config.validate().is_ok());
        assert!(bcrypt::hash("pw", auth_constants::MIN_BCRYPT_COST).is_ok());
        config.auth.bcrypt_cost = auth_constants::MAX_BCRYPT_COST;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let mut config = ServerConfig::for_testing();
        config.llm.api_key = Some("gemini-key-value".to_owned());
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("test-secret-with-enough-entropy"));
        assert!(!rendered.contains("gemini-key-value"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn test_summary_mentions_llm_status() {
        let config = ServerConfig::for_testing();
        let summary = config.summary();
        assert!(summary.contains("not configured"));
        assert!(summary.contains("sqlite::memory:"));
    }
}
