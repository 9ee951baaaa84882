use lazy_static::lazy_static;
use regex::Regex;
use std::env;
use std::fmt;
use std::time::Duration;

lazy_static! {
    // "90", "90s", "15m", "24h"
    static ref DURATION_REGEX: Regex = Regex::new(r"^(\d+)(s|m|h)?$").unwrap();
}

const DEFAULT_JWT_EXPIRY: &str = "24h";
// One year.
const MAX_JWT_EXPIRY_SECS: u64 = 365 * 24 * 3600;

/// Errors raised while reading configuration from the environment.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{} must be set", key),
            ConfigError::Invalid { key, value } => write!(f, "{} has invalid value '{}'", key, value),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Signing secret and token lifetime. Read once at startup and never mutated.
#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    /// Always positive and at most one year.
    pub expiry: chrono::Duration,
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("expiry", &self.expiry)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// When unset the server runs against the in-memory store.
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub server_port: u16,
    pub server_host: String,
    pub jwt: JwtConfig,
    pub cors_origins: Vec<String>,
    pub bcrypt_cost: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret = env::var("JWT_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let expiry_raw = env_or("JWT_EXPIRY", DEFAULT_JWT_EXPIRY);
        let expiry = parse_token_ttl(&expiry_raw).ok_or(ConfigError::Invalid {
            key: "JWT_EXPIRY",
            value: expiry_raw.clone(),
        })?;

        Ok(Self {
            database_url: env::var("DATABASE_URL").ok().filter(|s| !s.is_empty()),
            database_max_connections: parse_env("DATABASE_MAX_CONNECTIONS", 5)?,
            server_port: parse_env("SERVER_PORT", 8080)?,
            server_host: env_or("SERVER_HOST", "127.0.0.1"),
            jwt: JwtConfig { secret, expiry },
            cors_origins: split_list(&env_or("CORS_ORIGINS", "*")),
            bcrypt_cost: parse_env("BCRYPT_COST", bcrypt::DEFAULT_COST)?,
        })
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o == "*")
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_env<T: std::str::FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(value) if !value.is_empty() => value
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        _ => Ok(default),
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Parses durations of the form `90`, `90s`, `15m` or `24h`. Bare numbers are seconds.
pub fn parse_duration(raw: &str) -> Option<Duration> {
    let caps = DURATION_REGEX.captures(raw.trim())?;
    let amount: u64 = caps.get(1)?.as_str().parse().ok()?;
    let seconds = match caps.get(2).map(|m| m.as_str()) {
        Some("h") => amount.checked_mul(3600)?,
        Some("m") => amount.checked_mul(60)?,
        _ => amount,
    };
    Some(Duration::from_secs(seconds))
}

/// Token lifetime from a `JWT_EXPIRY` value. Zero and anything above one year are rejected.
pub fn parse_token_ttl(raw: &str) -> Option<chrono::Duration> {
    let ttl = parse_duration(raw)?;
    if ttl.is_zero() || ttl.as_secs() > MAX_JWT_EXPIRY_SECS {
        return None;
    }
    chrono::Duration::from_std(ttl).ok()
}
