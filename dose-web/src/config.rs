//! Configuration module

use std::env;
use std::path::PathBuf;

use dose_core::constants::{DEFAULT_MODEL_PATH, DEFAULT_USER_STORE_PATH};
use rand::{distributions::Alphanumeric, Rng};

const MAX_SESSION_HOURS: u64 = 24 * 365;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Session signing secret
    pub secret_key: String,

    /// True when `secret_key` was generated at startup
    pub ephemeral_secret: bool,

    /// Verbose logging
    pub debug: bool,

    /// JSON snapshot of registered users
    pub user_store_path: PathBuf,

    /// Model bundle manifest
    pub model_path: PathBuf,

    /// Session token lifetime in hours
    pub session_hours: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let secret = env::var("SECRET_KEY").ok().filter(|s| !s.is_empty());

        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),

            ephemeral_secret: secret.is_none(),
            secret_key: secret.unwrap_or_else(random_secret),

            debug: env::var("DEBUG")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),

            user_store_path: env::var("USER_STORE_PATH")
                .unwrap_or_else(|_| DEFAULT_USER_STORE_PATH.to_string())
                .into(),

            model_path: env::var("MODEL_PATH")
                .unwrap_or_else(|_| DEFAULT_MODEL_PATH.to_string())
                .into(),

            session_hours: parse_session_hours(env::var("SESSION_HOURS").ok().as_deref()),
        }
    }

    /// Default tracing filter for this configuration
    pub fn log_filter(&self) -> &'static str {
        if self.debug {
            "dose_web=debug,dose_core=debug,tower_http=debug"
        } else {
            "dose_web=info,dose_core=info,tower_http=info"
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Session lifetime in hours, 24 by default, capped at one year
fn parse_session_hours(raw: Option<&str>) -> u64 {
    raw.and_then(|h| h.trim().parse::<u64>().ok())
        .unwrap_or(24)
        .clamp(1, MAX_SESSION_HOURS)
}

fn random_secret() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(48)
        .map(char::from)
        .collect()
}
