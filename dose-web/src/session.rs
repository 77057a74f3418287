//! Session - signed client-side state
//!
//! The whole session (user, calorie total, pending flashes) travels in one
//! HS256 JWT inside the `session` cookie. A token that fails to verify or has
//! expired reads as an empty, anonymous session.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{TimeDelta, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::{AppError, AppResult};

pub const SESSION_COOKIE: &str = "session";

// ============================================================================
// FLASH MESSAGES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Info,
    Warning,
    Danger,
}

impl FlashLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }
}

/// One-shot message shown on the next rendered page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    pub fn new(level: FlashLevel, message: impl Into<String>) -> Self {
        Self { level, message: message.into() }
    }
}

// ============================================================================
// SESSION DATA
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flashes: Vec<Flash>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    #[serde(flatten)]
    data: SessionData,
    exp: usize, // Expiration timestamp
    iat: usize, // Issued at
}

impl SessionData {
    /// Read the session cookie; anything unverifiable is an empty session
    pub fn from_jar(jar: &CookieJar, secret: &str) -> Self {
        let Some(cookie) = jar.get(SESSION_COOKIE) else {
            return Self::default();
        };

        match decode::<Claims>(
            cookie.value(),
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        ) {
            Ok(token_data) => token_data.claims.data,
            Err(e) => {
                tracing::debug!("Discarding session cookie: {}", e);
                Self::default()
            }
        }
    }

    /// Sign and place the session into `jar`
    pub fn store(&self, jar: CookieJar, secret: &str, lifetime_hours: u64) -> AppResult<CookieJar> {
        let now = Utc::now();
        let exp = i64::try_from(lifetime_hours)
            .ok()
            .and_then(TimeDelta::try_hours)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| AppError::SessionError(format!("session lifetime out of range: {}h", lifetime_hours)))?;

        let claims = Claims {
            data: self.clone(),
            exp: exp.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )?;

        let cookie = Cookie::build((SESSION_COOKIE, token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax);

        Ok(jar.add(cookie))
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Anonymous → Authenticated
    pub fn login(&mut self, username: &str) {
        self.user = Some(username.to_string());
    }

    /// Authenticated → Anonymous; drops everything but pending flashes
    pub fn logout(&mut self) {
        self.user = None;
        self.calories = None;
    }

    pub fn flash(&mut self, level: FlashLevel, message: impl Into<String>) {
        self.flashes.push(Flash::new(level, message));
    }

    /// Pending flashes, leaving none behind
    pub fn take_flashes(&mut self) -> Vec<Flash> {
        std::mem::take(&mut self.flashes)
    }

    /// Running calorie total, 0 if never set
    pub fn calories_or_zero(&self) -> u64 {
        self.calories.unwrap_or(0)
    }
}
