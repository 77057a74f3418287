//! Form payloads
//!
//! Typed at the boundary; missing fields deserialize to empty values so a
//! bare POST never turns into a rejection.

use serde::Deserialize;

/// Signup and login form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CredentialsForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Calorie form: repeated `item[]` / `quantity[]` fields, zipped by position
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CalorieForm {
    #[serde(rename = "item[]", default)]
    pub items: Vec<String>,
    #[serde(rename = "quantity[]", default)]
    pub quantities: Vec<String>,
}
