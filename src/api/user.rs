use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

use super::validate::{require, validate_email_format, validate_password, FieldErrors};
use crate::database::models::User;

/// Body of `POST /users` and `POST /users/admin`
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub class: Option<String>,
    #[serde(default, deserialize_with = "deserialize_birthday")]
    pub birthday: Option<NaiveDate>,
}

impl CreateUserRequest {
    pub fn validate(&self) -> Result<(), HashMap<String, String>> {
        let mut errors = FieldErrors::default();

        require(&mut errors, "name", &self.name);
        require(&mut errors, "email", &self.email);
        require(&mut errors, "password", &self.password);

        if !self.email.is_empty() {
            if let Err(msg) = validate_email_format(&self.email) {
                errors.add("email", msg);
            }
        }
        if !self.password.is_empty() {
            if let Err(msg) = validate_password(&self.password) {
                errors.add("password", msg);
            }
        }

        errors.into_result()
    }
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp
fn deserialize_birthday<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .or_else(|_| DateTime::parse_from_rfc3339(s).map(|dt| dt.date_naive()))
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid birthday '{}'", s))),
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), HashMap<String, String>> {
        let mut errors = FieldErrors::default();
        require(&mut errors, "email", &self.email);
        require(&mut errors, "password", &self.password);
        if !self.email.is_empty() {
            if let Err(msg) = validate_email_format(&self.email) {
                errors.add("email", msg);
            }
        }
        errors.into_result()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileImageResponse {
    pub message: String,
    pub profile_url: String,
}

/// Public view of a user; optional columns flatten to ""
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub class: String,
    pub birthday: String,
    pub role: String,
    pub profile_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            class: user.class.unwrap_or_default(),
            birthday: user.birthday.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default(),
            role: user.role,
            profile_url: user.profile_url.unwrap_or_default(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
