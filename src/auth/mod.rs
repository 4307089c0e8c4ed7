use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::database::models::User;

pub mod password;

pub use password::{hash_password, verify_password, PasswordError};

pub const TOKEN_ISSUER: &str = "edu-api";
pub const TOKEN_AUDIENCE: &str = "users";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i64,
    pub email: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
    pub nbf: i64,
    pub iss: String,
    pub sub: String,
    pub jti: String,
    pub aud: String,
}

impl Claims {
    pub fn new(user_id: i64, email: String, role: String, expiry_hours: u64) -> Self {
        let now = Utc::now();
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self {
            user_id,
            email,
            role,
            exp,
            iat: now.timestamp(),
            nbf: now.timestamp(),
            iss: TOKEN_ISSUER.to_string(),
            sub: user_id.to_string(),
            jti: now.timestamp_nanos_opt().unwrap_or_default().to_string(),
            aud: TOKEN_AUDIENCE.to_string(),
        }
    }

    pub fn for_user(user: &User, expiry_hours: u64) -> Self {
        Self::new(user.id, user.email.clone(), user.role.clone(), expiry_hours)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("Invalid or expired token: {0}")]
    InvalidToken(String),

    #[error("JWT secret not configured")]
    InvalidSecret,
}

/// Signs and verifies HS256 tokens with the application secret
pub struct JwtUtil {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expiry_hours: u64,
}

impl JwtUtil {
    pub fn new(secret: &str, expiry_hours: u64) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::InvalidSecret);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[TOKEN_ISSUER]);
        validation.set_audience(&[TOKEN_AUDIENCE]);
        validation.validate_nbf = true;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            expiry_hours,
        })
    }

    pub fn expiry_hours(&self) -> u64 {
        self.expiry_hours
    }

    pub fn generate_token(&self, user: &User) -> Result<String, JwtError> {
        self.sign(&Claims::for_user(user, self.expiry_hours))
    }

    pub fn sign(&self, claims: &Claims) -> Result<String, JwtError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| JwtError::TokenGeneration(e.to_string()))
    }

    /// Verify signature, algorithm, issuer, audience and time window
    pub fn parse_token(&self, token: &str) -> Result<Claims, JwtError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| JwtError::InvalidToken(e.to_string()))
    }
}
