//! Administrator authentication service
//!
//! A single administrator account comes from configuration; there is no
//! user table. Successful login yields a short-lived HS256 bearer token.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
};

/// Claims carried in an administrator bearer token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminClaims {
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

impl AdminClaims {
    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }
}

#[derive(Clone)]
pub struct AuthService {
    config: AuthConfig,
}

impl AuthService {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    /// Check administrator credentials and return a bearer token
    pub fn authenticate(&self, username: &str, password: &str) -> AppResult<String> {
        if username != self.config.admin_username || password != self.config.admin_password {
            return Err(AppError::Authentication(
                "Invalid login or password".to_string(),
            ));
        }

        let now = Utc::now().timestamp();
        let claims = AdminClaims {
            sub: username.to_string(),
            iat: now,
            exp: now + self.config.jwt_expiration_minutes as i64 * 60,
        };

        claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }
}
