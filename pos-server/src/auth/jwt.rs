//! JWT token service
//!
//! Token generation, validation and the [`CurrentUser`] context handlers
//! receive after authentication.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use thiserror::Error;

use crate::db::models::StaffRole;

/// JWT configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// Signing secret (at least 32 bytes)
    pub secret: String,
    /// Token lifetime in minutes
    pub expiration_minutes: i64,
    pub issuer: String,
    pub audience: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: load_jwt_secret(),
            expiration_minutes: std::env::var("JWT_EXPIRATION_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1440),
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "pos-server".to_string()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "pos-clients".to_string()),
        }
    }
}

/// Claims stored in the token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Staff id (subject), as "staff:xxx"
    pub sub: String,
    pub username: String,
    pub role: String,
    /// Tenant scope, as "restaurant:xxx"
    pub restaurant: String,
    pub exp: i64,
    pub iat: i64,
    pub iss: String,
    pub aud: String,
}

#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token expired")]
    ExpiredToken,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Token generation failed: {0}")]
    GenerationFailed(String),
}

/// Generate a printable 64-character secret via the system RNG
pub fn generate_printable_jwt_secret() -> String {
    let allowed_chars =
        "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*()-_=+";

    let rng = SystemRandom::new();
    let mut key = String::with_capacity(64);
    for _ in 0..64 {
        let mut byte = [0u8; 1];
        if rng.fill(&mut byte).is_err() {
            return "PosServerDevelopmentFallbackKey-ReplaceInProduction!".to_string();
        }
        let idx = (byte[0] as usize) % allowed_chars.len();
        key.push(allowed_chars.as_bytes()[idx] as char);
    }
    key
}

/// Load the signing secret from `JWT_SECRET`, generating a temporary one in
/// development builds when unset or too short
fn load_jwt_secret() -> String {
    match std::env::var("JWT_SECRET") {
        Ok(secret) if secret.len() >= 32 => secret,
        Ok(_) => {
            tracing::warn!("JWT_SECRET shorter than 32 characters, generating temporary key");
            generate_printable_jwt_secret()
        }
        Err(_) => {
            tracing::warn!("JWT_SECRET not set, generating temporary key");
            generate_printable_jwt_secret()
        }
    }
}

/// JWT token service
#[derive(Debug, Clone)]
pub struct JwtService {
    pub config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    pub fn new() -> Self {
        Self::with_config(JwtConfig::default())
    }

    pub fn with_config(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Issue a token for a staff member
    pub fn generate_token(
        &self,
        staff_id: &str,
        username: &str,
        role: StaffRole,
        restaurant: &str,
    ) -> Result<String, JwtError> {
        let now = Utc::now();
        let expiration = now + Duration::minutes(self.config.expiration_minutes);

        let claims = Claims {
            sub: staff_id.to_string(),
            username: username.to_string(),
            role: role.as_str().to_string(),
            restaurant: restaurant.to_string(),
            exp: expiration.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    /// Validate and decode a token
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.config.audience]);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_required_spec_claims(&["sub", "exp", "iat", "iss", "aud"]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                _ => JwtError::InvalidToken(e.to_string()),
            }
        })?;

        Ok(token_data.claims)
    }

    /// Extract the token from an Authorization header value
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ")
    }
}

impl Default for JwtService {
    fn default() -> Self {
        Self::new()
    }
}

/// Authenticated staff context, injected by the auth middleware
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// Staff id, as "staff:xxx"
    pub id: String,
    pub username: String,
    pub role: StaffRole,
    /// The restaurant every query must be scoped to
    pub restaurant: RecordId,
}

impl TryFrom<Claims> for CurrentUser {
    type Error = JwtError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let role = claims
            .role
            .parse::<StaffRole>()
            .map_err(|_| JwtError::InvalidToken(format!("unknown role: {}", claims.role)))?;
        let restaurant = claims
            .restaurant
            .parse::<RecordId>()
            .map_err(|_| JwtError::InvalidToken("malformed restaurant claim".to_string()))?;

        Ok(Self {
            id: claims.sub,
            username: claims.username,
            role,
            restaurant,
        })
    }
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == StaffRole::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::with_config(JwtConfig {
            secret: "test-secret-that-is-long-enough-0123456789".to_string(),
            expiration_minutes: 60,
            issuer: "pos-server".to_string(),
            audience: "pos-clients".to_string(),
        })
    }

    #[test]
    fn test_jwt_round_trip() {
        let service = service();
        let token = service
            .generate_token("staff:asha", "asha", StaffRole::Waiter, "restaurant:r1")
            .expect("Failed to generate test token");

        let claims = service
            .validate_token(&token)
            .expect("Failed to validate test token");

        assert_eq!(claims.sub, "staff:asha");
        assert_eq!(claims.username, "asha");
        assert_eq!(claims.role, "waiter");
        assert_eq!(claims.restaurant, "restaurant:r1");
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = service()
            .generate_token("staff:asha", "asha", StaffRole::Admin, "restaurant:r1")
            .unwrap();

        let other = JwtService::with_config(JwtConfig {
            secret: "another-secret-that-is-long-enough-987654".to_string(),
            expiration_minutes: 60,
            issuer: "pos-server".to_string(),
            audience: "pos-clients".to_string(),
        });
        assert!(other.validate_token(&token).is_err());
    }

    #[test]
    fn test_current_user_from_claims() {
        let service = service();
        let token = service
            .generate_token("staff:asha", "asha", StaffRole::Admin, "restaurant:r1")
            .unwrap();
        let claims = service.validate_token(&token).unwrap();

        let user = CurrentUser::try_from(claims).unwrap();
        assert!(user.is_admin());
        assert_eq!(user.restaurant.to_string(), "restaurant:r1");
    }

    #[test]
    fn test_generated_secret_is_long_enough() {
        let key1 = generate_printable_jwt_secret();
        let key2 = generate_printable_jwt_secret();
        assert!(key1.len() >= 32);
        assert_ne!(key1, key2);
    }
}
