//! HS256 access tokens.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tubely_core::constants::ACCESS_TOKEN_ISSUER;
use tubely_core::AppError;
use uuid::Uuid;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct AccessClaims {
    pub iss: String,
    pub sub: String, // user_id
    pub iat: i64,
    pub exp: i64,
}

/// Issue an access token for `user_id`.
pub fn make_jwt(user_id: Uuid, secret: &str, expires_in: Duration) -> Result<String, AppError> {
    let now = Utc::now();
    let claims = AccessClaims {
        iss: ACCESS_TOKEN_ISSUER.to_string(),
        sub: user_id.to_string(),
        iat: now.timestamp(),
        exp: (now + expires_in).timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Failed to sign JWT: {}", e)))
}

/// Validate an access token and return the caller's user id.
pub fn validate_jwt(token: &str, secret: &str) -> Result<Uuid, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ACCESS_TOKEN_ISSUER]);

    let data = decode::<AccessClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| {
        tracing::debug!(error = %e, "JWT validation failed");
        AppError::Unauthorized("Couldn't validate JWT".to_string())
    })?;

    Uuid::parse_str(&data.claims.sub)
        .map_err(|_| AppError::Unauthorized("Invalid user ID in JWT".to_string()))
}
