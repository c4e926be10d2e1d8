//! Bearer-token authentication.
//!
//! Handlers call [`authenticate`] explicitly instead of relying on an extractor
//! so the video identifier is validated before the credential is looked at.

pub mod jwt;

pub use jwt::{make_jwt, validate_jwt, AccessClaims};

use axum::http::{header::AUTHORIZATION, HeaderMap};
use tubely_core::AppError;
use uuid::Uuid;

const BEARER_PREFIX: &str = "Bearer ";

/// Extract the token from an `Authorization: Bearer <token>` header.
pub fn get_bearer_token(headers: &HeaderMap) -> Result<String, AppError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| AppError::Unauthorized("Authorization header is missing".to_string()))?
        .to_str()
        .map_err(|_| AppError::Unauthorized("Malformed authorization header".to_string()))?;

    let token = value
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Unauthorized("Malformed authorization header".to_string()))?;

    Ok(token.to_string())
}

/// Resolve the caller identity from the request headers.
pub fn authenticate(headers: &HeaderMap, jwt_secret: &str) -> Result<Uuid, AppError> {
    let token = get_bearer_token(headers)?;
    validate_jwt(&token, jwt_secret)
}
