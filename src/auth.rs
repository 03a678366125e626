//! Credential checks and bearer-token auth.
//!
//! Login failures never reveal whether the login or the password was wrong.
//! Tokens are HS256 JWTs carrying the cinema id; the extractor re-resolves
//! the cinema from the store, so a token outlives neither its cinema nor its
//! expiry window.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::sync::Arc;

use crate::AppState;
use crate::error::ApiError;
use crate::models::CinemaPublic;

const PBKDF2_ROUNDS: u32 = 10_000;
const SALT_LEN: usize = 16;
const HASH_LEN: usize = 32;

pub fn hash_password(password: &str) -> String {
    let mut salt = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt);
    let mut hash = [0u8; HASH_LEN];
    pbkdf2::pbkdf2_hmac::<Sha256>(password.as_bytes(), &salt, PBKDF2_ROUNDS, &mut hash);
    format!("pbkdf2${}${}${}", PBKDF2_ROUNDS, hex::encode(salt), hex::encode(hash))
}

pub fn verify_password(password: &str, stored: &str) -> bool {
    let mut parts = stored.split('$');
    let (Some("pbkdf2"), Some(rounds), Some(salt), Some(expected), None) =
        (parts.next(), parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    let Ok(rounds) = rounds.parse::<u32>() else {
        return false;
    };
    let Ok(salt) = hex::decode(salt) else {
        return false;
    };
    let mut hash = [0u8; HASH_LEN];
    pbkdf2::pbkdf2_hmac::<Sha256>(password.as_bytes(), &salt, rounds, &mut hash);
    hex::encode(hash) == expected
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub login: String,
    pub iat: i64,
    pub exp: i64,
}

pub fn issue_token(secret: &str, cinema_id: i64, login: &str, ttl_hours: i64) -> anyhow::Result<String> {
    let now = jiff::Timestamp::now().as_second();
    let claims = Claims {
        sub: cinema_id,
        login: login.to_string(),
        iat: now,
        exp: now + ttl_hours * 3600,
    };
    let token =
        jsonwebtoken::encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes()))?;
    Ok(token)
}

pub fn decode_token(secret: &str, token: &str) -> Option<Claims> {
    jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .ok()
}

/// Extractor for routes requiring a valid bearer token. Resolves to the
/// authenticated cinema's public projection.
pub struct AuthCinema(pub CinemaPublic);

impl FromRequestParts<Arc<AppState>> for AuthCinema {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError::AuthRequired("No token provided"))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or(ApiError::AuthRequired("No token provided"))?;

        let claims = decode_token(&state.config.jwt_secret, token)
            .ok_or(ApiError::AuthFailed("Invalid or expired token"))?;

        let cinema = state
            .store
            .cinema(claims.sub)
            .await
            .ok_or(ApiError::AuthFailed("Invalid or expired token"))?;

        Ok(AuthCinema(CinemaPublic::from(&cinema)))
    }
}
