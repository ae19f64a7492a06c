//! Token issuing/verification and password hashing.
//!
//! Tokens are HS256 JWTs carrying the user id and email with a one day
//! expiry. Verification failures are deliberately silent: a request with a
//! bad or expired token is treated as anonymous rather than rejected, and
//! the resolvers decide per operation whether anonymous access is allowed.

use anyhow::Context as _;
use axum::http::{HeaderMap, header};
use bcrypt::{DEFAULT_COST, hash, verify};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::domain::user::User;

const TOKEN_TTL_DAYS: i64 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub exp: usize,
}

/// The authenticated caller, decoded from a bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: i32,
    pub email: String,
}

impl CurrentUser {
    /// The centralized owner check: mutations on articles and comments are
    /// restricted to the resource's creator.
    pub fn owns(&self, author_id: i32) -> bool {
        self.id == author_id
    }
}

/// Sign a token for `user`.
pub fn issue_token(user: &User, secret: &str) -> anyhow::Result<String> {
    let exp = (chrono::Utc::now() + chrono::Duration::days(TOKEN_TTL_DAYS)).timestamp() as usize;
    let claims = Claims {
        sub: user.id.to_string(),
        email: user.email.clone(),
        exp,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .context("token generation failed")
}

/// Verify and decode a token. Returns `None` on any failure (expired,
/// malformed, wrong secret, non-numeric subject).
pub fn decode_token(token: &str, secret: &str) -> Option<CurrentUser> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .ok()?;
    let id = data.claims.sub.parse().ok()?;
    Some(CurrentUser {
        id,
        email: data.claims.email,
    })
}

pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|s| s.to_string())
}

/// Resolve the caller from the `Authorization` header, if any.
pub fn user_from_headers(headers: &HeaderMap, secret: &str) -> Option<CurrentUser> {
    let token = extract_bearer_token(headers)?;
    decode_token(&token, secret)
}

pub fn hash_password(password: &str) -> anyhow::Result<String> {
    hash(password, DEFAULT_COST).context("password hashing failed")
}

pub fn verify_password(password: &str, password_hash: &str) -> anyhow::Result<bool> {
    verify(password, password_hash).context("password verification failed")
}
