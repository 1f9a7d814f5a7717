//! Identity context for handler invocations.
//!
//! Token issuance and account management belong to the platform's auth
//! subsystem; this service only decodes bearer tokens into an `Identity`.
//! A missing or invalid token simply means the invocation carries no
//! identity context - the handlers decide whether that is an error.

use axum::{extract::FromRequestParts, http::request::Parts, http::HeaderMap};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config;

/// Authenticated caller, as established by the platform before a handler runs
#[derive(Clone, Debug)]
pub struct Identity {
    pub uid: String,
    pub email: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: Option<String>,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(uid: String, email: Option<String>) -> Self {
        let now = Utc::now();
        let expiry_hours = config::config().security.token_expiry_hours;
        Self {
            sub: uid,
            email,
            exp: (now + Duration::hours(expiry_hours as i64)).timestamp(),
            iat: now.timestamp(),
        }
    }
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Self {
            uid: claims.sub,
            email: claims.email,
        }
    }
}

/// Mint a bearer token for the given identity. In production this is the
/// platform's job; kept here for local development and the test harness.
pub fn generate_identity_token(uid: &str, email: Option<&str>) -> Result<String, jsonwebtoken::errors::Error> {
    let secret = &config::config().security.jwt_secret;
    let claims = Claims::new(uid.to_string(), email.map(str::to_string));
    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes()))
}

/// Extract the identity context from the Authorization header, if any
fn identity_from_headers(headers: &HeaderMap) -> Option<Identity> {
    let auth_header = headers
        .get("authorization")
        .or_else(|| headers.get("Authorization"))?;

    let token = auth_header.to_str().ok()?.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        return None;
    }

    let secret = &config::config().security.jwt_secret;
    let decoding_key = DecodingKey::from_secret(secret.as_bytes());

    match decode::<Claims>(token, &decoding_key, &Validation::default()) {
        Ok(token_data) => Some(token_data.claims.into()),
        Err(e) => {
            tracing::debug!("Rejected bearer token: {}", e);
            None
        }
    }
}

/// Extractor that yields `Some(Identity)` for a valid bearer token and
/// `None` otherwise, leaving the unauthenticated error to the handler.
pub struct OptionalIdentity(pub Option<Identity>);

#[axum::async_trait]
impl<S> FromRequestParts<S> for OptionalIdentity
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalIdentity(identity_from_headers(&parts.headers)))
    }
}
