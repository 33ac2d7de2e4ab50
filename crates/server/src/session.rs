//! Signed-cookie session store.
//!
//! The whole session travels in one cookie as an HS256 token. Nothing is
//! kept server side, so the signing secret is the only thing standing
//! between a client and an arbitrary `search_term`.

use std::collections::BTreeMap;

use axum::http::{
    header::{InvalidHeaderValue, COOKIE},
    HeaderMap, HeaderValue,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use server_api::SessionData;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::config::Settings;

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub secret: String,
    pub ttl_seconds: i64,
}

impl SessionConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            cookie_name: settings.session_cookie_name.clone(),
            secret: settings.session_secret.clone(),
            ttl_seconds: settings.session_ttl_seconds,
        }
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to sign session cookie: {0}")]
    Sign(#[from] jsonwebtoken::errors::Error),
    #[error("session cookie is not a valid header value: {0}")]
    Header(#[from] InvalidHeaderValue),
    #[error("session lifetime of {0} seconds is out of range")]
    Lifetime(i64),
}

#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    sid: Uuid,
    iat: i64,
    exp: i64,
    data: BTreeMap<String, String>,
}

#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub data: SessionData,
}

impl Session {
    fn fresh() -> Self {
        Self {
            id: Uuid::new_v4(),
            data: SessionData::default(),
        }
    }
}

/// Restores the session from the request cookie.
///
/// Missing, expired or tampered cookies all yield a fresh empty session.
pub fn load_session(cfg: &SessionConfig, headers: &HeaderMap) -> Session {
    let Some(token) = cookie_value(headers, &cfg.cookie_name) else {
        return Session::fresh();
    };

    let validation = Validation::new(Algorithm::HS256);
    match decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(cfg.secret.as_bytes()),
        &validation,
    ) {
        Ok(decoded) => Session {
            id: decoded.claims.sid,
            data: SessionData::from_values(decoded.claims.data),
        },
        Err(error) => {
            debug!(%error, "discarding unusable session cookie");
            Session::fresh()
        }
    }
}

/// Signs the session and returns the `Set-Cookie` header value for it.
pub fn session_cookie(cfg: &SessionConfig, session: &Session) -> Result<HeaderValue, SessionError> {
    let now = Utc::now();
    let expires_at = Duration::try_seconds(cfg.ttl_seconds)
        .and_then(|ttl| now.checked_add_signed(ttl))
        .ok_or(SessionError::Lifetime(cfg.ttl_seconds))?;
    let claims = SessionClaims {
        sid: session.id,
        iat: now.timestamp(),
        exp: expires_at.timestamp(),
        data: session.data.values().clone(),
    };
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(cfg.secret.as_bytes()),
    )?;
    let cookie = format!(
        "{}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        cfg.cookie_name, cfg.ttl_seconds
    );
    Ok(HeaderValue::from_str(&cookie)?)
}

fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
