use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};

use super::app::AppState;
use super::error::ApiError;
use crate::errors::CoreErrorKind;
use crate::services::{AuthService, AuthenticatedUser};

pub const SESSION_COOKIE: &str = "session";

/// Session token from `Authorization: Bearer …` or the session cookie.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let bearer = header_value(headers, header::AUTHORIZATION.as_str())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty());
    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

pub fn header_value<'a>(headers: &'a HeaderMap, key: &str) -> Option<&'a str> {
    headers.get(key).and_then(|value| value.to_str().ok())
}

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let unauthorized = || ApiError::unauthorized("auth");

        let token = session_token(&parts.headers).ok_or_else(unauthorized)?;
        let service = AuthService::new(state.db.clone());

        match service.authenticate(&token).await {
            Ok(user) => Ok(user),
            Err(e) if e.kind() == CoreErrorKind::Unauthorized => {
                tracing::debug!("rejected session: {}", e);
                Err(unauthorized())
            }
            Err(e) => Err(ApiError::new("auth", e)),
        }
    }
}
