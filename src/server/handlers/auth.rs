use axum::extract::State;
use axum::http::{header, HeaderValue};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::errors::CoreError;
use crate::server::app::AppState;
use crate::server::auth::SESSION_COOKIE;
use crate::server::error::ApiError;
use crate::services::auth_service::{self, SESSION_LIFETIME_HOURS};
use crate::services::AuthService;

pub async fn available_providers(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "providers": auth_service::available_providers(&state.config)
    }))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Exchange credentials for a session token, also set as a cookie.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Response, ApiError> {
    let token = AuthService::new(state.db.clone())
        .login(request.email.trim(), &request.password)
        .await
        .map_err(|e| ApiError::new("auth-login", e))?;

    let max_age = SESSION_LIFETIME_HOURS * 3600;
    let cookie = format!(
        "{}={}; HttpOnly; Path=/; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE, token, max_age
    );
    let cookie = HeaderValue::from_str(&cookie)
        .map_err(|e| ApiError::new("auth-login", CoreError::internal(e.to_string())))?;

    let mut response = Json(json!({ "token": token })).into_response();
    response.headers_mut().insert(header::SET_COOKIE, cookie);
    Ok(response)
}
