use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use tracing::info;

use crate::config::ServerConfig;
use crate::errors::{CoreError, UnsubscribeError};
use crate::i18n::{locale_from_accept_language, resolve_locale, Translator};
use crate::server::app::AppState;
use crate::server::auth::header_value;
use crate::server::error::ApiError;
use crate::services::UnsubscribeService;

const MISSING_TOKEN: &str = "MISSING_TOKEN";

#[derive(Debug, Deserialize)]
pub struct TokenQuery {
    pub token: Option<String>,
}

/// Locale from `Accept-Language`, or the configured default when the header
/// is absent or names no supported language.
fn request_locale(headers: &HeaderMap, config: &ServerConfig) -> &'static str {
    header_value(headers, "accept-language")
        .and_then(locale_from_accept_language)
        .unwrap_or_else(|| resolve_locale(Some(&config.default_locale)))
}

fn client_error(status: StatusCode, code: &str, locale: &str) -> Response {
    let message = Translator::new(locale, Some("unsubscribe.errors")).t(code);
    (status, Json(json!({ "error": code, "message": message }))).into_response()
}

/// Consume a token from an email link and switch its reminder off.
pub async fn unsubscribe(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Option<Json<Value>>,
) -> Result<Response, ApiError> {
    let token = body
        .as_ref()
        .and_then(|Json(body)| body.get("token"))
        .and_then(Value::as_str)
        .filter(|token| !token.is_empty());
    let locale = request_locale(&headers, &state.config);
    let Some(token) = token else {
        return Ok(client_error(StatusCode::BAD_REQUEST, MISSING_TOKEN, locale));
    };

    let service = UnsubscribeService::new(state.db.clone());
    let consumed = match service.consume_token(token).await {
        Ok(consumed) => consumed,
        Err(e) if e.is_client_error() => {
            info!(code = e.code(), "unsubscribe rejected");
            return Ok(client_error(StatusCode::BAD_REQUEST, e.code(), locale));
        }
        Err(e) => {
            let error = CoreError::internal("Failed to consume unsubscribe token").with_source(e);
            return Err(ApiError::new("unsubscribe", error));
        }
    };

    let language = consumed
        .user
        .language
        .clone()
        .unwrap_or_else(|| locale.to_string());
    let entity = service
        .entity_name(consumed.reminder_type, &consumed.entity_id, Some(&language))
        .await
        .map_err(|e| ApiError::new("unsubscribe", e))?;

    let t = Translator::for_language(Some(&language), Some("unsubscribe.success"));
    let message = t.t_with(
        consumed.reminder_type.as_str(),
        &HashMap::from([("entity", entity)]),
    );

    let body = json!({
        "success": true,
        "reminderType": consumed.reminder_type,
        "message": message
    });
    Ok(Json(body).into_response())
}

/// What a token would switch off, without consuming it.
pub async fn get_unsubscribe_details(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<TokenQuery>,
) -> Result<Response, ApiError> {
    let locale = request_locale(&headers, &state.config);
    let Some(token) = query.token.filter(|token| !token.is_empty()) else {
        return Ok(client_error(StatusCode::BAD_REQUEST, MISSING_TOKEN, locale));
    };

    let details = UnsubscribeService::new(state.db.clone())
        .get_details(&token)
        .await
        .map_err(|e| ApiError::new("unsubscribe-details", e))?;

    match details {
        Some(details) => Ok(Json(details).into_response()),
        None => Ok(client_error(
            StatusCode::NOT_FOUND,
            UnsubscribeError::InvalidToken.code(),
            locale,
        )),
    }
}
