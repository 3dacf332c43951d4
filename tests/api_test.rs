//! API integration tests
//!
//! REST endpoints served by `create_app` against a migrated SQLite file

#![cfg(feature = "server")]

mod common;

use anyhow::Result;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use rapport::config::ServerConfig;
use rapport::database::entities::important_dates;
use rapport::database::entities::unsubscribe_tokens::ReminderType;
use rapport::names::NameParts;
use rapport::server::app::create_app;
use rapport::services::UnsubscribeService;
use sea_orm::{DatabaseConnection, EntityTrait};
use serde_json::{json, Value};
use tempfile::NamedTempFile;

use common::*;

struct TestApp {
    server: TestServer,
    db: DatabaseConnection,
    _temp_file: NamedTempFile,
}

async fn setup_test_server_with(config: ServerConfig) -> Result<TestApp> {
    let (db, temp_file) = setup_test_db().await?;
    let app = create_app(db.clone(), config).await?;
    let server = TestServer::new(app)?;

    Ok(TestApp {
        server,
        db,
        _temp_file: temp_file,
    })
}

async fn setup_test_server() -> Result<TestApp> {
    setup_test_server_with(ServerConfig::default()).await
}

fn bearer(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {}", token)).expect("valid header")
}

const AUTHORIZATION: HeaderName = axum::http::header::AUTHORIZATION;
const ACCEPT_LANGUAGE: HeaderName = axum::http::header::ACCEPT_LANGUAGE;

#[tokio::test]
async fn test_health_endpoint() -> Result<()> {
    let app = setup_test_server().await?;

    let response = app.server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["service"], "rapport");
    assert_eq!(body["status"], "healthy");
    assert!(body["version"].is_string());

    Ok(())
}

#[tokio::test]
async fn test_person_graph_requires_session() -> Result<()> {
    let app = setup_test_server().await?;

    let response = app.server.get("/api/people/anyone/graph").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["error"], "Unauthorized");

    let response = app
        .server
        .get("/api/people/anyone/graph")
        .add_header(AUTHORIZATION, bearer("not-a-session"))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn test_person_graph_end_to_end() -> Result<()> {
    let app = setup_test_server().await?;
    let db = &app.db;
    let user = create_user(db, "owner@example.com", None).await?;
    let token = session_for(db, &user.id).await?;

    let sibling = create_type(db, &user.id, "Sibling", Some("#111")).await?;
    set_inverse(db, &sibling, &sibling.id).await?;
    let colleague = create_type(db, &user.id, "Colleague", Some("#222")).await?;
    let family = create_group(db, &user.id, "Family", None).await?;

    let names = NameParts::new("Pat").with_surname("Lee");
    let p = create_person(db, &user.id, names, Some(&sibling.id)).await?;
    let q = create_person(db, &user.id, NameParts::new("Quinn"), None).await?;
    add_to_group(db, &p.id, &family.id).await?;
    relate(db, &p.id, &q.id, Some(&colleague.id)).await?;

    let response = app
        .server
        .get(&format!("/api/people/{}/graph", p.id))
        .add_header(AUTHORIZATION, bearer(&token))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let me = format!("user-{}", user.id);
    let body: Value = response.json();
    assert_eq!(
        body,
        json!({
            "nodes": [
                {
                    "id": p.id,
                    "label": "Pat Lee",
                    "groups": ["Family"],
                    "colors": ["#3B82F6"],
                    "isCenter": true
                },
                {"id": me, "label": "You", "groups": [], "colors": [], "isCenter": false},
                {"id": q.id, "label": "Quinn", "groups": [], "colors": [], "isCenter": false}
            ],
            "edges": [
                {"source": p.id, "target": me, "type": "Sibling", "color": "#111"},
                {"source": me, "target": p.id, "type": "Sibling", "color": "#111"},
                {"source": p.id, "target": q.id, "type": "Colleague", "color": "#222"}
            ]
        })
    );

    Ok(())
}

#[tokio::test]
async fn test_person_graph_with_session_cookie() -> Result<()> {
    let app = setup_test_server().await?;
    let user = create_user(&app.db, "owner@example.com", None).await?;
    let token = session_for(&app.db, &user.id).await?;
    let p = create_person(&app.db, &user.id, NameParts::new("Pat"), None).await?;

    let response = app
        .server
        .get(&format!("/api/people/{}/graph", p.id))
        .add_header(
            axum::http::header::COOKIE,
            HeaderValue::from_str(&format!("session={}", token))?,
        )
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["nodes"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["edges"], json!([]));

    Ok(())
}

#[tokio::test]
async fn test_person_graph_not_found_for_other_users_person() -> Result<()> {
    let app = setup_test_server().await?;
    let owner = create_user(&app.db, "owner@example.com", None).await?;
    let stranger = create_user(&app.db, "stranger@example.com", None).await?;
    let p = create_person(&app.db, &owner.id, NameParts::new("Pat"), None).await?;
    let token = session_for(&app.db, &stranger.id).await?;

    let response = app
        .server
        .get(&format!("/api/people/{}/graph", p.id))
        .add_header(AUTHORIZATION, bearer(&token))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body, json!({"error": "Person not found"}));

    Ok(())
}

#[tokio::test]
async fn test_login_opens_a_session() -> Result<()> {
    let app = setup_test_server().await?;
    let user = create_user(&app.db, "owner@example.com", None).await?;
    let p = create_person(&app.db, &user.id, NameParts::new("Pat"), None).await?;

    let response = app
        .server
        .post("/api/auth/login")
        .json(&json!({"email": "owner@example.com", "password": "wrong-password"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let response = app
        .server
        .post("/api/auth/login")
        .json(&json!({"email": "owner@example.com", "password": PASSWORD}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let cookie = response.header(axum::http::header::SET_COOKIE);
    assert!(cookie.to_str()?.starts_with("session="));

    let body: Value = response.json();
    let token = body["token"].as_str().expect("token in body").to_string();

    let response = app
        .server
        .get(&format!("/api/people/{}/graph", p.id))
        .add_header(AUTHORIZATION, bearer(&token))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    Ok(())
}

#[tokio::test]
async fn test_available_providers() -> Result<()> {
    let app = setup_test_server().await?;
    let response = app.server.get("/api/auth/available-providers").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(
        body,
        json!({"providers": {"credentials": true, "google": false}})
    );

    let app = setup_test_server_with(ServerConfig {
        saas_mode: true,
        google_client_id: Some("client".to_string()),
        google_client_secret: Some("secret".to_string()),
        ..Default::default()
    })
    .await?;
    let response = app.server.get("/api/auth/available-providers").await;
    let body: Value = response.json();
    assert_eq!(body["providers"]["google"], true);

    Ok(())
}

#[tokio::test]
async fn test_relationship_types_sorted_by_name() -> Result<()> {
    let app = setup_test_server().await?;
    let user = create_user(&app.db, "owner@example.com", None).await?;
    let other = create_user(&app.db, "other@example.com", None).await?;
    let token = session_for(&app.db, &user.id).await?;

    let sibling = create_type(&app.db, &user.id, "Sibling", None).await?;
    let friend = create_type(&app.db, &user.id, "Friend", Some("#00FF00")).await?;
    let friend = set_inverse(&app.db, &friend, &friend.id).await?;
    let removed = create_type(&app.db, &user.id, "Acquaintance", None).await?;
    delete_type(&app.db, &removed).await?;
    create_type(&app.db, &other.id, "Boss", None).await?;

    let response = app
        .server
        .get("/api/relationship-types")
        .add_header(AUTHORIZATION, bearer(&token))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(
        body,
        json!([
            {
                "id": friend.id,
                "name": "friend",
                "label": "Friend",
                "color": "#00FF00",
                "inverseId": friend.id
            },
            {
                "id": sibling.id,
                "name": "sibling",
                "label": "Sibling",
                "color": null,
                "inverseId": null
            }
        ])
    );

    Ok(())
}

#[tokio::test]
async fn test_unsubscribe_missing_token() -> Result<()> {
    let app = setup_test_server().await?;

    let response = app.server.post("/api/unsubscribe").json(&json!({})).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "MISSING_TOKEN");

    let response = app
        .server
        .post("/api/unsubscribe")
        .json(&json!({"token": 42}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "MISSING_TOKEN");

    let response = app.server.get("/api/unsubscribe").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "MISSING_TOKEN");

    Ok(())
}

#[tokio::test]
async fn test_unsubscribe_important_date_flow() -> Result<()> {
    let app = setup_test_server().await?;
    let user = create_user(&app.db, "owner@example.com", None).await?;
    let names = NameParts::new("Ana").with_surname("Ruiz");
    let person = create_person(&app.db, &user.id, names, None).await?;
    let date = create_important_date(&app.db, &person.id, "Birthday").await?;
    let token = UnsubscribeService::new(app.db.clone())
        .create_token(&user.id, ReminderType::ImportantDate, &date.id)
        .await?;

    let response = app
        .server
        .get("/api/unsubscribe")
        .add_query_param("token", &token)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(
        body,
        json!({
            "reminderType": "IMPORTANT_DATE",
            "entityName": "Ana Ruiz's Birthday",
            "used": false,
            "expired": false
        })
    );

    let response = app
        .server
        .post("/api/unsubscribe")
        .json(&json!({"token": token}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["reminderType"], "IMPORTANT_DATE");
    assert_eq!(
        body["message"],
        "You will no longer receive reminders for Ana Ruiz's Birthday."
    );

    let stored = important_dates::Entity::find_by_id(date.id.clone())
        .one(&app.db)
        .await?
        .expect("date exists");
    assert!(!stored.reminder_enabled);

    let response = app
        .server
        .post("/api/unsubscribe")
        .json(&json!({"token": token}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "ALREADY_USED");

    let body: Value = app
        .server
        .get("/api/unsubscribe")
        .add_query_param("token", &token)
        .await
        .json();
    assert_eq!(body["used"], true);

    Ok(())
}

#[tokio::test]
async fn test_unsubscribe_message_in_users_language() -> Result<()> {
    let app = setup_test_server().await?;
    let user = create_user(&app.db, "owner@example.com", Some("es-ES")).await?;
    let person = create_person(&app.db, &user.id, NameParts::new("Ana"), None).await?;
    let token = UnsubscribeService::new(app.db.clone())
        .create_token(&user.id, ReminderType::Contact, &person.id)
        .await?;

    let response = app
        .server
        .post("/api/unsubscribe")
        .json(&json!({"token": token}))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["reminderType"], "CONTACT");
    assert_eq!(
        body["message"],
        "Ya no recibirás recordatorios de contacto de Ana."
    );

    Ok(())
}

#[tokio::test]
async fn test_unsubscribe_unknown_token() -> Result<()> {
    let app = setup_test_server().await?;

    let response = app
        .server
        .post("/api/unsubscribe")
        .add_header(ACCEPT_LANGUAGE, HeaderValue::from_static("es-ES,es;q=0.9"))
        .json(&json!({"token": "nope"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "INVALID_TOKEN");
    assert_eq!(
        body["message"],
        "Este enlace para darse de baja no es válido."
    );

    let response = app
        .server
        .get("/api/unsubscribe")
        .add_query_param("token", "nope")
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn test_unsubscribe_errors_use_configured_locale() -> Result<()> {
    let app = setup_test_server_with(ServerConfig {
        default_locale: "es-ES".to_string(),
        ..Default::default()
    })
    .await?;

    let response = app
        .server
        .post("/api/unsubscribe")
        .json(&json!({"token": "nope"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(
        body,
        json!({
            "error": "INVALID_TOKEN",
            "message": "Este enlace para darse de baja no es válido."
        })
    );

    // Unsupported languages in the header fall back to the configured locale
    let response = app
        .server
        .get("/api/unsubscribe")
        .add_header(ACCEPT_LANGUAGE, HeaderValue::from_static("fr-FR,de;q=0.5"))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "MISSING_TOKEN");
    assert_eq!(
        body["message"],
        "El enlace para darse de baja está incompleto."
    );

    // A supported language in the header wins over the configured locale
    let response = app
        .server
        .post("/api/unsubscribe")
        .add_header(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US"))
        .json(&json!({"token": "nope"}))
        .await;
    let body: Value = response.json();
    assert_eq!(body["message"], "This unsubscribe link is not valid.");

    Ok(())
}
