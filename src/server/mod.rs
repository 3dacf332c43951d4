pub mod app;
pub mod auth;
pub mod error;
pub mod handlers;

use anyhow::Result;
use tracing::info;

use crate::config::ServerConfig;
use crate::database::connection::*;

pub async fn start_server(config: ServerConfig) -> Result<()> {
    let database_url = get_database_url(Some(&config.database));
    let db = establish_connection(&database_url).await?;

    setup_database(&db).await?;
    info!("Database migrations completed");

    let port = config.port;
    let app = app::create_app(db, config).await?;

    log_routes();

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    info!("Server running on http://0.0.0.0:{}", port);

    axum::serve(listener, app).await?;

    Ok(())
}

fn log_routes() {
    info!("API Endpoints:");
    info!("  GET  /health                         - Health check");
    info!("  GET  /api/people/:id/graph           - Social graph around a person");
    info!("  GET  /api/relationship-types         - Relationship types of the user");
    info!("  GET  /api/auth/available-providers   - Sign-in providers");
    info!("  POST /api/auth/login                 - Password login");
    info!("  GET  /api/unsubscribe?token=         - Unsubscribe link details");
    info!("  POST /api/unsubscribe                - Consume an unsubscribe link");
}
