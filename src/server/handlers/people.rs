use axum::extract::{Path, State};
use axum::Json;

use crate::graph::SocialGraph;
use crate::server::app::AppState;
use crate::server::error::ApiError;
use crate::services::{AuthenticatedUser, PersonGraphService};

/// The focal person's one-hop network, with the viewing user as a node.
pub async fn get_person_graph(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(person_id): Path<String>,
) -> Result<Json<SocialGraph>, ApiError> {
    let service = PersonGraphService::new(state.db.clone());
    let graph = service
        .build_graph(&person_id, &user.id)
        .await
        .map_err(|e| ApiError::new("people-graph", e))?;

    Ok(Json(graph))
}
