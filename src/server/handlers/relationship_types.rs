use axum::extract::State;
use axum::Json;

use crate::server::app::AppState;
use crate::server::error::ApiError;
use crate::services::relationship_type_service::RelationshipTypeSummary;
use crate::services::{AuthenticatedUser, RelationshipTypeService};

pub async fn list_relationship_types(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<RelationshipTypeSummary>>, ApiError> {
    let types = RelationshipTypeService::new(state.db.clone())
        .list_for_user(&user.id)
        .await
        .map_err(|e| ApiError::new("relationship-types", e))?;

    Ok(Json(types))
}
