use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};

use crate::database::entities::relationship_types;
use crate::errors::CoreResult;

/// What the relationship-type form needs to offer a type as an inverse.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipTypeSummary {
    pub id: String,
    pub name: String,
    pub label: String,
    pub color: Option<String>,
    pub inverse_id: Option<String>,
}

impl From<relationship_types::Model> for RelationshipTypeSummary {
    fn from(model: relationship_types::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            label: model.label,
            color: model.color,
            inverse_id: model.inverse_id,
        }
    }
}

pub struct RelationshipTypeService {
    db: DatabaseConnection,
}

impl RelationshipTypeService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// The user's live relationship types, by name.
    pub async fn list_for_user(&self, user_id: &str) -> CoreResult<Vec<RelationshipTypeSummary>> {
        let types = relationship_types::Entity::find()
            .filter(relationship_types::Column::UserId.eq(user_id))
            .filter(relationship_types::Column::DeletedAt.is_null())
            .order_by_asc(relationship_types::Column::Name)
            .all(&self.db)
            .await?;

        Ok(types.into_iter().map(Into::into).collect())
    }
}
