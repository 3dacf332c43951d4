use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "relationship_types")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub label: String,
    pub color: Option<String>,
    /// Reciprocal type, e.g. "Child" for "Parent"
    pub inverse_id: Option<String>,
    pub created_at: ChronoDateTimeUtc,
    pub deleted_at: Option<ChronoDateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::InverseId",
        to = "Column::Id"
    )]
    Inverse,
    #[sea_orm(has_many = "super::relationships::Entity")]
    Relationships,
}

impl Related<super::relationships::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Relationships.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    pub fn new(
        user_id: impl Into<String>,
        name: impl Into<String>,
        label: impl Into<String>,
        color: Option<String>,
    ) -> Self {
        Self {
            id: Set(uuid::Uuid::new_v4().to_string()),
            user_id: Set(user_id.into()),
            name: Set(name.into()),
            label: Set(label.into()),
            color: Set(color),
            inverse_id: Set(None),
            created_at: Set(chrono::Utc::now()),
            deleted_at: Set(None),
        }
    }

    pub fn set_inverse(mut self, inverse_id: Option<String>) -> Self {
        self.inverse_id = Set(inverse_id);
        self
    }
}
