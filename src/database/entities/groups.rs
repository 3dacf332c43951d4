use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "groups")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub color: Option<String>,
    pub created_at: ChronoDateTimeUtc,
    pub deleted_at: Option<ChronoDateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::person_groups::Entity")]
    PersonGroups,
}

impl Related<super::person_groups::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PersonGroups.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    pub fn new(user_id: impl Into<String>, name: impl Into<String>, color: Option<String>) -> Self {
        Self {
            id: Set(uuid::Uuid::new_v4().to_string()),
            user_id: Set(user_id.into()),
            name: Set(name.into()),
            color: Set(color),
            created_at: Set(chrono::Utc::now()),
            deleted_at: Set(None),
        }
    }
}
