use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "important_dates")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub person_id: String,
    pub title: String,
    pub date: ChronoDate,
    pub reminder_enabled: bool,
    pub created_at: ChronoDateTimeUtc,
    pub deleted_at: Option<ChronoDateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::people::Entity",
        from = "Column::PersonId",
        to = "super::people::Column::Id"
    )]
    People,
}

impl Related<super::people::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::People.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    pub fn new(
        person_id: impl Into<String>,
        title: impl Into<String>,
        date: chrono::NaiveDate,
    ) -> Self {
        Self {
            id: Set(uuid::Uuid::new_v4().to_string()),
            person_id: Set(person_id.into()),
            title: Set(title.into()),
            date: Set(date),
            reminder_enabled: Set(true),
            created_at: Set(chrono::Utc::now()),
            deleted_at: Set(None),
        }
    }
}
