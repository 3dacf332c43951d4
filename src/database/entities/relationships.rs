use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

/// Directed relationship `person_id -> related_person_id`
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "relationships")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub person_id: String,
    pub related_person_id: String,
    pub relationship_type_id: Option<String>,
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
    Person,
    #[sea_orm(
        belongs_to = "super::people::Entity",
        from = "Column::RelatedPersonId",
        to = "super::people::Column::Id"
    )]
    RelatedPerson,
    #[sea_orm(
        belongs_to = "super::relationship_types::Entity",
        from = "Column::RelationshipTypeId",
        to = "super::relationship_types::Column::Id"
    )]
    RelationshipType,
}

impl Related<super::relationship_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RelationshipType.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    pub fn new(
        person_id: impl Into<String>,
        related_person_id: impl Into<String>,
        relationship_type_id: Option<String>,
    ) -> Self {
        Self {
            id: Set(uuid::Uuid::new_v4().to_string()),
            person_id: Set(person_id.into()),
            related_person_id: Set(related_person_id.into()),
            relationship_type_id: Set(relationship_type_id),
            created_at: Set(chrono::Utc::now()),
            deleted_at: Set(None),
        }
    }
}
