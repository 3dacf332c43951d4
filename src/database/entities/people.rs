use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

use crate::names::NameParts;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "people")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub surname: Option<String>,
    pub middle_name: Option<String>,
    pub second_last_name: Option<String>,
    pub nickname: Option<String>,
    /// How this person relates to the owning user
    pub relationship_to_user_id: Option<String>,
    pub contact_reminder_enabled: bool,
    pub created_at: ChronoDateTimeUtc,
    pub deleted_at: Option<ChronoDateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    Users,
    #[sea_orm(
        belongs_to = "super::relationship_types::Entity",
        from = "Column::RelationshipToUserId",
        to = "super::relationship_types::Column::Id"
    )]
    RelationshipToUser,
    #[sea_orm(has_many = "super::person_groups::Entity")]
    PersonGroups,
    #[sea_orm(has_many = "super::important_dates::Entity")]
    ImportantDates,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::relationship_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RelationshipToUser.def()
    }
}

impl Related<super::person_groups::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PersonGroups.def()
    }
}

impl Related<super::groups::Entity> for Entity {
    fn to() -> RelationDef {
        super::person_groups::Relation::Groups.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::person_groups::Relation::People.def().rev())
    }
}

impl Related<super::important_dates::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ImportantDates.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    pub fn new(user_id: impl Into<String>, names: NameParts) -> Self {
        Self {
            id: Set(uuid::Uuid::new_v4().to_string()),
            user_id: Set(user_id.into()),
            name: Set(names.name),
            surname: Set(names.surname),
            middle_name: Set(names.middle_name),
            second_last_name: Set(names.second_last_name),
            nickname: Set(names.nickname),
            relationship_to_user_id: Set(None),
            contact_reminder_enabled: Set(true),
            created_at: Set(chrono::Utc::now()),
            deleted_at: Set(None),
        }
    }

    pub fn set_relationship_to_user(mut self, relationship_type_id: Option<String>) -> Self {
        self.relationship_to_user_id = Set(relationship_type_id);
        self
    }
}

impl Model {
    pub fn name_parts(&self) -> NameParts {
        NameParts {
            name: self.name.clone(),
            surname: self.surname.clone(),
            middle_name: self.middle_name.clone(),
            second_last_name: self.second_last_name.clone(),
            nickname: self.nickname.clone(),
        }
    }
}
