use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, Set};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which kind of reminder a token switches off. Stored as its wire string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReminderType {
    ImportantDate,
    Contact,
}

impl ReminderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReminderType::ImportantDate => "IMPORTANT_DATE",
            ReminderType::Contact => "CONTACT",
        }
    }
}

impl fmt::Display for ReminderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReminderType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IMPORTANT_DATE" => Ok(ReminderType::ImportantDate),
            "CONTACT" => Ok(ReminderType::Contact),
            other => Err(format!("Unknown reminder type: {}", other)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "unsubscribe_tokens")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub token: String,
    pub user_id: String,
    pub reminder_type: String,
    pub entity_id: String,
    pub used: bool,
    pub used_at: Option<ChronoDateTimeUtc>,
    pub expires_at: ChronoDateTimeUtc,
    pub created_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    Users,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    pub fn new(
        token: String,
        user_id: String,
        reminder_type: ReminderType,
        entity_id: String,
        expires_at: ChronoDateTimeUtc,
    ) -> Self {
        Self {
            id: Set(uuid::Uuid::new_v4().to_string()),
            token: Set(token),
            user_id: Set(user_id),
            reminder_type: Set(reminder_type.as_str().to_string()),
            entity_id: Set(entity_id),
            used: Set(false),
            used_at: ActiveValue::NotSet,
            expires_at: Set(expires_at),
            created_at: Set(chrono::Utc::now()),
        }
    }
}

impl Model {
    pub fn is_expired(&self) -> bool {
        self.expires_at < chrono::Utc::now()
    }

    pub fn reminder(&self) -> Result<ReminderType, String> {
        self.reminder_type.parse()
    }
}
