use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, Set};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub email: String,
    pub name: String,
    pub surname: Option<String>,
    pub nickname: Option<String>,
    pub language: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub created_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_sessions::Entity")]
    UserSessions,
    #[sea_orm(has_many = "super::people::Entity")]
    People,
    #[sea_orm(has_many = "super::unsubscribe_tokens::Entity")]
    UnsubscribeTokens,
}

impl Related<super::user_sessions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserSessions.def()
    }
}

impl Related<super::people::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::People.def()
    }
}

impl Related<super::unsubscribe_tokens::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UnsubscribeTokens.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Set(uuid::Uuid::new_v4().to_string()),
            email: Set(email.into()),
            name: Set(name.into()),
            surname: Set(None),
            nickname: Set(None),
            language: Set(None),
            password_hash: Set(None),
            created_at: Set(chrono::Utc::now()),
        }
    }

    pub fn set_language(mut self, language: Option<String>) -> Self {
        self.language = Set(language);
        self
    }

    pub fn set_password_hash(mut self, hash: String) -> Self {
        self.password_hash = ActiveValue::Set(Some(hash));
        self
    }
}
