use chrono::{Duration, Utc};
use rand::RngCore;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{info, warn};

use crate::database::entities::unsubscribe_tokens::{self, ReminderType};
use crate::database::entities::{important_dates, people, users};
use crate::errors::{CoreResult, UnsubscribeError, UnsubscribeResult};
use crate::i18n::Translator;
use crate::names::format_full_name;

pub const TOKEN_EXPIRY_DAYS: i64 = 90;
const TOKEN_BYTES: usize = 32;

/// 32 random bytes, hex encoded.
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUser {
    pub id: String,
    pub email: String,
    pub language: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConsumedToken {
    pub user: TokenUser,
    pub reminder_type: ReminderType,
    pub entity_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnsubscribeDetails {
    pub reminder_type: ReminderType,
    pub entity_name: String,
    pub used: bool,
    pub expired: bool,
}

/// Single-use links that switch off one reminder from an email.
pub struct UnsubscribeService {
    db: DatabaseConnection,
}

impl UnsubscribeService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Token for one reminder. An unused, unexpired token for the same
    /// reminder is handed out again instead of minting a new one.
    pub async fn create_token(
        &self,
        user_id: &str,
        reminder_type: ReminderType,
        entity_id: &str,
    ) -> CoreResult<String> {
        let now = Utc::now();
        let existing = unsubscribe_tokens::Entity::find()
            .filter(unsubscribe_tokens::Column::UserId.eq(user_id))
            .filter(unsubscribe_tokens::Column::ReminderType.eq(reminder_type.as_str()))
            .filter(unsubscribe_tokens::Column::EntityId.eq(entity_id))
            .filter(unsubscribe_tokens::Column::Used.eq(false))
            .filter(unsubscribe_tokens::Column::ExpiresAt.gt(now))
            .one(&self.db)
            .await?;

        if let Some(existing) = existing {
            return Ok(existing.token);
        }

        let created = unsubscribe_tokens::ActiveModel::new(
            generate_token(),
            user_id.to_string(),
            reminder_type,
            entity_id.to_string(),
            now + Duration::days(TOKEN_EXPIRY_DAYS),
        )
        .insert(&self.db)
        .await?;

        Ok(created.token)
    }

    /// Validate a token, mark it used and disable its reminder.
    pub async fn consume_token(&self, token: &str) -> UnsubscribeResult<ConsumedToken> {
        let record = unsubscribe_tokens::Entity::find()
            .filter(unsubscribe_tokens::Column::Token.eq(token))
            .one(&self.db)
            .await?
            .ok_or(UnsubscribeError::InvalidToken)?;

        if record.used {
            return Err(UnsubscribeError::AlreadyUsed);
        }
        if record.is_expired() {
            return Err(UnsubscribeError::Expired);
        }

        let reminder_type = record.reminder().map_err(|e| {
            warn!(token_id = %record.id, "stored token has {}", e);
            UnsubscribeError::InvalidToken
        })?;

        let txn = self.db.begin().await?;

        // Guarded on `used` so two concurrent requests cannot both succeed
        let marked = unsubscribe_tokens::Entity::update_many()
            .col_expr(unsubscribe_tokens::Column::Used, Expr::value(true))
            .col_expr(unsubscribe_tokens::Column::UsedAt, Expr::value(Utc::now()))
            .filter(unsubscribe_tokens::Column::Id.eq(record.id.clone()))
            .filter(unsubscribe_tokens::Column::Used.eq(false))
            .exec(&txn)
            .await?;
        if marked.rows_affected == 0 {
            txn.rollback().await?;
            return Err(UnsubscribeError::AlreadyUsed);
        }

        match reminder_type {
            ReminderType::ImportantDate => {
                important_dates::Entity::update_many()
                    .col_expr(important_dates::Column::ReminderEnabled, Expr::value(false))
                    .filter(important_dates::Column::Id.eq(record.entity_id.clone()))
                    .exec(&txn)
                    .await?;
            }
            ReminderType::Contact => {
                people::Entity::update_many()
                    .col_expr(people::Column::ContactReminderEnabled, Expr::value(false))
                    .filter(people::Column::Id.eq(record.entity_id.clone()))
                    .exec(&txn)
                    .await?;
            }
        }

        let user = users::Entity::find_by_id(record.user_id.clone())
            .one(&txn)
            .await?
            .ok_or(UnsubscribeError::InvalidToken)?;

        txn.commit().await?;

        info!(
            user_id = %user.id,
            reminder_type = %reminder_type,
            entity_id = %record.entity_id,
            "reminder disabled by unsubscribe token"
        );

        Ok(ConsumedToken {
            user: TokenUser {
                id: user.id,
                email: user.email,
                language: user.language,
            },
            reminder_type,
            entity_id: record.entity_id,
        })
    }

    /// What a token would switch off, for showing before or after use.
    /// `None` for unknown tokens.
    pub async fn get_details(&self, token: &str) -> CoreResult<Option<UnsubscribeDetails>> {
        let Some(record) = unsubscribe_tokens::Entity::find()
            .filter(unsubscribe_tokens::Column::Token.eq(token))
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        let Ok(reminder_type) = record.reminder() else {
            warn!(token_id = %record.id, "token with unknown reminder type");
            return Ok(None);
        };

        let language = users::Entity::find_by_id(record.user_id.clone())
            .one(&self.db)
            .await?
            .and_then(|u| u.language);
        let entity_name = self
            .entity_name(reminder_type, &record.entity_id, language.as_deref())
            .await?;

        Ok(Some(UnsubscribeDetails {
            reminder_type,
            entity_name,
            used: record.used,
            expired: record.is_expired(),
        }))
    }

    /// Display name of the reminder's subject, empty when it no longer exists.
    pub async fn entity_name(
        &self,
        reminder_type: ReminderType,
        entity_id: &str,
        language: Option<&str>,
    ) -> CoreResult<String> {
        match reminder_type {
            ReminderType::ImportantDate => {
                let found = important_dates::Entity::find_by_id(entity_id.to_string())
                    .find_also_related(people::Entity)
                    .one(&self.db)
                    .await?;
                let Some((date, Some(person))) = found else {
                    return Ok(String::new());
                };

                let t = Translator::for_language(language, Some("unsubscribe"));
                let args = HashMap::from([
                    ("name", format_full_name(&person.name_parts())),
                    ("title", date.title),
                ]);
                Ok(t.t_with("importantDateEntity", &args))
            }
            ReminderType::Contact => {
                let person = people::Entity::find_by_id(entity_id.to_string())
                    .one(&self.db)
                    .await?;
                Ok(person.map_or_else(String::new, |p| format_full_name(&p.name_parts())))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_tokens_are_64_hex_chars() {
        let token = generate_token();
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(token, generate_token());
    }
}
