use sea_orm_migration::prelude::*;

use super::m001_create_people_schema::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UnsubscribeTokens::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UnsubscribeTokens::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(UnsubscribeTokens::Token)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(UnsubscribeTokens::UserId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UnsubscribeTokens::ReminderType)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UnsubscribeTokens::EntityId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UnsubscribeTokens::Used)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(UnsubscribeTokens::UsedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(UnsubscribeTokens::ExpiresAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UnsubscribeTokens::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_unsubscribe_tokens_user_id")
                            .from(UnsubscribeTokens::Table, UnsubscribeTokens::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Lookup of a reusable token for one reminder
        manager
            .create_index(
                Index::create()
                    .name("idx_unsubscribe_tokens_reminder")
                    .table(UnsubscribeTokens::Table)
                    .col(UnsubscribeTokens::UserId)
                    .col(UnsubscribeTokens::ReminderType)
                    .col(UnsubscribeTokens::EntityId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UnsubscribeTokens::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum UnsubscribeTokens {
    Table,
    Id,
    Token,
    UserId,
    ReminderType,
    EntityId,
    Used,
    UsedAt,
    ExpiresAt,
    CreatedAt,
}
