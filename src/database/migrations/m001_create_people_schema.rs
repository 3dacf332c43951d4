use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).string().not_null().primary_key())
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(ColumnDef::new(Users::Surname).string().null())
                    .col(ColumnDef::new(Users::Nickname).string().null())
                    .col(ColumnDef::new(Users::Language).string().null())
                    .col(ColumnDef::new(Users::PasswordHash).string().null())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserSessions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserSessions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(UserSessions::Token)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(UserSessions::UserId).string().not_null())
                    .col(
                        ColumnDef::new(UserSessions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserSessions::ExpiresAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_sessions_user_id")
                            .from(UserSessions::Table, UserSessions::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RelationshipTypes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RelationshipTypes::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(RelationshipTypes::UserId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(RelationshipTypes::Name).string().not_null())
                    .col(ColumnDef::new(RelationshipTypes::Label).string().not_null())
                    .col(ColumnDef::new(RelationshipTypes::Color).string().null())
                    .col(ColumnDef::new(RelationshipTypes::InverseId).string().null())
                    .col(
                        ColumnDef::new(RelationshipTypes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RelationshipTypes::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_relationship_types_user_id")
                            .from(RelationshipTypes::Table, RelationshipTypes::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_relationship_types_inverse_id")
                            .from(RelationshipTypes::Table, RelationshipTypes::InverseId)
                            .to(RelationshipTypes::Table, RelationshipTypes::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(People::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(People::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(People::UserId).string().not_null())
                    .col(ColumnDef::new(People::Name).string().not_null())
                    .col(ColumnDef::new(People::Surname).string().null())
                    .col(ColumnDef::new(People::MiddleName).string().null())
                    .col(ColumnDef::new(People::SecondLastName).string().null())
                    .col(ColumnDef::new(People::Nickname).string().null())
                    .col(ColumnDef::new(People::RelationshipToUserId).string().null())
                    .col(
                        ColumnDef::new(People::ContactReminderEnabled)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(People::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(People::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_people_user_id")
                            .from(People::Table, People::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_people_relationship_to_user_id")
                            .from(People::Table, People::RelationshipToUserId)
                            .to(RelationshipTypes::Table, RelationshipTypes::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_people_user_id")
                    .table(People::Table)
                    .col(People::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Groups::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Groups::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Groups::UserId).string().not_null())
                    .col(ColumnDef::new(Groups::Name).string().not_null())
                    .col(ColumnDef::new(Groups::Color).string().null())
                    .col(
                        ColumnDef::new(Groups::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Groups::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_groups_user_id")
                            .from(Groups::Table, Groups::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PersonGroups::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(PersonGroups::PersonId).string().not_null())
                    .col(ColumnDef::new(PersonGroups::GroupId).string().not_null())
                    .primary_key(
                        Index::create()
                            .col(PersonGroups::PersonId)
                            .col(PersonGroups::GroupId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_person_groups_person_id")
                            .from(PersonGroups::Table, PersonGroups::PersonId)
                            .to(People::Table, People::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_person_groups_group_id")
                            .from(PersonGroups::Table, PersonGroups::GroupId)
                            .to(Groups::Table, Groups::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Relationships::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Relationships::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Relationships::PersonId).string().not_null())
                    .col(
                        ColumnDef::new(Relationships::RelatedPersonId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Relationships::RelationshipTypeId)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Relationships::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Relationships::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_relationships_person_id")
                            .from(Relationships::Table, Relationships::PersonId)
                            .to(People::Table, People::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_relationships_related_person_id")
                            .from(Relationships::Table, Relationships::RelatedPersonId)
                            .to(People::Table, People::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_relationships_relationship_type_id")
                            .from(Relationships::Table, Relationships::RelationshipTypeId)
                            .to(RelationshipTypes::Table, RelationshipTypes::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_relationships_person_id")
                    .table(Relationships::Table)
                    .col(Relationships::PersonId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ImportantDates::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ImportantDates::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ImportantDates::PersonId).string().not_null())
                    .col(ColumnDef::new(ImportantDates::Title).string().not_null())
                    .col(ColumnDef::new(ImportantDates::Date).date().not_null())
                    .col(
                        ColumnDef::new(ImportantDates::ReminderEnabled)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(ImportantDates::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ImportantDates::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_important_dates_person_id")
                            .from(ImportantDates::Table, ImportantDates::PersonId)
                            .to(People::Table, People::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ImportantDates::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Relationships::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PersonGroups::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Groups::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(People::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RelationshipTypes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserSessions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub(super) enum Users {
    Table,
    Id,
    Email,
    Name,
    Surname,
    Nickname,
    Language,
    PasswordHash,
    CreatedAt,
}

#[derive(Iden)]
enum UserSessions {
    Table,
    Id,
    Token,
    UserId,
    CreatedAt,
    ExpiresAt,
}

#[derive(Iden)]
enum RelationshipTypes {
    Table,
    Id,
    UserId,
    Name,
    Label,
    Color,
    InverseId,
    CreatedAt,
    DeletedAt,
}

#[derive(Iden)]
enum People {
    Table,
    Id,
    UserId,
    Name,
    Surname,
    MiddleName,
    SecondLastName,
    Nickname,
    RelationshipToUserId,
    ContactReminderEnabled,
    CreatedAt,
    DeletedAt,
}

#[derive(Iden)]
enum Groups {
    Table,
    Id,
    UserId,
    Name,
    Color,
    CreatedAt,
    DeletedAt,
}

#[derive(Iden)]
enum PersonGroups {
    Table,
    PersonId,
    GroupId,
}

#[derive(Iden)]
enum Relationships {
    Table,
    Id,
    PersonId,
    RelatedPersonId,
    RelationshipTypeId,
    CreatedAt,
    DeletedAt,
}

#[derive(Iden)]
enum ImportantDates {
    Table,
    Id,
    PersonId,
    Title,
    Date,
    ReminderEnabled,
    CreatedAt,
    DeletedAt,
}
