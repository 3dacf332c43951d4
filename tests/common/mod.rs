//! Fixtures shared by the integration tests

#![allow(dead_code)]

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use rapport::database::entities::{
    groups, important_dates, people, person_groups, relationship_types, relationships, users,
};
use rapport::database::setup_database;
use rapport::names::NameParts;
use rapport::services::AuthService;
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};
use tempfile::NamedTempFile;

pub const PASSWORD: &str = "correct-horse-battery";

/// Migrated database in a temporary file. Keep the file alive for as long as
/// the connection is used.
pub async fn setup_test_db() -> Result<(DatabaseConnection, NamedTempFile)> {
    let temp_file = NamedTempFile::new()?;
    let db_url = format!("sqlite://{}?mode=rwc", temp_file.path().display());

    let db = Database::connect(&db_url).await?;
    setup_database(&db).await?;

    Ok((db, temp_file))
}

pub async fn create_user(
    db: &DatabaseConnection,
    email: &str,
    language: Option<&str>,
) -> Result<users::Model> {
    let user = AuthService::new(db.clone())
        .register_user(email, "Test User", PASSWORD, language.map(str::to_string))
        .await?;
    Ok(user)
}

pub async fn session_for(db: &DatabaseConnection, user_id: &str) -> Result<String> {
    let service = AuthService::new(db.clone());
    let session = service.create_session(user_id).await?;
    Ok(session.token)
}

pub async fn create_type(
    db: &DatabaseConnection,
    user_id: &str,
    label: &str,
    color: Option<&str>,
) -> Result<relationship_types::Model> {
    let model = relationship_types::ActiveModel::new(
        user_id,
        label.to_lowercase(),
        label,
        color.map(str::to_string),
    )
    .insert(db)
    .await?;
    Ok(model)
}

pub async fn set_inverse(
    db: &DatabaseConnection,
    relationship_type: &relationship_types::Model,
    inverse_id: &str,
) -> Result<relationship_types::Model> {
    let active: relationship_types::ActiveModel = relationship_type.clone().into();
    let active = active.set_inverse(Some(inverse_id.to_string()));
    Ok(active.update(db).await?)
}

pub async fn create_person(
    db: &DatabaseConnection,
    user_id: &str,
    names: NameParts,
    relationship_to_user: Option<&str>,
) -> Result<people::Model> {
    let person = people::ActiveModel::new(user_id, names)
        .set_relationship_to_user(relationship_to_user.map(str::to_string))
        .insert(db)
        .await?;
    Ok(person)
}

pub async fn relate(
    db: &DatabaseConnection,
    from: &str,
    to: &str,
    relationship_type: Option<&str>,
) -> Result<relationships::Model> {
    let relationship_type = relationship_type.map(str::to_string);
    let relationship = relationships::ActiveModel::new(from, to, relationship_type)
        .insert(db)
        .await?;
    Ok(relationship)
}

pub async fn create_group(
    db: &DatabaseConnection,
    user_id: &str,
    name: &str,
    color: Option<&str>,
) -> Result<groups::Model> {
    Ok(groups::ActiveModel::new(user_id, name, color.map(str::to_string))
        .insert(db)
        .await?)
}

pub async fn add_to_group(db: &DatabaseConnection, person_id: &str, group_id: &str) -> Result<()> {
    person_groups::ActiveModel {
        person_id: Set(person_id.to_string()),
        group_id: Set(group_id.to_string()),
    }
    .insert(db)
    .await?;
    Ok(())
}

pub async fn create_important_date(
    db: &DatabaseConnection,
    person_id: &str,
    title: &str,
) -> Result<important_dates::Model> {
    let date = NaiveDate::from_ymd_opt(1990, 4, 12).expect("valid date");
    Ok(important_dates::ActiveModel::new(person_id, title, date)
        .insert(db)
        .await?)
}

pub async fn delete_person(db: &DatabaseConnection, person: &people::Model) -> Result<()> {
    let mut active: people::ActiveModel = person.clone().into();
    active.deleted_at = Set(Some(Utc::now()));
    active.update(db).await?;
    Ok(())
}

pub async fn delete_relationship(
    db: &DatabaseConnection,
    relationship: &relationships::Model,
) -> Result<()> {
    let mut active: relationships::ActiveModel = relationship.clone().into();
    active.deleted_at = Set(Some(Utc::now()));
    active.update(db).await?;
    Ok(())
}

pub async fn delete_type(
    db: &DatabaseConnection,
    relationship_type: &relationship_types::Model,
) -> Result<()> {
    let mut active: relationship_types::ActiveModel = relationship_type.clone().into();
    active.deleted_at = Set(Some(Utc::now()));
    active.update(db).await?;
    Ok(())
}

pub async fn delete_group(db: &DatabaseConnection, group: &groups::Model) -> Result<()> {
    let mut active: groups::ActiveModel = group.clone().into();
    active.deleted_at = Set(Some(Utc::now()));
    active.update(db).await?;
    Ok(())
}
