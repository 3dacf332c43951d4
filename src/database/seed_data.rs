use anyhow::Result;
use chrono::NaiveDate;
use sea_orm::*;
use tracing::info;

use crate::database::entities::{
    groups, important_dates, people, person_groups, relationship_types, relationships, users,
};
use crate::names::NameParts;
use crate::services::AuthService;

pub const DEMO_EMAIL: &str = "demo@rapport.local";
pub const DEMO_PASSWORD: &str = "rapport-demo";

#[derive(Debug, Clone)]
pub struct SeedSummary {
    pub user_id: String,
    pub session_token: String,
    pub focal_person_id: String,
}

/// Create a demo user with a small network of people. Running it twice only
/// opens a new session for the existing demo user.
pub async fn create_demo_network(db: &DatabaseConnection) -> Result<SeedSummary> {
    let auth = AuthService::new(db.clone());

    if let Some(user) = users::Entity::find()
        .filter(users::Column::Email.eq(DEMO_EMAIL))
        .one(db)
        .await?
    {
        info!("Demo user already exists, skipping seed data creation");
        let focal = people::Entity::find()
            .filter(people::Column::UserId.eq(user.id.clone()))
            .order_by_asc(people::Column::CreatedAt)
            .one(db)
            .await?;
        let session = auth.create_session(&user.id).await?;
        return Ok(SeedSummary {
            user_id: user.id,
            session_token: session.token,
            focal_person_id: focal.map(|p| p.id).unwrap_or_default(),
        });
    }

    info!("Creating demo user {}", DEMO_EMAIL);
    let user = auth
        .register_user(DEMO_EMAIL, "Demo", DEMO_PASSWORD, Some("en".to_string()))
        .await?;

    let parent = insert_type(db, &user.id, "parent", "Parent", Some("#F59E0B")).await?;
    let child = insert_type(db, &user.id, "child", "Child", Some("#10B981")).await?;
    link_inverse(db, &parent, &child.id).await?;
    link_inverse(db, &child, &parent.id).await?;

    let sibling = insert_type(db, &user.id, "sibling", "Sibling", Some("#8B5CF6")).await?;
    link_inverse(db, &sibling, &sibling.id).await?;
    let friend = insert_type(db, &user.id, "friend", "Friend", None).await?;
    link_inverse(db, &friend, &friend.id).await?;
    let colleague = insert_type(db, &user.id, "colleague", "Colleague", Some("#0EA5E9")).await?;

    let family = groups::ActiveModel::new(&user.id, "Family", Some("#EF4444".to_string()))
        .insert(db)
        .await?;
    let work = groups::ActiveModel::new(&user.id, "Work", None)
        .insert(db)
        .await?;

    let alex = people::ActiveModel::new(&user.id, NameParts::new("Alex").with_surname("Rivera"))
        .set_relationship_to_user(Some(sibling.id.clone()))
        .insert(db)
        .await?;
    let sam = people::ActiveModel::new(&user.id, NameParts::new("Samuel").with_nickname("Sam"))
        .insert(db)
        .await?;
    let jordan = people::ActiveModel::new(&user.id, NameParts::new("Jordan").with_surname("Lee"))
        .set_relationship_to_user(Some(friend.id.clone()))
        .insert(db)
        .await?;
    info!("Created demo people for user {}", user.id);

    for (person, group) in [(&alex, &family), (&sam, &family), (&jordan, &work)] {
        person_groups::ActiveModel {
            person_id: Set(person.id.clone()),
            group_id: Set(group.id.clone()),
        }
        .insert(db)
        .await?;
    }

    for (from, to, kind) in [
        (&alex, &sam, &parent),
        (&alex, &jordan, &colleague),
        (&jordan, &sam, &friend),
    ] {
        relationships::ActiveModel::new(&from.id, &to.id, Some(kind.id.clone()))
            .insert(db)
            .await?;
    }

    if let Some(birthday) = NaiveDate::from_ymd_opt(1990, 4, 12) {
        important_dates::ActiveModel::new(&alex.id, "Birthday", birthday)
            .insert(db)
            .await?;
    }

    let session = auth.create_session(&user.id).await?;
    info!("Successfully created demo network for user {}", user.id);

    Ok(SeedSummary {
        user_id: user.id,
        session_token: session.token,
        focal_person_id: alex.id,
    })
}

async fn insert_type(
    db: &DatabaseConnection,
    user_id: &str,
    name: &str,
    label: &str,
    color: Option<&str>,
) -> Result<relationship_types::Model> {
    let color = color.map(str::to_string);
    let model = relationship_types::ActiveModel::new(user_id, name, label, color)
        .insert(db)
        .await?;
    Ok(model)
}

async fn link_inverse(
    db: &DatabaseConnection,
    relationship_type: &relationship_types::Model,
    inverse_id: &str,
) -> Result<()> {
    let active: relationship_types::ActiveModel = relationship_type.clone().into();
    active
        .set_inverse(Some(inverse_id.to_string()))
        .update(db)
        .await?;
    Ok(())
}
