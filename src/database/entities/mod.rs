pub mod groups;
pub mod important_dates;
pub mod people;
pub mod person_groups;
pub mod relationship_types;
pub mod relationships;
pub mod unsubscribe_tokens;
pub mod user_sessions;
pub mod users;
