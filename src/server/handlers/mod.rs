pub mod auth;
pub mod health;
pub mod people;
pub mod relationship_types;
pub mod unsubscribe;
