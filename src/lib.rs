pub mod config;
pub mod database;
pub mod errors;
pub mod graph;
pub mod i18n;
pub mod names;
pub mod services;

#[cfg(feature = "server")]
pub mod server;
