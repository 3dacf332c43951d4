use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Runtime configuration of the HTTP service.
///
/// Read from a TOML file when one is given; CLI flags override file values.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    pub database: String,
    pub cors_origin: Option<String>,
    /// Hosted deployments may offer third-party sign-in
    pub saas_mode: bool,
    pub google_client_id: Option<String>,
    pub google_client_secret: Option<String>,
    pub default_locale: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            database: "rapport.db".to_string(),
            cors_origin: None,
            saas_mode: false,
            google_client_id: None,
            google_client_secret: None,
            default_locale: crate::i18n::DEFAULT_LOCALE.to_string(),
        }
    }
}

impl ServerConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Google sign-in needs SaaS mode and a complete client credential pair.
    pub fn google_enabled(&self) -> bool {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.is_empty());
        self.saas_mode && present(&self.google_client_id) && present(&self.google_client_secret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_file_is_empty() {
        let config = ServerConfig::from_toml("").unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.port, 3000);
        assert_eq!(config.default_locale, "en");
    }

    #[test]
    fn test_partial_file() {
        let config = ServerConfig::from_toml(
            r#"
            port = 8080
            saas_mode = true
            google_client_id = "id"
            google_client_secret = "secret"
            "#,
        )
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.database, "rapport.db");
        assert!(config.google_enabled());
    }

    #[test]
    fn test_google_requires_saas_and_both_credentials() {
        let mut config = ServerConfig {
            google_client_id: Some("id".to_string()),
            google_client_secret: Some("secret".to_string()),
            ..Default::default()
        };
        assert!(!config.google_enabled());

        config.saas_mode = true;
        assert!(config.google_enabled());

        config.google_client_secret = Some(String::new());
        assert!(!config.google_enabled());
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        assert!(ServerConfig::from_toml("port = \"not a number\"").is_err());
    }
}
