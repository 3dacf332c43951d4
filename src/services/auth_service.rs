use anyhow::{anyhow, Result};
use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::Duration;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::config::ServerConfig;
use crate::database::entities::{user_sessions, users};
use crate::errors::{CoreError, CoreResult};

/// Sessions live for a day
pub const SESSION_LIFETIME_HOURS: i64 = 24;

/// The user behind a valid session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: String,
    pub email: String,
    pub language: Option<String>,
}

impl From<users::Model> for AuthenticatedUser {
    fn from(user: users::Model) -> Self {
        Self {
            id: user.id,
            email: user.email,
            language: user.language,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthProviders {
    pub credentials: bool,
    pub google: bool,
}

/// Sign-in methods the login page may offer.
pub fn available_providers(config: &ServerConfig) -> AuthProviders {
    AuthProviders {
        credentials: true,
        google: config.google_enabled(),
    }
}

#[derive(Clone)]
pub struct AuthService {
    db: DatabaseConnection,
}

impl AuthService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Hash a password using bcrypt
    pub fn hash_password(password: &str) -> Result<String> {
        if password.len() < 8 {
            return Err(anyhow!("Password must be at least 8 characters long"));
        }

        hash(password, DEFAULT_COST).map_err(|e| anyhow!("Failed to hash password: {}", e))
    }

    /// Verify a password against a hash
    pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
        verify(password, hash).map_err(|e| anyhow!("Failed to verify password: {}", e))
    }

    pub fn generate_session_token() -> String {
        Uuid::new_v4().simple().to_string()
    }

    /// Validate email format
    pub fn validate_email(email: &str) -> Result<()> {
        let (local_part, domain_part) = email
            .split_once('@')
            .ok_or_else(|| anyhow!("Invalid email format: must contain an @"))?;

        if local_part.is_empty() || domain_part.is_empty() || domain_part.contains('@') {
            return Err(anyhow!("Invalid email format"));
        }

        if !domain_part.contains('.')
            || domain_part.starts_with('.')
            || domain_part.ends_with('.')
        {
            return Err(anyhow!("Invalid email format: bad domain"));
        }

        if email.len() > 254 {
            return Err(anyhow!("Email is too long"));
        }

        Ok(())
    }

    /// Create a user with a password login.
    pub async fn register_user(
        &self,
        email: &str,
        name: &str,
        password: &str,
        language: Option<String>,
    ) -> CoreResult<users::Model> {
        Self::validate_email(email).map_err(|e| CoreError::validation(e.to_string()))?;
        let password_hash =
            Self::hash_password(password).map_err(|e| CoreError::validation(e.to_string()))?;

        let user = users::ActiveModel::new(email, name)
            .set_language(language)
            .set_password_hash(password_hash)
            .insert(&self.db)
            .await?;

        Ok(user)
    }

    /// Check credentials and open a session, returning its token.
    pub async fn login(&self, email: &str, password: &str) -> CoreResult<String> {
        let user = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await?
            .ok_or_else(|| CoreError::unauthorized("Invalid credentials"))?;

        let hash = user
            .password_hash
            .as_deref()
            .ok_or_else(|| CoreError::unauthorized("Invalid credentials"))?;
        let valid = Self::verify_password(password, hash)
            .map_err(|e| CoreError::internal(format!("Password check failed: {}", e)))?;
        if !valid {
            return Err(CoreError::unauthorized("Invalid credentials"));
        }

        Ok(self.create_session(&user.id).await?.token)
    }

    pub async fn create_session(&self, user_id: &str) -> CoreResult<user_sessions::Model> {
        let session = user_sessions::ActiveModel::new(
            user_id.to_string(),
            Self::generate_session_token(),
            Duration::hours(SESSION_LIFETIME_HOURS),
        )
        .insert(&self.db)
        .await?;

        debug!(user_id, "session created");
        Ok(session)
    }

    /// Resolve a session token to its user. Unknown and expired sessions are
    /// both reported as unauthorized.
    pub async fn authenticate(&self, token: &str) -> CoreResult<AuthenticatedUser> {
        let session = user_sessions::Entity::find()
            .filter(user_sessions::Column::Token.eq(token))
            .one(&self.db)
            .await?
            .ok_or_else(|| CoreError::unauthorized("Session not found"))?;

        if session.is_expired() {
            return Err(CoreError::unauthorized("Session expired"));
        }

        let user = users::Entity::find_by_id(session.user_id.clone())
            .one(&self.db)
            .await?
            .ok_or_else(|| CoreError::unauthorized("User not found"))?;

        Ok(user.into())
    }
}
