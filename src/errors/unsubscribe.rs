use thiserror::Error;

/// Reasons an unsubscribe token cannot be consumed
#[derive(Error, Debug)]
pub enum UnsubscribeError {
    /// No token with this value exists
    #[error("Unsubscribe token not found")]
    InvalidToken,

    /// The token was consumed before
    #[error("Unsubscribe token already used")]
    AlreadyUsed,

    /// The token is past its expiry
    #[error("Unsubscribe token expired")]
    Expired,

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl UnsubscribeError {
    /// Code returned to clients in the `error` field
    pub fn code(&self) -> &'static str {
        match self {
            UnsubscribeError::InvalidToken => "INVALID_TOKEN",
            UnsubscribeError::AlreadyUsed => "ALREADY_USED",
            UnsubscribeError::Expired => "EXPIRED",
            UnsubscribeError::Database(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a client error (400-series)
    pub fn is_client_error(&self) -> bool {
        !matches!(self, UnsubscribeError::Database(_))
    }
}
