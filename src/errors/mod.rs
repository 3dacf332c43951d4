//! Error types for rapport
//!
//! - **CoreError**: kind-tagged error shared by services and the HTTP layer
//! - **UnsubscribeError**: failures of the email unsubscribe flow, each with a
//!   stable wire code
//!
//! ```rust
//! use rapport::errors::{CoreError, CoreErrorKind};
//!
//! let err = CoreError::not_found("Person", "42");
//! assert_eq!(err.kind(), CoreErrorKind::NotFound);
//! ```

pub mod core_error;
pub mod unsubscribe;

pub use core_error::{CoreError, CoreErrorKind};
pub use unsubscribe::UnsubscribeError;

/// Result type alias for service operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Result type alias for the unsubscribe flow
pub type UnsubscribeResult<T> = Result<T, UnsubscribeError>;
