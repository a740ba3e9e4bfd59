use auth::JwtError;
use auth::PasswordError;
use thiserror::Error;

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username is malformed: {0:?}")]
    Malformed(String),

    #[error("Username is reserved: {0}")]
    Reserved(String),
}

/// Top-level error for all user-related operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    #[error("Malformed username: {0:?}")]
    MalformedName(String),

    /// Reserved and taken names are reported identically.
    #[error("Username unavailable: {0}")]
    NameUnavailable(String),

    #[error("User not found: {0}")]
    NotFound(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Stored credentials are corrupt: {0}")]
    Credentials(#[from] PasswordError),

    #[error("Token signing failed: {0}")]
    Signing(#[from] JwtError),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<UsernameError> for UserError {
    fn from(err: UsernameError) -> Self {
        match err {
            UsernameError::Malformed(name) => UserError::MalformedName(name),
            UsernameError::Reserved(name) => UserError::NameUnavailable(name),
        }
    }
}
