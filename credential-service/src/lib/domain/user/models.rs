use std::fmt;

use auth::Credentials;
use chrono::DateTime;
use chrono::Utc;

/// User record.
///
/// Owned by the user store; never cached beyond a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub name: String,
    pub credentials: Credentials,
}

/// Username value type
///
/// Only produced by `UsernamePolicy::validate`, so holding one means the
/// name passed the allow pattern and is not reserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    pub(crate) fn new(username: String) -> Self {
        Self(username)
    }

    /// Get username as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to register a new user
///
/// Holds a plaintext password and has no `Debug` impl.
pub struct RegisterCommand {
    pub name: String,
    pub password: String,
}

impl RegisterCommand {
    /// Construct a new register command.
    ///
    /// # Arguments
    /// * `name` - Raw username from the request path (validated by the service)
    /// * `password` - Plain text password (will be hashed by service)
    pub fn new(name: String, password: String) -> Self {
        Self { name, password }
    }
}

/// Command to exchange a password for a signed token
pub struct IssueTokenCommand {
    pub name: String,
    pub password: String,
}

impl IssueTokenCommand {
    pub fn new(name: String, password: String) -> Self {
        Self { name, password }
    }
}

/// Command to rotate a user's password
pub struct ChangePasswordCommand {
    pub name: String,
    pub password: String,
    pub new_password: String,
}

impl ChangePasswordCommand {
    pub fn new(name: String, password: String, new_password: String) -> Self {
        Self {
            name,
            password,
            new_password,
        }
    }
}

/// Signed token with advisory expiry metadata.
///
/// `expires_at` and `max_age` are computed at issuance and are not part of
/// the signed payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub max_age: i64,
}
