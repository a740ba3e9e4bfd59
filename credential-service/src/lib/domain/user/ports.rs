use async_trait::async_trait;
use auth::Credentials;

use crate::domain::user::models::ChangePasswordCommand;
use crate::domain::user::models::IssueTokenCommand;
use crate::domain::user::models::IssuedToken;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::User;
use crate::user::errors::UserError;

/// Credential operations exposed to inbound adapters.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new username with a password.
    ///
    /// # Errors
    /// * `MalformedName` - Username does not match the allow pattern
    /// * `NameUnavailable` - Username is reserved or already taken
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterCommand) -> Result<(), UserError>;

    /// Exchange a username and password for a signed token.
    ///
    /// # Errors
    /// * `NotFound` / `InvalidCredentials` - Unknown user or wrong password
    /// * `Signing` - Token signing failed
    /// * `DatabaseError` - Database operation failed
    async fn issue_token(&self, command: IssueTokenCommand) -> Result<IssuedToken, UserError>;

    /// Replace a user's password after verifying the current one.
    ///
    /// # Errors
    /// * `NotFound` / `InvalidCredentials` - Unknown user or wrong password
    /// * `DatabaseError` - Database operation failed
    async fn change_password(&self, command: ChangePasswordCommand) -> Result<(), UserError>;

    /// PEM encoded public key for verifying issued tokens.
    fn public_key(&self) -> &str;
}

/// Persistence operations for user records.
///
/// Implementations are the authority on username uniqueness: `create` must
/// fail with `NameUnavailable` when the name exists, even under concurrent
/// registrations.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Errors
    /// * `NameUnavailable` - Username is already taken
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<(), UserError>;

    /// Retrieve user by username.
    ///
    /// # Returns
    /// Optional user record (None if not found)
    ///
    /// # Errors
    /// * `Credentials` - Stored salt or hash has the wrong length
    /// * `DatabaseError` - Database operation failed
    async fn find_by_name(&self, name: &str) -> Result<Option<User>, UserError>;

    /// Count users registered under a username (0 or 1).
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn count_by_name(&self, name: &str) -> Result<u64, UserError>;

    /// Overwrite the salt and hash of an existing user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update_credentials(
        &self,
        name: &str,
        credentials: Credentials,
    ) -> Result<(), UserError>;
}
