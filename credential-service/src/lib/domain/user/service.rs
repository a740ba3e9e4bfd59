use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use chrono::Duration;
use chrono::Utc;

use crate::domain::user::models::ChangePasswordCommand;
use crate::domain::user::models::IssueTokenCommand;
use crate::domain::user::models::IssuedToken;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::User;
use crate::domain::user::policy::UsernamePolicy;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for credential operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
    username_policy: UsernamePolicy,
    token_lifetime: i64,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password verification and token signing
    /// * `username_policy` - Allowed and reserved username rules
    /// * `token_lifetime` - Advertised token lifetime in seconds
    pub fn new(
        repository: Arc<UR>,
        authenticator: Arc<Authenticator>,
        username_policy: UsernamePolicy,
        token_lifetime: i64,
    ) -> Self {
        Self {
            repository,
            authenticator,
            username_policy,
            token_lifetime,
        }
    }

    async fn find_verified_user(&self, name: &str, password: &str) -> Result<User, UserError> {
        let user = self
            .repository
            .find_by_name(name)
            .await?
            .ok_or_else(|| UserError::NotFound(name.to_string()))?;

        if !self
            .authenticator
            .verify_password(password, &user.credentials)
        {
            return Err(UserError::InvalidCredentials);
        }

        Ok(user)
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<(), UserError> {
        let username = self.username_policy.validate(&command.name)?;

        // Pre-check only; `create` is the uniqueness authority
        if self.repository.count_by_name(username.as_str()).await? > 0 {
            return Err(UserError::NameUnavailable(username.into_inner()));
        }

        let user = User {
            credentials: self.authenticator.new_credentials(&command.password),
            name: username.into_inner(),
        };
        self.repository.create(user).await?;

        tracing::info!(username = %command.name, "User registered");

        Ok(())
    }

    async fn issue_token(&self, command: IssueTokenCommand) -> Result<IssuedToken, UserError> {
        let user = self
            .repository
            .find_by_name(&command.name)
            .await?
            .ok_or_else(|| UserError::NotFound(command.name.clone()))?;

        let token = self
            .authenticator
            .authenticate(&command.password, &user.credentials, &user.name)
            .await
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => UserError::InvalidCredentials,
                AuthenticationError::JwtError(err) => UserError::Signing(err),
            })?;

        let expires_at = Duration::try_seconds(self.token_lifetime)
            .and_then(|lifetime| Utc::now().checked_add_signed(lifetime))
            .ok_or_else(|| {
                UserError::Unknown(format!(
                    "Token lifetime out of range: {}s",
                    self.token_lifetime
                ))
            })?;

        tracing::info!(username = %user.name, %expires_at, "Token issued");

        Ok(IssuedToken {
            token,
            expires_at,
            max_age: self.token_lifetime,
        })
    }

    async fn change_password(&self, command: ChangePasswordCommand) -> Result<(), UserError> {
        let user = self
            .find_verified_user(&command.name, &command.password)
            .await?;

        let credentials = self.authenticator.new_credentials(&command.new_password);
        self.repository
            .update_credentials(&user.name, credentials)
            .await?;

        tracing::info!(username = %user.name, "Password changed");

        Ok(())
    }

    fn public_key(&self) -> &str {
        self.authenticator.public_key()
    }
}
