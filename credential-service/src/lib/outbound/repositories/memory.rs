use std::collections::HashMap;

use async_trait::async_trait;
use auth::Credentials;
use tokio::sync::RwLock;

use crate::domain::user::models::User;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

/// Process-local user store.
///
/// Records are lost on restart. Uniqueness is checked under the write lock,
/// so concurrent registrations of one name admit exactly one.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, Credentials>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<(), UserError> {
        let mut users = self.users.write().await;

        if users.contains_key(&user.name) {
            return Err(UserError::NameUnavailable(user.name));
        }
        users.insert(user.name, user.credentials);

        Ok(())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<User>, UserError> {
        let users = self.users.read().await;

        Ok(users.get(name).map(|credentials| User {
            name: name.to_string(),
            credentials: *credentials,
        }))
    }

    async fn count_by_name(&self, name: &str) -> Result<u64, UserError> {
        let users = self.users.read().await;
        Ok(u64::from(users.contains_key(name)))
    }

    async fn update_credentials(
        &self,
        name: &str,
        credentials: Credentials,
    ) -> Result<(), UserError> {
        let mut users = self.users.write().await;

        match users.get_mut(name) {
            Some(stored) => {
                *stored = credentials;
                Ok(())
            }
            None => Err(UserError::NotFound(name.to_string())),
        }
    }
}
