use async_trait::async_trait;
use auth::Credentials;
use auth::PasswordDigest;
use auth::Salt;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::user::models::User;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: User) -> Result<(), UserError> {
        sqlx::query(
            r#"
            INSERT INTO users (name, salt, hash)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(&user.name)
        .bind(user.credentials.salt.as_bytes().as_slice())
        .bind(user.credentials.hash.as_bytes().as_slice())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return UserError::NameUnavailable(user.name.clone());
                }
            }
            UserError::DatabaseError(e.to_string())
        })?;

        Ok(())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<User>, UserError> {
        let row = sqlx::query(
            r#"
            SELECT name, salt, hash
            FROM users
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        match row {
            Some(r) => {
                let salt: Vec<u8> = r
                    .try_get("salt")
                    .map_err(|e| UserError::DatabaseError(e.to_string()))?;
                let hash: Vec<u8> = r
                    .try_get("hash")
                    .map_err(|e| UserError::DatabaseError(e.to_string()))?;

                Ok(Some(User {
                    name: r
                        .try_get("name")
                        .map_err(|e| UserError::DatabaseError(e.to_string()))?,
                    credentials: Credentials {
                        salt: Salt::try_from(salt.as_slice())?,
                        hash: PasswordDigest::try_from(hash.as_slice())?,
                    },
                }))
            }
            None => Ok(None),
        }
    }

    async fn count_by_name(&self, name: &str) -> Result<u64, UserError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM users
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(count.max(0) as u64)
    }

    async fn update_credentials(
        &self,
        name: &str,
        credentials: Credentials,
    ) -> Result<(), UserError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET salt = $2, hash = $3, updated_at = NOW()
            WHERE name = $1
            "#,
        )
        .bind(name)
        .bind(credentials.salt.as_bytes().as_slice())
        .bind(credentials.hash.as_bytes().as_slice())
        .execute(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(name.to_string()));
        }

        Ok(())
    }
}
