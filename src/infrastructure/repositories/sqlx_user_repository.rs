use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::{
    errors::DomainError,
    user::{User, UserRepository},
};

pub struct SqlxUserRepository {
    pool: PgPool,
}

impl SqlxUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, DomainError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, name FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, name FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, name FROM users ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    async fn create(
        &self,
        email: &str,
        password_hash: &str,
        name: &str,
    ) -> Result<User, DomainError> {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (email, password_hash, name) VALUES ($1, $2, $3) \
             RETURNING id, email, password_hash, name",
        )
        .bind(email)
        .bind(password_hash)
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    async fn update(
        &self,
        id: i32,
        email: Option<&str>,
        name: Option<&str>,
    ) -> Result<User, DomainError> {
        let user = sqlx::query_as::<_, User>(
            "UPDATE users SET email = COALESCE($2, email), name = COALESCE($3, name) \
             WHERE id = $1 RETURNING id, email, password_hash, name",
        )
        .bind(id)
        .bind(email)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        user.ok_or_else(|| DomainError::NotFound("user".to_string()))
    }

    async fn delete(&self, id: i32) -> Result<User, DomainError> {
        let user = sqlx::query_as::<_, User>(
            "DELETE FROM users WHERE id = $1 RETURNING id, email, password_hash, name",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        user.ok_or_else(|| DomainError::NotFound("user".to_string()))
    }
}
