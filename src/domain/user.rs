use async_graphql::SimpleObject;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::errors::DomainError;

/// A registered account. The password hash never leaves the server: it is
/// skipped by both the GraphQL schema and JSON serialization.
#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject, sqlx::FromRow)]
#[graphql(complex)]
pub struct User {
    pub id: i32,
    pub email: String,
    #[serde(skip)]
    #[graphql(skip)]
    pub password_hash: String,
    pub name: String,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, DomainError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;
    async fn list(&self) -> Result<Vec<User>, DomainError>;
    async fn create(
        &self,
        email: &str,
        password_hash: &str,
        name: &str,
    ) -> Result<User, DomainError>;
    async fn update(
        &self,
        id: i32,
        email: Option<&str>,
        name: Option<&str>,
    ) -> Result<User, DomainError>;
    async fn delete(&self, id: i32) -> Result<User, DomainError>;
}
