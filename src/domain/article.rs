use async_graphql::SimpleObject;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::DomainError;

#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject, sqlx::FromRow)]
#[graphql(complex)]
pub struct Article {
    pub id: i32,
    pub title: String,
    pub content: String,
    #[graphql(skip)]
    pub author_id: i32,
    pub created_at: DateTime<Utc>,
}

#[async_trait]
pub trait ArticleRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Article>, DomainError>;
    async fn list(&self) -> Result<Vec<Article>, DomainError>;
    async fn list_by_author(&self, author_id: i32) -> Result<Vec<Article>, DomainError>;
    async fn create(
        &self,
        author_id: i32,
        title: &str,
        content: &str,
    ) -> Result<Article, DomainError>;
    async fn update(
        &self,
        id: i32,
        title: Option<&str>,
        content: Option<&str>,
    ) -> Result<Article, DomainError>;
    async fn delete(&self, id: i32) -> Result<Article, DomainError>;
}
