//! Comments and likes attached to articles.

use async_graphql::SimpleObject;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::DomainError;

#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject, sqlx::FromRow)]
#[graphql(complex)]
pub struct Comment {
    pub id: i32,
    pub content: String,
    #[graphql(skip)]
    pub author_id: i32,
    #[graphql(skip)]
    pub article_id: i32,
    pub created_at: DateTime<Utc>,
}

/// A like row; at most one per (user, article), enforced both by the
/// resolver pre-check and by the unique constraint in the schema.
#[derive(Debug, Clone, Serialize, Deserialize, SimpleObject, sqlx::FromRow)]
#[graphql(complex)]
pub struct Like {
    pub id: i32,
    #[graphql(skip)]
    pub user_id: i32,
    #[graphql(skip)]
    pub article_id: i32,
}

#[async_trait]
pub trait SocialRepository: Send + Sync {
    async fn find_comment(&self, id: i32) -> Result<Option<Comment>, DomainError>;
    async fn list_comments(&self) -> Result<Vec<Comment>, DomainError>;
    async fn comments_by_article(&self, article_id: i32) -> Result<Vec<Comment>, DomainError>;
    async fn comments_by_author(&self, author_id: i32) -> Result<Vec<Comment>, DomainError>;
    async fn create_comment(
        &self,
        author_id: i32,
        article_id: i32,
        content: &str,
    ) -> Result<Comment, DomainError>;
    async fn update_comment(&self, id: i32, content: &str) -> Result<Comment, DomainError>;
    async fn delete_comment(&self, id: i32) -> Result<Comment, DomainError>;

    async fn find_like(&self, user_id: i32, article_id: i32)
        -> Result<Option<Like>, DomainError>;
    async fn likes_by_article(&self, article_id: i32) -> Result<Vec<Like>, DomainError>;
    async fn create_like(&self, user_id: i32, article_id: i32) -> Result<Like, DomainError>;
    async fn delete_like(&self, id: i32) -> Result<Like, DomainError>;
}
