use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::{
    errors::DomainError,
    social::{Comment, Like, SocialRepository},
};

const COMMENT_COLUMNS: &str = "id, content, author_id, article_id, created_at";
const LIKE_COLUMNS: &str = "id, user_id, article_id";

pub struct SqlxSocialRepository {
    pool: PgPool,
}

impl SqlxSocialRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SocialRepository for SqlxSocialRepository {
    async fn find_comment(&self, id: i32) -> Result<Option<Comment>, DomainError> {
        let comment = sqlx::query_as::<_, Comment>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(comment)
    }

    async fn list_comments(&self) -> Result<Vec<Comment>, DomainError> {
        let comments = sqlx::query_as::<_, Comment>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(comments)
    }

    async fn comments_by_article(&self, article_id: i32) -> Result<Vec<Comment>, DomainError> {
        let comments = sqlx::query_as::<_, Comment>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE article_id = $1 ORDER BY created_at"
        ))
        .bind(article_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(comments)
    }

    async fn comments_by_author(&self, author_id: i32) -> Result<Vec<Comment>, DomainError> {
        let comments = sqlx::query_as::<_, Comment>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE author_id = $1 ORDER BY created_at"
        ))
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(comments)
    }

    async fn create_comment(
        &self,
        author_id: i32,
        article_id: i32,
        content: &str,
    ) -> Result<Comment, DomainError> {
        let comment = sqlx::query_as::<_, Comment>(&format!(
            "INSERT INTO comments (content, author_id, article_id) VALUES ($1, $2, $3) \
             RETURNING {COMMENT_COLUMNS}"
        ))
        .bind(content)
        .bind(author_id)
        .bind(article_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(comment)
    }

    async fn update_comment(&self, id: i32, content: &str) -> Result<Comment, DomainError> {
        let comment = sqlx::query_as::<_, Comment>(&format!(
            "UPDATE comments SET content = $2 WHERE id = $1 RETURNING {COMMENT_COLUMNS}"
        ))
        .bind(id)
        .bind(content)
        .fetch_optional(&self.pool)
        .await?;
        comment.ok_or_else(|| DomainError::NotFound("comment".to_string()))
    }

    async fn delete_comment(&self, id: i32) -> Result<Comment, DomainError> {
        let comment = sqlx::query_as::<_, Comment>(&format!(
            "DELETE FROM comments WHERE id = $1 RETURNING {COMMENT_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        comment.ok_or_else(|| DomainError::NotFound("comment".to_string()))
    }

    async fn find_like(
        &self,
        user_id: i32,
        article_id: i32,
    ) -> Result<Option<Like>, DomainError> {
        let like = sqlx::query_as::<_, Like>(&format!(
            "SELECT {LIKE_COLUMNS} FROM likes WHERE user_id = $1 AND article_id = $2"
        ))
        .bind(user_id)
        .bind(article_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(like)
    }

    async fn likes_by_article(&self, article_id: i32) -> Result<Vec<Like>, DomainError> {
        let likes = sqlx::query_as::<_, Like>(&format!(
            "SELECT {LIKE_COLUMNS} FROM likes WHERE article_id = $1 ORDER BY id"
        ))
        .bind(article_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(likes)
    }

    async fn create_like(&self, user_id: i32, article_id: i32) -> Result<Like, DomainError> {
        // The unique (user_id, article_id) constraint surfaces as Conflict
        // if two requests race past the resolver's existence check.
        let like = sqlx::query_as::<_, Like>(&format!(
            "INSERT INTO likes (user_id, article_id) VALUES ($1, $2) RETURNING {LIKE_COLUMNS}"
        ))
        .bind(user_id)
        .bind(article_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(like)
    }

    async fn delete_like(&self, id: i32) -> Result<Like, DomainError> {
        let like = sqlx::query_as::<_, Like>(&format!(
            "DELETE FROM likes WHERE id = $1 RETURNING {LIKE_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        like.ok_or_else(|| DomainError::NotFound("like".to_string()))
    }
}
