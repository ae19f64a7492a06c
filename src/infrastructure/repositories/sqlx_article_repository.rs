use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::{
    article::{Article, ArticleRepository},
    errors::DomainError,
};

const COLUMNS: &str = "id, title, content, author_id, created_at";

pub struct SqlxArticleRepository {
    pool: PgPool,
}

impl SqlxArticleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ArticleRepository for SqlxArticleRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Article>, DomainError> {
        let article = sqlx::query_as::<_, Article>(&format!(
            "SELECT {COLUMNS} FROM articles WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(article)
    }

    async fn list(&self) -> Result<Vec<Article>, DomainError> {
        let articles = sqlx::query_as::<_, Article>(&format!(
            "SELECT {COLUMNS} FROM articles ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(articles)
    }

    async fn list_by_author(&self, author_id: i32) -> Result<Vec<Article>, DomainError> {
        let articles = sqlx::query_as::<_, Article>(&format!(
            "SELECT {COLUMNS} FROM articles WHERE author_id = $1 ORDER BY created_at DESC"
        ))
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(articles)
    }

    async fn create(
        &self,
        author_id: i32,
        title: &str,
        content: &str,
    ) -> Result<Article, DomainError> {
        let article = sqlx::query_as::<_, Article>(&format!(
            "INSERT INTO articles (title, content, author_id) VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        ))
        .bind(title)
        .bind(content)
        .bind(author_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(article)
    }

    async fn update(
        &self,
        id: i32,
        title: Option<&str>,
        content: Option<&str>,
    ) -> Result<Article, DomainError> {
        let article = sqlx::query_as::<_, Article>(&format!(
            "UPDATE articles SET title = COALESCE($2, title), content = COALESCE($3, content) \
             WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(title)
        .bind(content)
        .fetch_optional(&self.pool)
        .await?;
        article.ok_or_else(|| DomainError::NotFound("article".to_string()))
    }

    async fn delete(&self, id: i32) -> Result<Article, DomainError> {
        let article = sqlx::query_as::<_, Article>(&format!(
            "DELETE FROM articles WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        article.ok_or_else(|| DomainError::NotFound("article".to_string()))
    }
}
