use async_graphql::{Context, Object, Result};

use crate::domain::{article::Article, social::Comment, user::User};

use super::context::{self, GraphQLContext};

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn hello(&self) -> &'static str {
        "Hello world!"
    }

    /// The account behind the bearer token; null for anonymous callers.
    async fn me(&self, ctx: &Context<'_>) -> Result<Option<User>> {
        let Some(current) = context::current_user(ctx) else {
            return Ok(None);
        };
        let gql = ctx.data::<GraphQLContext>()?;
        Ok(gql.users.find_by_id(current.id).await?)
    }

    /// Unlike `article`/`comment`, a missing user id is an error, not null.
    async fn user(&self, ctx: &Context<'_>, id: i32) -> Result<User> {
        let gql = ctx.data::<GraphQLContext>()?;
        gql.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| "User not found".into())
    }

    async fn users(&self, ctx: &Context<'_>) -> Result<Vec<User>> {
        let gql = ctx.data::<GraphQLContext>()?;
        Ok(gql.users.list().await?)
    }

    async fn article(&self, ctx: &Context<'_>, id: i32) -> Result<Option<Article>> {
        let gql = ctx.data::<GraphQLContext>()?;
        Ok(gql.articles.find_by_id(id).await?)
    }

    async fn articles(&self, ctx: &Context<'_>) -> Result<Vec<Article>> {
        let gql = ctx.data::<GraphQLContext>()?;
        Ok(gql.articles.list().await?)
    }

    async fn comment(&self, ctx: &Context<'_>, id: i32) -> Result<Option<Comment>> {
        let gql = ctx.data::<GraphQLContext>()?;
        Ok(gql.social.find_comment(id).await?)
    }

    async fn comments(&self, ctx: &Context<'_>) -> Result<Vec<Comment>> {
        let gql = ctx.data::<GraphQLContext>()?;
        Ok(gql.social.list_comments().await?)
    }

    async fn comments_by_article(
        &self,
        ctx: &Context<'_>,
        article_id: i32,
    ) -> Result<Vec<Comment>> {
        let gql = ctx.data::<GraphQLContext>()?;
        Ok(gql.social.comments_by_article(article_id).await?)
    }
}
