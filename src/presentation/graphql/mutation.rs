//! Mutation resolvers.
//!
//! Shared contract: every mutation except signIn/signUp requires an
//! authenticated session (401 otherwise); mutations on owned resources
//! re-fetch the resource and compare the author against the caller (404 if
//! missing, 403 if someone else's); every failure is an envelope, never a
//! GraphQL error.

use async_graphql::{Context, Object, Result};

use crate::auth;

use super::context::{self, GraphQLContext};
use super::types::{
    ArticleResponse, CommentResponse, LikeResponse, SignInResponse, SignUpResponse, UserResponse,
};

pub struct MutationRoot;

/// An empty string on a partial update means "leave unchanged".
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[Object]
impl MutationRoot {
    async fn sign_up(
        &self,
        ctx: &Context<'_>,
        email: String,
        password: String,
        name: String,
    ) -> Result<SignUpResponse> {
        let gql = ctx.data::<GraphQLContext>()?;
        match gql.users.find_by_email(&email).await {
            Ok(Some(_)) => return Ok(SignUpResponse::fail(400, "User already exists")),
            Ok(None) => {}
            Err(err) => return Ok(SignUpResponse::from_error(err)),
        }
        let password_hash = match auth::hash_password(&password) {
            Ok(hash) => hash,
            Err(err) => {
                tracing::error!(error = %err, "password hashing failed");
                return Ok(SignUpResponse::fail(500, "Internal server error"));
            }
        };
        // The unique email constraint is the backstop if a concurrent
        // signUp won the race since the lookup above.
        let user = match gql.users.create(&email, &password_hash, &name).await {
            Ok(user) => user,
            Err(err) => return Ok(SignUpResponse::from_error(err)),
        };
        match auth::issue_token(&user, &gql.jwt_secret) {
            Ok(token) => Ok(SignUpResponse::ok("User successfully registered", token)),
            Err(err) => {
                tracing::error!(error = %err, "token generation failed");
                Ok(SignUpResponse::fail(500, "Internal server error"))
            }
        }
    }

    async fn sign_in(
        &self,
        ctx: &Context<'_>,
        email: String,
        password: String,
    ) -> Result<SignInResponse> {
        let gql = ctx.data::<GraphQLContext>()?;
        let user = match gql.users.find_by_email(&email).await {
            Ok(Some(user)) => user,
            Ok(None) => return Ok(SignInResponse::fail(404, "User not found")),
            Err(err) => return Ok(SignInResponse::from_error(err)),
        };
        match auth::verify_password(&password, &user.password_hash) {
            Ok(true) => {}
            Ok(false) => return Ok(SignInResponse::fail(401, "Invalid password")),
            Err(err) => {
                tracing::error!(error = %err, "password verification failed");
                return Ok(SignInResponse::fail(500, "Internal server error"));
            }
        }
        match auth::issue_token(&user, &gql.jwt_secret) {
            Ok(token) => Ok(SignInResponse::ok("Signed in successfully", token)),
            Err(err) => {
                tracing::error!(error = %err, "token generation failed");
                Ok(SignInResponse::fail(500, "Internal server error"))
            }
        }
    }

    async fn update_user(
        &self,
        ctx: &Context<'_>,
        email: Option<String>,
        name: Option<String>,
    ) -> Result<UserResponse> {
        let gql = ctx.data::<GraphQLContext>()?;
        let Some(current) = context::current_user(ctx) else {
            return Ok(UserResponse::fail(401, "Not authenticated"));
        };
        let email = non_empty(email);
        let name = non_empty(name);
        match gql
            .users
            .update(current.id, email.as_deref(), name.as_deref())
            .await
        {
            Ok(user) => Ok(UserResponse::ok("User updated successfully", user)),
            Err(err) => Ok(UserResponse::from_error(err)),
        }
    }

    /// Deletes the calling account; dependent articles, comments and likes
    /// go with it via the FK cascade.
    async fn delete_user(&self, ctx: &Context<'_>) -> Result<UserResponse> {
        let gql = ctx.data::<GraphQLContext>()?;
        let Some(current) = context::current_user(ctx) else {
            return Ok(UserResponse::fail(401, "Not authenticated"));
        };
        match gql.users.delete(current.id).await {
            Ok(user) => Ok(UserResponse::ok("User deleted successfully", user)),
            Err(err) => Ok(UserResponse::from_error(err)),
        }
    }

    async fn create_article(
        &self,
        ctx: &Context<'_>,
        title: String,
        content: String,
    ) -> Result<ArticleResponse> {
        let gql = ctx.data::<GraphQLContext>()?;
        let Some(current) = context::current_user(ctx) else {
            return Ok(ArticleResponse::fail(401, "Not authenticated"));
        };
        match gql.articles.create(current.id, &title, &content).await {
            Ok(article) => Ok(ArticleResponse::ok("Article created successfully", article)),
            Err(err) => Ok(ArticleResponse::from_error(err)),
        }
    }

    async fn update_article(
        &self,
        ctx: &Context<'_>,
        id: i32,
        title: Option<String>,
        content: Option<String>,
    ) -> Result<ArticleResponse> {
        let gql = ctx.data::<GraphQLContext>()?;
        let Some(current) = context::current_user(ctx) else {
            return Ok(ArticleResponse::fail(401, "Not authenticated"));
        };
        let existing = match gql.articles.find_by_id(id).await {
            Ok(Some(article)) => article,
            Ok(None) => return Ok(ArticleResponse::fail(404, "The article does not exist")),
            Err(err) => return Ok(ArticleResponse::from_error(err)),
        };
        if !current.owns(existing.author_id) {
            return Ok(ArticleResponse::fail(
                403,
                "You are not allowed to modify this article",
            ));
        }
        let title = non_empty(title);
        let content = non_empty(content);
        match gql
            .articles
            .update(id, title.as_deref(), content.as_deref())
            .await
        {
            Ok(article) => Ok(ArticleResponse::ok("Article updated successfully", article)),
            Err(err) => Ok(ArticleResponse::from_error(err)),
        }
    }

    async fn delete_article(&self, ctx: &Context<'_>, id: i32) -> Result<ArticleResponse> {
        let gql = ctx.data::<GraphQLContext>()?;
        let Some(current) = context::current_user(ctx) else {
            return Ok(ArticleResponse::fail(401, "Not authenticated"));
        };
        let existing = match gql.articles.find_by_id(id).await {
            Ok(Some(article)) => article,
            Ok(None) => return Ok(ArticleResponse::fail(404, "The article does not exist")),
            Err(err) => return Ok(ArticleResponse::from_error(err)),
        };
        if !current.owns(existing.author_id) {
            return Ok(ArticleResponse::fail(
                403,
                "You are not allowed to delete this article",
            ));
        }
        match gql.articles.delete(id).await {
            Ok(article) => Ok(ArticleResponse::ok("Article deleted successfully", article)),
            Err(err) => Ok(ArticleResponse::from_error(err)),
        }
    }

    async fn create_comment(
        &self,
        ctx: &Context<'_>,
        article_id: i32,
        content: String,
    ) -> Result<CommentResponse> {
        let gql = ctx.data::<GraphQLContext>()?;
        let Some(current) = context::current_user(ctx) else {
            return Ok(CommentResponse::fail(401, "Not authenticated"));
        };
        match gql.articles.find_by_id(article_id).await {
            Ok(Some(_)) => {}
            Ok(None) => return Ok(CommentResponse::fail(404, "The article does not exist")),
            Err(err) => return Ok(CommentResponse::from_error(err)),
        }
        match gql
            .social
            .create_comment(current.id, article_id, &content)
            .await
        {
            Ok(comment) => Ok(CommentResponse::ok("Comment created successfully", comment)),
            Err(err) => Ok(CommentResponse::from_error(err)),
        }
    }

    async fn update_comment(
        &self,
        ctx: &Context<'_>,
        id: i32,
        content: String,
    ) -> Result<CommentResponse> {
        let gql = ctx.data::<GraphQLContext>()?;
        let Some(current) = context::current_user(ctx) else {
            return Ok(CommentResponse::fail(401, "Not authenticated"));
        };
        let existing = match gql.social.find_comment(id).await {
            Ok(Some(comment)) => comment,
            Ok(None) => return Ok(CommentResponse::fail(404, "The comment does not exist")),
            Err(err) => return Ok(CommentResponse::from_error(err)),
        };
        if !current.owns(existing.author_id) {
            return Ok(CommentResponse::fail(
                403,
                "You are not allowed to modify this comment",
            ));
        }
        match gql.social.update_comment(id, &content).await {
            Ok(comment) => Ok(CommentResponse::ok("Comment updated successfully", comment)),
            Err(err) => Ok(CommentResponse::from_error(err)),
        }
    }

    async fn delete_comment(&self, ctx: &Context<'_>, id: i32) -> Result<CommentResponse> {
        let gql = ctx.data::<GraphQLContext>()?;
        let Some(current) = context::current_user(ctx) else {
            return Ok(CommentResponse::fail(401, "Not authenticated"));
        };
        let existing = match gql.social.find_comment(id).await {
            Ok(Some(comment)) => comment,
            Ok(None) => return Ok(CommentResponse::fail(404, "The comment does not exist")),
            Err(err) => return Ok(CommentResponse::from_error(err)),
        };
        if !current.owns(existing.author_id) {
            return Ok(CommentResponse::fail(
                403,
                "You are not allowed to delete this comment",
            ));
        }
        match gql.social.delete_comment(id).await {
            Ok(comment) => Ok(CommentResponse::ok("Comment deleted successfully", comment)),
            Err(err) => Ok(CommentResponse::from_error(err)),
        }
    }

    async fn like_article(&self, ctx: &Context<'_>, article_id: i32) -> Result<LikeResponse> {
        let gql = ctx.data::<GraphQLContext>()?;
        let Some(current) = context::current_user(ctx) else {
            return Ok(LikeResponse::fail(401, "Not authenticated"));
        };
        match gql.articles.find_by_id(article_id).await {
            Ok(Some(_)) => {}
            Ok(None) => return Ok(LikeResponse::fail(404, "The article does not exist")),
            Err(err) => return Ok(LikeResponse::from_error(err)),
        }
        match gql.social.find_like(current.id, article_id).await {
            Ok(Some(_)) => return Ok(LikeResponse::fail(400, "Article already liked")),
            Ok(None) => {}
            Err(err) => return Ok(LikeResponse::from_error(err)),
        }
        // A concurrent duplicate slips past the check above and lands on the
        // unique constraint, which comes back as a 400 Conflict envelope.
        match gql.social.create_like(current.id, article_id).await {
            Ok(like) => Ok(LikeResponse::ok("Article liked successfully", like)),
            Err(err) => Ok(LikeResponse::from_error(err)),
        }
    }

    async fn unlike_article(&self, ctx: &Context<'_>, article_id: i32) -> Result<LikeResponse> {
        let gql = ctx.data::<GraphQLContext>()?;
        let Some(current) = context::current_user(ctx) else {
            return Ok(LikeResponse::fail(401, "Not authenticated"));
        };
        let existing = match gql.social.find_like(current.id, article_id).await {
            Ok(Some(like)) => like,
            Ok(None) => return Ok(LikeResponse::fail(404, "You have not liked this article")),
            Err(err) => return Ok(LikeResponse::from_error(err)),
        };
        match gql.social.delete_like(existing.id).await {
            Ok(like) => Ok(LikeResponse::ok("Like removed successfully", like)),
            Err(err) => Ok(LikeResponse::from_error(err)),
        }
    }
}
