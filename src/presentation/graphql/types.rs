//! Response envelopes and relation resolvers.
//!
//! Every mutation resolves to a `{code, success, message, payload}` envelope
//! instead of a GraphQL error, so transport-level errors stay reserved for
//! malformed requests. Relations (author, comments, likes) are resolved
//! lazily here, which is the GraphQL counterpart of the eager includes the
//! queries describe.

use async_graphql::{ComplexObject, Context, Result, SimpleObject};

use crate::domain::{
    article::Article,
    errors::DomainError,
    social::{Comment, Like},
    user::User,
};

use super::context::GraphQLContext;

/// Map a domain error to an envelope `(code, message)` pair. Infrastructure
/// failures are logged and rendered as a generic 500; nothing propagates to
/// the transport layer.
pub(crate) fn envelope_error(err: &DomainError) -> (i32, String) {
    match err {
        DomainError::NotFound(what) => (404, format!("The {what} does not exist")),
        DomainError::Conflict(_) | DomainError::Validation(_) => (400, err.to_string()),
        DomainError::Infrastructure(_) => {
            tracing::error!(error = %err, "resolver hit an infrastructure error");
            (500, "Internal server error".to_string())
        }
    }
}

macro_rules! mutation_response {
    ($name:ident, $field:ident, $payload:ty) => {
        #[derive(Debug, SimpleObject)]
        pub struct $name {
            pub code: i32,
            pub success: bool,
            pub message: String,
            pub $field: Option<$payload>,
        }

        impl $name {
            pub fn ok(message: impl Into<String>, $field: $payload) -> Self {
                Self {
                    code: 200,
                    success: true,
                    message: message.into(),
                    $field: Some($field),
                }
            }

            pub fn fail(code: i32, message: impl Into<String>) -> Self {
                Self {
                    code,
                    success: false,
                    message: message.into(),
                    $field: None,
                }
            }

            pub fn from_error(err: DomainError) -> Self {
                let (code, message) = envelope_error(&err);
                Self::fail(code, message)
            }
        }
    };
}

mutation_response!(ArticleResponse, article, Article);
mutation_response!(CommentResponse, comment, Comment);
mutation_response!(UserResponse, user, User);
mutation_response!(LikeResponse, like, Like);
mutation_response!(SignInResponse, token, String);
mutation_response!(SignUpResponse, token, String);

#[ComplexObject]
impl Article {
    async fn author(&self, ctx: &Context<'_>) -> Result<User> {
        let gql = ctx.data::<GraphQLContext>()?;
        let author = gql.users.find_by_id(self.author_id).await?;
        author.ok_or_else(|| "article author no longer exists".into())
    }

    async fn comments(&self, ctx: &Context<'_>) -> Result<Vec<Comment>> {
        let gql = ctx.data::<GraphQLContext>()?;
        Ok(gql.social.comments_by_article(self.id).await?)
    }

    async fn likes(&self, ctx: &Context<'_>) -> Result<Vec<Like>> {
        let gql = ctx.data::<GraphQLContext>()?;
        Ok(gql.social.likes_by_article(self.id).await?)
    }
}

#[ComplexObject]
impl Comment {
    async fn author(&self, ctx: &Context<'_>) -> Result<User> {
        let gql = ctx.data::<GraphQLContext>()?;
        let author = gql.users.find_by_id(self.author_id).await?;
        author.ok_or_else(|| "comment author no longer exists".into())
    }

    async fn article(&self, ctx: &Context<'_>) -> Result<Article> {
        let gql = ctx.data::<GraphQLContext>()?;
        let article = gql.articles.find_by_id(self.article_id).await?;
        article.ok_or_else(|| "commented article no longer exists".into())
    }
}

#[ComplexObject]
impl Like {
    async fn user(&self, ctx: &Context<'_>) -> Result<User> {
        let gql = ctx.data::<GraphQLContext>()?;
        let user = gql.users.find_by_id(self.user_id).await?;
        user.ok_or_else(|| "liking user no longer exists".into())
    }

    async fn article(&self, ctx: &Context<'_>) -> Result<Article> {
        let gql = ctx.data::<GraphQLContext>()?;
        let article = gql.articles.find_by_id(self.article_id).await?;
        article.ok_or_else(|| "liked article no longer exists".into())
    }
}

#[ComplexObject]
impl User {
    async fn articles(&self, ctx: &Context<'_>) -> Result<Vec<Article>> {
        let gql = ctx.data::<GraphQLContext>()?;
        Ok(gql.articles.list_by_author(self.id).await?)
    }

    async fn comments(&self, ctx: &Context<'_>) -> Result<Vec<Comment>> {
        let gql = ctx.data::<GraphQLContext>()?;
        Ok(gql.social.comments_by_author(self.id).await?)
    }
}
