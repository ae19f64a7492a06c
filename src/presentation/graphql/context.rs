use std::sync::Arc;

use async_graphql::Context;
use axum::http::HeaderMap;

use crate::auth::{self, CurrentUser};
use crate::domain::{
    article::ArticleRepository, social::SocialRepository, user::UserRepository,
};

/// Shared resolver dependencies, injected once as schema data.
pub struct GraphQLContext {
    pub users: Arc<dyn UserRepository>,
    pub articles: Arc<dyn ArticleRepository>,
    pub social: Arc<dyn SocialRepository>,
    pub jwt_secret: String,
}

/// Per-request session state. `user` is `None` for anonymous callers,
/// including requests whose token failed verification.
#[derive(Debug, Clone, Default)]
pub struct Session {
    user: Option<CurrentUser>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self { user: None }
    }

    pub fn authenticated(user: CurrentUser) -> Self {
        Self { user: Some(user) }
    }

    pub fn from_headers(headers: &HeaderMap, jwt_secret: &str) -> Self {
        Self {
            user: auth::user_from_headers(headers, jwt_secret),
        }
    }

    pub fn user(&self) -> Option<&CurrentUser> {
        self.user.as_ref()
    }
}

/// The caller attached to the current GraphQL request, if any.
pub fn current_user<'ctx>(ctx: &Context<'ctx>) -> Option<&'ctx CurrentUser> {
    ctx.data_opt::<Session>()?.user()
}
