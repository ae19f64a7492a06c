//! GraphQL API client.
//!
//! One plain async method per server operation, wrapping the mutation/query
//! documents the UI layer issues. Session state is an explicit [`Session`]
//! value held by the client rather than ambient global state: sign-in and
//! sign-up store it, [`ApiClient::log_out`] clears it, and callers can
//! extract it to persist across runs. A `success:false` envelope is
//! converted into [`ClientError::Server`] carrying the server's message.

use serde::Deserialize;
use serde_json::{Value, json};
use thiserror::Error;

/// An authenticated session: the bearer token and the email it was issued
/// for. Tokens expire server-side after one day.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub email: String,
}

#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with a failure envelope.
    #[error("{message}")]
    Server { code: i32, message: String },
    /// The GraphQL layer rejected the request outright.
    #[error("GraphQL error: {0}")]
    GraphQL(String),
    #[error("unexpected response shape: {0}")]
    Decode(String),
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserView {
    pub id: i32,
    pub email: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentView {
    pub id: i32,
    pub content: String,
    pub author: UserView,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LikeView {
    pub id: i32,
    pub user: UserView,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArticleView {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub author: UserView,
    #[serde(default)]
    pub comments: Vec<CommentView>,
    #[serde(default)]
    pub likes: Vec<LikeView>,
}

const ARTICLE_SELECTION: &str = "id title content author { id email name } \
     comments { id content author { id email name } } \
     likes { id user { id email name } }";

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Option<Session>,
}

impl ApiClient {
    /// `base_url` is the server root, e.g. `http://localhost:4000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            session: None,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Resume a previously saved session.
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    pub fn log_out(&mut self) {
        self.session = None;
    }

    async fn execute(&self, query: &str, variables: Value) -> Result<Value, ClientError> {
        let mut req = self
            .http
            .post(format!("{}/graphql", self.base_url))
            .json(&json!({ "query": query, "variables": variables }));
        if let Some(session) = &self.session {
            req = req.bearer_auth(&session.token);
        }
        let body: Value = req.send().await?.json().await?;
        if let Some(message) = body
            .get("errors")
            .and_then(|e| e.as_array())
            .and_then(|errs| errs.first())
            .and_then(|err| err.get("message"))
            .and_then(|m| m.as_str())
        {
            return Err(ClientError::GraphQL(message.to_string()));
        }
        body.get("data")
            .cloned()
            .ok_or_else(|| ClientError::Decode("missing data".to_string()))
    }

    /// Pull the named envelope out of `data`, turning `success:false` into
    /// a [`ClientError::Server`].
    fn unwrap_envelope(data: Value, field: &str) -> Result<Value, ClientError> {
        let envelope = data
            .get(field)
            .cloned()
            .ok_or_else(|| ClientError::Decode(format!("missing {field} envelope")))?;
        if envelope["success"].as_bool().unwrap_or(false) {
            Ok(envelope)
        } else {
            Err(ClientError::Server {
                code: envelope["code"].as_i64().unwrap_or(500) as i32,
                message: envelope["message"]
                    .as_str()
                    .unwrap_or("unknown server error")
                    .to_string(),
            })
        }
    }

    fn decode<T: serde::de::DeserializeOwned>(value: Value) -> Result<T, ClientError> {
        serde_json::from_value(value).map_err(|e| ClientError::Decode(e.to_string()))
    }

    // === Auth ===

    pub async fn sign_up(
        &mut self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<(), ClientError> {
        let data = self
            .execute(
                "mutation SignUp($email: String!, $password: String!, $name: String!) { \
                   signUp(email: $email, password: $password, name: $name) { \
                     code success message token } }",
                json!({ "email": email, "password": password, "name": name }),
            )
            .await?;
        let envelope = Self::unwrap_envelope(data, "signUp")?;
        self.store_session(envelope, email)
    }

    pub async fn sign_in(&mut self, email: &str, password: &str) -> Result<(), ClientError> {
        let data = self
            .execute(
                "mutation SignIn($email: String!, $password: String!) { \
                   signIn(email: $email, password: $password) { \
                     code success message token } }",
                json!({ "email": email, "password": password }),
            )
            .await?;
        let envelope = Self::unwrap_envelope(data, "signIn")?;
        self.store_session(envelope, email)
    }

    fn store_session(&mut self, envelope: Value, email: &str) -> Result<(), ClientError> {
        let token = envelope["token"]
            .as_str()
            .ok_or_else(|| ClientError::Decode("missing token".to_string()))?;
        self.session = Some(Session {
            token: token.to_string(),
            email: email.to_string(),
        });
        Ok(())
    }

    pub async fn me(&self) -> Result<Option<UserView>, ClientError> {
        let data = self
            .execute("query Me { me { id email name } }", json!({}))
            .await?;
        match data.get("me") {
            Some(Value::Null) | None => Ok(None),
            Some(user) => Ok(Some(Self::decode(user.clone())?)),
        }
    }

    // === Articles ===

    pub async fn articles(&self) -> Result<Vec<ArticleView>, ClientError> {
        let data = self
            .execute(
                &format!("query Articles {{ articles {{ {ARTICLE_SELECTION} }} }}"),
                json!({}),
            )
            .await?;
        Self::decode(data["articles"].clone())
    }

    pub async fn article(&self, id: i32) -> Result<Option<ArticleView>, ClientError> {
        let data = self
            .execute(
                &format!(
                    "query Article($id: Int!) {{ article(id: $id) {{ {ARTICLE_SELECTION} }} }}"
                ),
                json!({ "id": id }),
            )
            .await?;
        match data.get("article") {
            Some(Value::Null) | None => Ok(None),
            Some(article) => Ok(Some(Self::decode(article.clone())?)),
        }
    }

    pub async fn create_article(&self, title: &str, content: &str) -> Result<i32, ClientError> {
        let data = self
            .execute(
                "mutation CreateArticle($title: String!, $content: String!) { \
                   createArticle(title: $title, content: $content) { \
                     code success message article { id } } }",
                json!({ "title": title, "content": content }),
            )
            .await?;
        let envelope = Self::unwrap_envelope(data, "createArticle")?;
        envelope["article"]["id"]
            .as_i64()
            .map(|id| id as i32)
            .ok_or_else(|| ClientError::Decode("missing article id".to_string()))
    }

    pub async fn update_article(
        &self,
        id: i32,
        title: Option<&str>,
        content: Option<&str>,
    ) -> Result<(), ClientError> {
        let data = self
            .execute(
                "mutation UpdateArticle($id: Int!, $title: String, $content: String) { \
                   updateArticle(id: $id, title: $title, content: $content) { \
                     code success message article { id } } }",
                json!({ "id": id, "title": title, "content": content }),
            )
            .await?;
        Self::unwrap_envelope(data, "updateArticle").map(|_| ())
    }

    pub async fn delete_article(&self, id: i32) -> Result<(), ClientError> {
        let data = self
            .execute(
                "mutation DeleteArticle($id: Int!) { \
                   deleteArticle(id: $id) { code success message } }",
                json!({ "id": id }),
            )
            .await?;
        Self::unwrap_envelope(data, "deleteArticle").map(|_| ())
    }

    // === Comments ===

    pub async fn comments_by_article(
        &self,
        article_id: i32,
    ) -> Result<Vec<CommentView>, ClientError> {
        let data = self
            .execute(
                "query CommentsByArticle($articleId: Int!) { \
                   commentsByArticle(articleId: $articleId) { \
                     id content author { id email name } } }",
                json!({ "articleId": article_id }),
            )
            .await?;
        Self::decode(data["commentsByArticle"].clone())
    }

    pub async fn create_comment(&self, article_id: i32, content: &str) -> Result<i32, ClientError> {
        let data = self
            .execute(
                "mutation CreateComment($articleId: Int!, $content: String!) { \
                   createComment(articleId: $articleId, content: $content) { \
                     code success message comment { id } } }",
                json!({ "articleId": article_id, "content": content }),
            )
            .await?;
        let envelope = Self::unwrap_envelope(data, "createComment")?;
        envelope["comment"]["id"]
            .as_i64()
            .map(|id| id as i32)
            .ok_or_else(|| ClientError::Decode("missing comment id".to_string()))
    }

    pub async fn update_comment(&self, id: i32, content: &str) -> Result<(), ClientError> {
        let data = self
            .execute(
                "mutation UpdateComment($id: Int!, $content: String!) { \
                   updateComment(id: $id, content: $content) { code success message } }",
                json!({ "id": id, "content": content }),
            )
            .await?;
        Self::unwrap_envelope(data, "updateComment").map(|_| ())
    }

    pub async fn delete_comment(&self, id: i32) -> Result<(), ClientError> {
        let data = self
            .execute(
                "mutation DeleteComment($id: Int!) { \
                   deleteComment(id: $id) { code success message } }",
                json!({ "id": id }),
            )
            .await?;
        Self::unwrap_envelope(data, "deleteComment").map(|_| ())
    }

    // === Likes ===

    pub async fn like_article(&self, article_id: i32) -> Result<(), ClientError> {
        let data = self
            .execute(
                "mutation LikeArticle($articleId: Int!) { \
                   likeArticle(articleId: $articleId) { code success message like { id } } }",
                json!({ "articleId": article_id }),
            )
            .await?;
        Self::unwrap_envelope(data, "likeArticle").map(|_| ())
    }

    pub async fn unlike_article(&self, article_id: i32) -> Result<(), ClientError> {
        let data = self
            .execute(
                "mutation UnlikeArticle($articleId: Int!) { \
                   unlikeArticle(articleId: $articleId) { code success message } }",
                json!({ "articleId": article_id }),
            )
            .await?;
        Self::unwrap_envelope(data, "unlikeArticle").map(|_| ())
    }
}
