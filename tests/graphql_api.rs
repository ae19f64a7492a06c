//! End-to-end resolver tests against the real schema, backed by in-memory
//! repositories so no database is needed.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;

use gazette::auth;
use gazette::domain::{
    article::{Article, ArticleRepository},
    errors::DomainError,
    social::{Comment, Like, SocialRepository},
    user::{User, UserRepository},
};
use gazette::presentation::graphql::{
    GazetteSchema, build_schema,
    context::{GraphQLContext, Session},
};

const JWT_SECRET: &str = "test-secret";

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    articles: Vec<Article>,
    comments: Vec<Comment>,
    likes: Vec<Like>,
    next_user_id: i32,
    next_article_id: i32,
    next_comment_id: i32,
    next_like_id: i32,
}

/// All three repository traits over one set of in-memory tables, with the
/// same uniqueness rules the real schema enforces.
#[derive(Default)]
struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    fn user_count(&self) -> usize {
        self.tables.lock().unwrap().users.len()
    }

    fn article_count(&self) -> usize {
        self.tables.lock().unwrap().articles.len()
    }

    fn comment_count(&self) -> usize {
        self.tables.lock().unwrap().comments.len()
    }

    fn like_count(&self) -> usize {
        self.tables.lock().unwrap().likes.len()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, DomainError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        Ok(self.tables.lock().unwrap().users.clone())
    }

    async fn create(
        &self,
        email: &str,
        password_hash: &str,
        name: &str,
    ) -> Result<User, DomainError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.users.iter().any(|u| u.email == email) {
            return Err(DomainError::Conflict("users_email_key".to_string()));
        }
        tables.next_user_id += 1;
        let user = User {
            id: tables.next_user_id,
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            name: name.to_string(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn update(
        &self,
        id: i32,
        email: Option<&str>,
        name: Option<&str>,
    ) -> Result<User, DomainError> {
        let mut tables = self.tables.lock().unwrap();
        let user = tables
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| DomainError::NotFound("user".to_string()))?;
        if let Some(email) = email {
            user.email = email.to_string();
        }
        if let Some(name) = name {
            user.name = name.to_string();
        }
        Ok(user.clone())
    }

    async fn delete(&self, id: i32) -> Result<User, DomainError> {
        let mut tables = self.tables.lock().unwrap();
        let idx = tables
            .users
            .iter()
            .position(|u| u.id == id)
            .ok_or_else(|| DomainError::NotFound("user".to_string()))?;
        let user = tables.users.remove(idx);
        // FK cascade
        tables.articles.retain(|a| a.author_id != id);
        tables.comments.retain(|c| c.author_id != id);
        tables.likes.retain(|l| l.user_id != id);
        Ok(user)
    }
}

#[async_trait]
impl ArticleRepository for MemoryStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<Article>, DomainError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.articles.iter().find(|a| a.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Article>, DomainError> {
        Ok(self.tables.lock().unwrap().articles.clone())
    }

    async fn list_by_author(&self, author_id: i32) -> Result<Vec<Article>, DomainError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .articles
            .iter()
            .filter(|a| a.author_id == author_id)
            .cloned()
            .collect())
    }

    async fn create(
        &self,
        author_id: i32,
        title: &str,
        content: &str,
    ) -> Result<Article, DomainError> {
        let mut tables = self.tables.lock().unwrap();
        tables.next_article_id += 1;
        let article = Article {
            id: tables.next_article_id,
            title: title.to_string(),
            content: content.to_string(),
            author_id,
            created_at: Utc::now(),
        };
        tables.articles.push(article.clone());
        Ok(article)
    }

    async fn update(
        &self,
        id: i32,
        title: Option<&str>,
        content: Option<&str>,
    ) -> Result<Article, DomainError> {
        let mut tables = self.tables.lock().unwrap();
        let article = tables
            .articles
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| DomainError::NotFound("article".to_string()))?;
        if let Some(title) = title {
            article.title = title.to_string();
        }
        if let Some(content) = content {
            article.content = content.to_string();
        }
        Ok(article.clone())
    }

    async fn delete(&self, id: i32) -> Result<Article, DomainError> {
        let mut tables = self.tables.lock().unwrap();
        let idx = tables
            .articles
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| DomainError::NotFound("article".to_string()))?;
        let article = tables.articles.remove(idx);
        tables.comments.retain(|c| c.article_id != id);
        tables.likes.retain(|l| l.article_id != id);
        Ok(article)
    }
}

#[async_trait]
impl SocialRepository for MemoryStore {
    async fn find_comment(&self, id: i32) -> Result<Option<Comment>, DomainError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.comments.iter().find(|c| c.id == id).cloned())
    }

    async fn list_comments(&self) -> Result<Vec<Comment>, DomainError> {
        Ok(self.tables.lock().unwrap().comments.clone())
    }

    async fn comments_by_article(&self, article_id: i32) -> Result<Vec<Comment>, DomainError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .comments
            .iter()
            .filter(|c| c.article_id == article_id)
            .cloned()
            .collect())
    }

    async fn comments_by_author(&self, author_id: i32) -> Result<Vec<Comment>, DomainError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .comments
            .iter()
            .filter(|c| c.author_id == author_id)
            .cloned()
            .collect())
    }

    async fn create_comment(
        &self,
        author_id: i32,
        article_id: i32,
        content: &str,
    ) -> Result<Comment, DomainError> {
        let mut tables = self.tables.lock().unwrap();
        tables.next_comment_id += 1;
        let comment = Comment {
            id: tables.next_comment_id,
            content: content.to_string(),
            author_id,
            article_id,
            created_at: Utc::now(),
        };
        tables.comments.push(comment.clone());
        Ok(comment)
    }

    async fn update_comment(&self, id: i32, content: &str) -> Result<Comment, DomainError> {
        let mut tables = self.tables.lock().unwrap();
        let comment = tables
            .comments
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| DomainError::NotFound("comment".to_string()))?;
        comment.content = content.to_string();
        Ok(comment.clone())
    }

    async fn delete_comment(&self, id: i32) -> Result<Comment, DomainError> {
        let mut tables = self.tables.lock().unwrap();
        let idx = tables
            .comments
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| DomainError::NotFound("comment".to_string()))?;
        Ok(tables.comments.remove(idx))
    }

    async fn find_like(
        &self,
        user_id: i32,
        article_id: i32,
    ) -> Result<Option<Like>, DomainError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .likes
            .iter()
            .find(|l| l.user_id == user_id && l.article_id == article_id)
            .cloned())
    }

    async fn likes_by_article(&self, article_id: i32) -> Result<Vec<Like>, DomainError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .likes
            .iter()
            .filter(|l| l.article_id == article_id)
            .cloned()
            .collect())
    }

    async fn create_like(&self, user_id: i32, article_id: i32) -> Result<Like, DomainError> {
        let mut tables = self.tables.lock().unwrap();
        if tables
            .likes
            .iter()
            .any(|l| l.user_id == user_id && l.article_id == article_id)
        {
            return Err(DomainError::Conflict(
                "likes_user_id_article_id_key".to_string(),
            ));
        }
        tables.next_like_id += 1;
        let like = Like {
            id: tables.next_like_id,
            user_id,
            article_id,
        };
        tables.likes.push(like.clone());
        Ok(like)
    }

    async fn delete_like(&self, id: i32) -> Result<Like, DomainError> {
        let mut tables = self.tables.lock().unwrap();
        let idx = tables
            .likes
            .iter()
            .position(|l| l.id == id)
            .ok_or_else(|| DomainError::NotFound("like".to_string()))?;
        Ok(tables.likes.remove(idx))
    }
}

fn spawn_schema() -> (Arc<MemoryStore>, GazetteSchema) {
    let store = Arc::new(MemoryStore::default());
    let schema = build_schema(GraphQLContext {
        users: store.clone(),
        articles: store.clone(),
        social: store.clone(),
        jwt_secret: JWT_SECRET.to_string(),
    });
    (store, schema)
}

async fn execute(schema: &GazetteSchema, session: Session, query: &str) -> Value {
    let response = schema
        .execute(async_graphql::Request::new(query).data(session))
        .await;
    assert!(
        response.errors.is_empty(),
        "unexpected GraphQL errors: {:?}",
        response.errors
    );
    serde_json::to_value(response.data).expect("response data should serialize")
}

/// Register an account and build an authenticated session from the returned
/// token, exercising the real decode path.
async fn register(schema: &GazetteSchema, email: &str, name: &str) -> Session {
    let data = execute(
        schema,
        Session::anonymous(),
        &format!(
            r#"mutation {{ signUp(email: "{email}", password: "pw-{name}-123", name: "{name}") {{ code success message token }} }}"#
        ),
    )
    .await;
    assert_eq!(data["signUp"]["code"], 200, "signUp failed: {data}");
    let token = data["signUp"]["token"].as_str().expect("token");
    Session::authenticated(auth::decode_token(token, JWT_SECRET).expect("valid token"))
}

#[tokio::test]
async fn hello_world() {
    let (_, schema) = spawn_schema();
    let data = execute(&schema, Session::anonymous(), "{ hello }").await;
    assert_eq!(data["hello"], "Hello world!");
}

#[tokio::test]
async fn sign_up_rejects_duplicate_email() {
    let (store, schema) = spawn_schema();
    register(&schema, "alice@example.com", "Alice").await;

    let data = execute(
        &schema,
        Session::anonymous(),
        r#"mutation { signUp(email: "alice@example.com", password: "other", name: "Imposter") { code success message token } }"#,
    )
    .await;
    assert_eq!(data["signUp"]["code"], 400);
    assert_eq!(data["signUp"]["success"], false);
    assert!(data["signUp"]["token"].is_null());
    assert_eq!(store.user_count(), 1);
}

#[tokio::test]
async fn sign_in_checks_credentials() {
    let (_, schema) = spawn_schema();
    register(&schema, "alice@example.com", "Alice").await;

    let wrong_password = execute(
        &schema,
        Session::anonymous(),
        r#"mutation { signIn(email: "alice@example.com", password: "nope") { code success token } }"#,
    )
    .await;
    assert_eq!(wrong_password["signIn"]["code"], 401);
    assert!(wrong_password["signIn"]["token"].is_null());

    let unknown = execute(
        &schema,
        Session::anonymous(),
        r#"mutation { signIn(email: "nobody@example.com", password: "nope") { code success token } }"#,
    )
    .await;
    assert_eq!(unknown["signIn"]["code"], 404);

    let ok = execute(
        &schema,
        Session::anonymous(),
        r#"mutation { signIn(email: "alice@example.com", password: "pw-Alice-123") { code success token } }"#,
    )
    .await;
    assert_eq!(ok["signIn"]["code"], 200);
    let token = ok["signIn"]["token"].as_str().expect("token");
    let current = auth::decode_token(token, JWT_SECRET).expect("valid token");
    assert_eq!(current.email, "alice@example.com");
}

#[tokio::test]
async fn user_lookup_errors_when_missing() {
    let (_, schema) = spawn_schema();
    let alice = register(&schema, "alice@example.com", "Alice").await;

    let found = execute(&schema, alice, "{ user(id: 1) { email } }").await;
    assert_eq!(found["user"]["email"], "alice@example.com");

    let response = schema
        .execute(async_graphql::Request::new("{ user(id: 999) { id } }").data(Session::anonymous()))
        .await;
    assert_eq!(response.errors.len(), 1);
    assert_eq!(response.errors[0].message, "User not found");
}

#[tokio::test]
async fn me_is_null_for_anonymous() {
    let (_, schema) = spawn_schema();
    let data = execute(&schema, Session::anonymous(), "{ me { id email } }").await;
    assert!(data["me"].is_null());
}

#[tokio::test]
async fn me_returns_the_caller() {
    let (_, schema) = spawn_schema();
    let alice = register(&schema, "alice@example.com", "Alice").await;
    let data = execute(&schema, alice, "{ me { email name } }").await;
    assert_eq!(data["me"]["email"], "alice@example.com");
    assert_eq!(data["me"]["name"], "Alice");
}

#[tokio::test]
async fn mutations_require_authentication() {
    let (store, schema) = spawn_schema();
    let data = execute(
        &schema,
        Session::anonymous(),
        r#"mutation { createArticle(title: "T", content: "C") { code success } }"#,
    )
    .await;
    assert_eq!(data["createArticle"]["code"], 401);
    assert_eq!(store.article_count(), 0);

    let data = execute(
        &schema,
        Session::anonymous(),
        "mutation { deleteUser { code success } }",
    )
    .await;
    assert_eq!(data["deleteUser"]["code"], 401);
}

#[tokio::test]
async fn only_the_owner_can_update_or_delete_an_article() {
    let (store, schema) = spawn_schema();
    let alice = register(&schema, "alice@example.com", "Alice").await;
    let bob = register(&schema, "bob@example.com", "Bob").await;

    let created = execute(
        &schema,
        alice.clone(),
        r#"mutation { createArticle(title: "Premier Article", content: "Contenu") { code article { id } } }"#,
    )
    .await;
    assert_eq!(created["createArticle"]["code"], 200);
    let id = created["createArticle"]["article"]["id"].as_i64().unwrap();

    let update_by_bob = execute(
        &schema,
        bob.clone(),
        &format!(r#"mutation {{ updateArticle(id: {id}, title: "Hijacked") {{ code success }} }}"#),
    )
    .await;
    assert_eq!(update_by_bob["updateArticle"]["code"], 403);

    let delete_by_bob = execute(
        &schema,
        bob,
        &format!("mutation {{ deleteArticle(id: {id}) {{ code success }} }}"),
    )
    .await;
    assert_eq!(delete_by_bob["deleteArticle"]["code"], 403);
    assert_eq!(store.article_count(), 1);

    let update_missing = execute(
        &schema,
        alice.clone(),
        r#"mutation { updateArticle(id: 999, title: "X") { code } }"#,
    )
    .await;
    assert_eq!(update_missing["updateArticle"]["code"], 404);

    let update_by_alice = execute(
        &schema,
        alice.clone(),
        &format!(r#"mutation {{ updateArticle(id: {id}, title: "Edited") {{ code article {{ title }} }} }}"#),
    )
    .await;
    assert_eq!(update_by_alice["updateArticle"]["code"], 200);
    assert_eq!(update_by_alice["updateArticle"]["article"]["title"], "Edited");

    let delete_by_alice = execute(
        &schema,
        alice,
        &format!("mutation {{ deleteArticle(id: {id}) {{ code success }} }}"),
    )
    .await;
    assert_eq!(delete_by_alice["deleteArticle"]["code"], 200);
    assert_eq!(store.article_count(), 0);
}

#[tokio::test]
async fn only_the_author_can_touch_a_comment() {
    let (store, schema) = spawn_schema();
    let alice = register(&schema, "alice@example.com", "Alice").await;
    let bob = register(&schema, "bob@example.com", "Bob").await;

    let article = execute(
        &schema,
        alice.clone(),
        r#"mutation { createArticle(title: "T", content: "C") { article { id } } }"#,
    )
    .await;
    let article_id = article["createArticle"]["article"]["id"].as_i64().unwrap();

    let missing = execute(
        &schema,
        bob.clone(),
        r#"mutation { createComment(articleId: 999, content: "Hi") { code } }"#,
    )
    .await;
    assert_eq!(missing["createComment"]["code"], 404);

    let comment = execute(
        &schema,
        bob.clone(),
        &format!(
            r#"mutation {{ createComment(articleId: {article_id}, content: "Super article !") {{ code comment {{ id }} }} }}"#
        ),
    )
    .await;
    assert_eq!(comment["createComment"]["code"], 200);
    let comment_id = comment["createComment"]["comment"]["id"].as_i64().unwrap();

    let update_by_alice = execute(
        &schema,
        alice.clone(),
        &format!(r#"mutation {{ updateComment(id: {comment_id}, content: "Edited") {{ code }} }}"#),
    )
    .await;
    assert_eq!(update_by_alice["updateComment"]["code"], 403);

    let delete_by_alice = execute(
        &schema,
        alice,
        &format!("mutation {{ deleteComment(id: {comment_id}) {{ code }} }}"),
    )
    .await;
    assert_eq!(delete_by_alice["deleteComment"]["code"], 403);
    assert_eq!(store.comment_count(), 1);

    let update_by_bob = execute(
        &schema,
        bob.clone(),
        &format!(r#"mutation {{ updateComment(id: {comment_id}, content: "Edited") {{ code comment {{ content }} }} }}"#),
    )
    .await;
    assert_eq!(update_by_bob["updateComment"]["code"], 200);
    assert_eq!(
        update_by_bob["updateComment"]["comment"]["content"],
        "Edited"
    );

    let delete_by_bob = execute(
        &schema,
        bob,
        &format!("mutation {{ deleteComment(id: {comment_id}) {{ code }} }}"),
    )
    .await;
    assert_eq!(delete_by_bob["deleteComment"]["code"], 200);
    assert_eq!(store.comment_count(), 0);
}

#[tokio::test]
async fn an_article_can_be_liked_at_most_once() {
    let (store, schema) = spawn_schema();
    let alice = register(&schema, "alice@example.com", "Alice").await;
    let bob = register(&schema, "bob@example.com", "Bob").await;

    let article = execute(
        &schema,
        alice,
        r#"mutation { createArticle(title: "T", content: "C") { article { id } } }"#,
    )
    .await;
    let article_id = article["createArticle"]["article"]["id"].as_i64().unwrap();

    let missing = execute(
        &schema,
        bob.clone(),
        r#"mutation { likeArticle(articleId: 999) { code } }"#,
    )
    .await;
    assert_eq!(missing["likeArticle"]["code"], 404);

    let first = execute(
        &schema,
        bob.clone(),
        &format!("mutation {{ likeArticle(articleId: {article_id}) {{ code success like {{ id }} }} }}"),
    )
    .await;
    assert_eq!(first["likeArticle"]["code"], 200);

    let second = execute(
        &schema,
        bob,
        &format!("mutation {{ likeArticle(articleId: {article_id}) {{ code success message }} }}"),
    )
    .await;
    assert_eq!(second["likeArticle"]["code"], 400);
    assert_eq!(second["likeArticle"]["message"], "Article already liked");
    assert_eq!(store.like_count(), 1);
}

#[tokio::test]
async fn unlike_requires_an_existing_like() {
    let (store, schema) = spawn_schema();
    let alice = register(&schema, "alice@example.com", "Alice").await;
    let bob = register(&schema, "bob@example.com", "Bob").await;

    let article = execute(
        &schema,
        alice,
        r#"mutation { createArticle(title: "T", content: "C") { article { id } } }"#,
    )
    .await;
    let article_id = article["createArticle"]["article"]["id"].as_i64().unwrap();

    let before = execute(
        &schema,
        bob.clone(),
        &format!("mutation {{ unlikeArticle(articleId: {article_id}) {{ code }} }}"),
    )
    .await;
    assert_eq!(before["unlikeArticle"]["code"], 404);

    execute(
        &schema,
        bob.clone(),
        &format!("mutation {{ likeArticle(articleId: {article_id}) {{ code }} }}"),
    )
    .await;
    assert_eq!(store.like_count(), 1);

    let unlike = execute(
        &schema,
        bob.clone(),
        &format!("mutation {{ unlikeArticle(articleId: {article_id}) {{ code success }} }}"),
    )
    .await;
    assert_eq!(unlike["unlikeArticle"]["code"], 200);
    assert_eq!(store.like_count(), 0);

    let again = execute(
        &schema,
        bob,
        &format!("mutation {{ unlikeArticle(articleId: {article_id}) {{ code }} }}"),
    )
    .await;
    assert_eq!(again["unlikeArticle"]["code"], 404);
}

#[tokio::test]
async fn delete_user_removes_the_account() {
    let (store, schema) = spawn_schema();
    register(&schema, "alice@example.com", "Alice").await;
    let chloe = register(&schema, "chloe@example.com", "Chloe").await;
    assert_eq!(store.user_count(), 2);

    let data = execute(
        &schema,
        chloe,
        "mutation { deleteUser { code success user { email } } }",
    )
    .await;
    assert_eq!(data["deleteUser"]["code"], 200);
    assert_eq!(data["deleteUser"]["user"]["email"], "chloe@example.com");
    assert_eq!(store.user_count(), 1);

    let users = execute(&schema, Session::anonymous(), "{ users { email } }").await;
    assert_eq!(
        users["users"],
        serde_json::json!([{ "email": "alice@example.com" }])
    );
}

#[tokio::test]
async fn update_user_edits_the_calling_account() {
    let (_, schema) = spawn_schema();
    let alice = register(&schema, "alice@example.com", "Alice").await;

    let data = execute(
        &schema,
        alice,
        r#"mutation { updateUser(name: "Alice Liddell") { code user { email name } } }"#,
    )
    .await;
    assert_eq!(data["updateUser"]["code"], 200);
    assert_eq!(data["updateUser"]["user"]["name"], "Alice Liddell");
    assert_eq!(data["updateUser"]["user"]["email"], "alice@example.com");
}

#[tokio::test]
async fn empty_update_fields_leave_values_unchanged() {
    let (_, schema) = spawn_schema();
    let alice = register(&schema, "alice@example.com", "Alice").await;

    let user = execute(
        &schema,
        alice.clone(),
        r#"mutation { updateUser(email: "", name: "") { code user { email name } } }"#,
    )
    .await;
    assert_eq!(user["updateUser"]["code"], 200);
    assert_eq!(user["updateUser"]["user"]["email"], "alice@example.com");
    assert_eq!(user["updateUser"]["user"]["name"], "Alice");

    let created = execute(
        &schema,
        alice.clone(),
        r#"mutation { createArticle(title: "T", content: "C") { article { id } } }"#,
    )
    .await;
    let id = created["createArticle"]["article"]["id"].as_i64().unwrap();

    let article = execute(
        &schema,
        alice,
        &format!(
            r#"mutation {{ updateArticle(id: {id}, title: "", content: "New") {{ code article {{ title content }} }} }}"#
        ),
    )
    .await;
    assert_eq!(article["updateArticle"]["code"], 200);
    assert_eq!(article["updateArticle"]["article"]["title"], "T");
    assert_eq!(article["updateArticle"]["article"]["content"], "New");
}

#[tokio::test]
async fn end_to_end_publish_and_like_flow() {
    let (_, schema) = spawn_schema();

    // alice registers and signs in
    register(&schema, "alice@example.com", "Alice").await;
    let signed_in = execute(
        &schema,
        Session::anonymous(),
        r#"mutation { signIn(email: "alice@example.com", password: "pw-Alice-123") { code token } }"#,
    )
    .await;
    let token = signed_in["signIn"]["token"].as_str().unwrap();
    let alice = Session::authenticated(auth::decode_token(token, JWT_SECRET).unwrap());

    let created = execute(
        &schema,
        alice,
        r#"mutation { createArticle(title: "Premier Article", content: "Contenu du premier article") { code article { id } } }"#,
    )
    .await;
    assert_eq!(created["createArticle"]["code"], 200);

    let bob = register(&schema, "bob@example.com", "Bob").await;
    let article_id = created["createArticle"]["article"]["id"].as_i64().unwrap();
    let liked = execute(
        &schema,
        bob,
        &format!("mutation {{ likeArticle(articleId: {article_id}) {{ code }} }}"),
    )
    .await;
    assert_eq!(liked["likeArticle"]["code"], 200);

    let articles = execute(
        &schema,
        Session::anonymous(),
        "{ articles { title author { email } likes { user { email } } } }",
    )
    .await;
    let articles = articles["articles"].as_array().unwrap();
    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0]["title"], "Premier Article");
    assert_eq!(articles[0]["author"]["email"], "alice@example.com");
    let likes = articles[0]["likes"].as_array().unwrap();
    assert_eq!(likes.len(), 1);
    assert_eq!(likes[0]["user"]["email"], "bob@example.com");
}

#[tokio::test]
async fn nested_comment_relations_resolve() {
    let (_, schema) = spawn_schema();
    let alice = register(&schema, "alice@example.com", "Alice").await;
    let bob = register(&schema, "bob@example.com", "Bob").await;

    let article = execute(
        &schema,
        alice,
        r#"mutation { createArticle(title: "T", content: "C") { article { id } } }"#,
    )
    .await;
    let article_id = article["createArticle"]["article"]["id"].as_i64().unwrap();
    execute(
        &schema,
        bob,
        &format!(r#"mutation {{ createComment(articleId: {article_id}, content: "Hi") {{ code }} }}"#),
    )
    .await;

    let data = execute(
        &schema,
        Session::anonymous(),
        &format!(
            "{{ commentsByArticle(articleId: {article_id}) {{ content author {{ email }} article {{ title }} }} }}"
        ),
    )
    .await;
    let comments = data["commentsByArticle"].as_array().unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0]["author"]["email"], "bob@example.com");
    assert_eq!(comments[0]["article"]["title"], "T");
}

#[tokio::test]
async fn a_bad_token_is_treated_as_anonymous() {
    let (_, schema) = spawn_schema();
    let session = Session::from_headers(
        &{
            let mut headers = axum::http::HeaderMap::new();
            headers.insert(
                axum::http::header::AUTHORIZATION,
                axum::http::HeaderValue::from_static("Bearer not.a.token"),
            );
            headers
        },
        JWT_SECRET,
    );
    let data = execute(&schema, session, "{ me { id } }").await;
    assert!(data["me"].is_null());
}
