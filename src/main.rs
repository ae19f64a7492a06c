use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderValue, Method, header};
use gazette::{
    config::Config,
    infrastructure::{
        database::pool::create_pool,
        repositories::{
            sqlx_article_repository::SqlxArticleRepository,
            sqlx_social_repository::SqlxSocialRepository,
            sqlx_user_repository::SqlxUserRepository,
        },
    },
    presentation::{
        graphql::{build_schema, context::GraphQLContext},
        http::{routes::create_router, state::AppState},
    },
};
use tower_http::cors::{AllowOrigin, CorsLayer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Uses RUST_LOG if set, otherwise sensible defaults
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("info,gazette=debug,tower_http=debug"))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = Config::from_env()?;
    let db = create_pool(&config).await?;
    sqlx::migrate!("./migrations").run(&db).await?;

    let schema = build_schema(GraphQLContext {
        users: Arc::new(SqlxUserRepository::new(db.clone())),
        articles: Arc::new(SqlxArticleRepository::new(db.clone())),
        social: Arc::new(SqlxSocialRepository::new(db.clone())),
        jwt_secret: config.jwt_secret.clone(),
    });

    let state = AppState {
        db,
        config: config.clone(),
        schema,
    };

    // Development allows any origin; production restricts to configured
    // origins once there are any.
    let cors = if cfg!(debug_assertions) {
        CorsLayer::new()
            .allow_origin(tower_http::cors::Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
            .max_age(Duration::from_secs(3600))
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(Vec::<HeaderValue>::new()))
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
            .max_age(Duration::from_secs(3600))
    };

    let app = create_router(state).layer(cors);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("GraphQL server ready at http://{}/graphql", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Ctrl+C received, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("SIGTERM received, initiating graceful shutdown");
        }
    }
}
