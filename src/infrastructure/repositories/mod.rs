pub mod sqlx_article_repository;
pub mod sqlx_social_repository;
pub mod sqlx_user_repository;

pub use sqlx_article_repository::SqlxArticleRepository;
pub use sqlx_social_repository::SqlxSocialRepository;
pub use sqlx_user_repository::SqlxUserRepository;
