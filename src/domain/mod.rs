pub mod article;
pub mod errors;
pub mod social;
pub mod user;
