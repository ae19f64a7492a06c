use sqlx::PgPool;

use crate::config::Config;
use crate::presentation::graphql::GazetteSchema;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    pub schema: GazetteSchema,
}
