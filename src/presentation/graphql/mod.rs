//! GraphQL schema wiring.
//!
//! The schema is built once at startup with the repository handles injected
//! as schema data; the per-request [`context::Session`] is attached to each
//! request by the HTTP handler before execution.

pub mod context;
pub mod mutation;
pub mod query;
pub mod types;

use async_graphql::{EmptySubscription, Schema};

use self::context::GraphQLContext;
use self::mutation::MutationRoot;
use self::query::QueryRoot;

pub type GazetteSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the GraphQL schema with the shared request context.
pub fn build_schema(context: GraphQLContext) -> GazetteSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(context)
        .finish()
}
