//! GraphQL schema builder for the admissions subgraph
//!
//! This module provides the schema construction for the async-graphql API.

use async_graphql::{EmptySubscription, Schema};
use sqlx::PgPool;

use super::mutation::Mutation;
use super::query::Query;

/// The admissions subgraph schema type
pub type AdmissionsSchema = Schema<Query, Mutation, EmptySubscription>;

/// Builder for constructing the GraphQL schema with required services
pub struct SchemaBuilder {
    pool: Option<PgPool>,
}

impl SchemaBuilder {
    /// Create a new schema builder
    pub fn new() -> Self {
        Self { pool: None }
    }

    /// Set the database pool
    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    /// Build the schema with all configured services
    ///
    /// The pool in schema data backs migrations and health checks; query
    /// and mutation resolvers go through the per-request
    /// [`Loaders`](super::loaders::Loaders) injected by the HTTP handler.
    ///
    /// # Panics
    /// Panics if the database pool is not configured
    pub fn build(self) -> AdmissionsSchema {
        let pool = self.pool.expect("database pool is required");

        Schema::build(Query::default(), Mutation::default(), EmptySubscription)
            .data(pool)
            .enable_federation()
            .finish()
    }
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a new GraphQL schema over the provided pool
pub fn build_schema(pool: PgPool) -> AdmissionsSchema {
    SchemaBuilder::new().pool(pool).build()
}

#[cfg(test)]
mod tests {
    use super::*;

    // SDL-level assertions live in the integration test suite; only the
    // builder plumbing is checked here.

    #[test]
    fn test_schema_builder_default() {
        let builder = SchemaBuilder::default();
        assert!(builder.pool.is_none());
    }
}
