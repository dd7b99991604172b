//! GraphQL schema and resolvers for the admissions subgraph
//!
//! This module contains the async-graphql schema including:
//! - Query resolvers for admissions, exams, students and payments
//! - Mutation resolvers with optimistic-concurrency tokens
//! - Type definitions for all GraphQL objects
//! - The request-scoped DataLoader layer and the where-filter compiler

pub mod filter;
pub mod loaders;
pub mod mutation;
pub mod pagination;
pub mod query;
pub mod schema;
pub mod types;

pub use loaders::Loaders;
pub use schema::{build_schema, AdmissionsSchema};
