//! HTTP route definitions
//!
//! The primary API is GraphQL at /graphql; only the health endpoints are
//! plain REST.

pub mod health;
