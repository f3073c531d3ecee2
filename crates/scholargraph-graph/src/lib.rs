//! # Scholargraph Graph
//!
//! Neo4j integration for the bibliographic graph.
//!
//! Provides the session boundary, the query execution pipeline, the
//! result reporter, the idempotent index bootstrap and the catalogue of
//! analytic, algorithm, recommender and evolution queries.

pub mod client;
pub mod pipeline;
pub mod queries;
pub mod report;
pub mod schema;
pub mod session;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use client::GraphClient;
pub use pipeline::{execute, execute_all, Step};
pub use report::Reporter;
pub use session::{with_session, GraphSession};
