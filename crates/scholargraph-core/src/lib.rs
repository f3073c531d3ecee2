//! Scholargraph Core Library
//!
//! Types shared by the graph layer and the CLI: bound Cypher queries,
//! heterogeneous result records, execution summaries, index descriptors
//! and connection configuration.

pub mod config;
pub mod error;
pub mod index;
pub mod query;
pub mod record;
pub mod summary;

pub use config::{AppConfig, GraphConfig, LoadConfig};
pub use error::{GraphError, GraphResult};
pub use index::{IndexDescriptor, IndexOutcome, IndexReport, IndexState, PAPER_INDEXES};
pub use query::{AccessMode, CypherQuery, Param};
pub use record::{Record, Value};
pub use summary::Summary;
