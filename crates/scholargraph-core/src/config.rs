//! Connection and ingestion configuration.
//!
//! Values come from an optional TOML file; the CLI layers environment
//! variables and flags on top.

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{GraphError, GraphResult};

/// Configuration for connecting to Neo4j.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GraphConfig {
    #[serde(default = "default_uri")]
    pub uri: String,
    #[serde(default = "default_user")]
    pub user: String,
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,
    #[serde(default = "default_fetch_size")]
    pub fetch_size: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            uri: default_uri(),
            user: default_user(),
            password: String::new(),
            database: default_database(),
            max_connections: default_max_connections(),
            fetch_size: default_fetch_size(),
        }
    }
}

/// CSV files staged in the store's import directory.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoadConfig {
    /// Columns: `name`, `institution`, `department`.
    #[serde(default = "default_authors_csv")]
    pub authors_csv: String,
    /// Columns: `START_ID`, `END_ID`, `comment`, `acceptanceProbability`.
    #[serde(default = "default_reviews_csv")]
    pub reviews_csv: String,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            authors_csv: default_authors_csv(),
            reviews_csv: default_reviews_csv(),
        }
    }
}

impl LoadConfig {
    /// `file:///` URL for the store's `LOAD CSV`.
    pub fn file_url(name: &str) -> String {
        if name.contains("://") {
            name.to_string()
        } else {
            format!("file:///{}", name.trim_start_matches('/'))
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub graph: GraphConfig,
    #[serde(default)]
    pub load: LoadConfig,
}

impl AppConfig {
    /// Parse a TOML document.
    pub fn from_toml(source: &str) -> GraphResult<Self> {
        toml::from_str(source).map_err(|e| GraphError::config(e.to_string()))
    }

    /// Load from `path`, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> GraphResult<Self> {
        match path {
            Some(path) => {
                debug!(path = %path.display(), "Loading configuration");
                let source = std::fs::read_to_string(path)?;
                Self::from_toml(&source)
            }
            None => Ok(Self::default()),
        }
    }
}

// ── defaults ──

fn default_uri() -> String {
    "bolt://localhost:7687".to_string()
}
fn default_user() -> String {
    "neo4j".to_string()
}
fn default_database() -> String {
    "neo4j".to_string()
}
fn default_max_connections() -> usize {
    1
}
fn default_fetch_size() -> usize {
    200
}
fn default_authors_csv() -> String {
    "authors_semantic.csv".to_string()
}
fn default_reviews_csv() -> String {
    "author_review_papers.csv".to_string()
}
