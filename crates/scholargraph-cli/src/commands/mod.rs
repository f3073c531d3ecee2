//! CLI command definitions and handlers.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use scholargraph_core::AppConfig;
use scholargraph_graph::GraphClient;
use std::path::PathBuf;

pub mod algorithms;
pub mod analytics;
pub mod evolve;
pub mod indexes;
pub mod query;
pub mod recommend;

/// Scholargraph - citation graph analytics over Neo4j
#[derive(Parser)]
#[command(name = "scholargraph")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true, env = "SCHOLARGRAPH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Also write logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Overrides for the `[graph]` section of the configuration file.
#[derive(Args, Debug, Default)]
pub struct ConnectionArgs {
    /// Bolt URI of the Neo4j server
    #[arg(long, global = true, env = "NEO4J_URI")]
    pub uri: Option<String>,

    /// Neo4j user
    #[arg(long, global = true, env = "NEO4J_USER")]
    pub user: Option<String>,

    /// Neo4j password
    #[arg(long, global = true, env = "NEO4J_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Database name
    #[arg(long, global = true, env = "NEO4J_DATABASE")]
    pub database: Option<String>,
}

impl ConnectionArgs {
    /// Layer the flags and environment over `config`.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(uri) = &self.uri {
            config.graph.uri = uri.clone();
        }
        if let Some(user) = &self.user {
            config.graph.user = user.clone();
        }
        if let Some(password) = &self.password {
            config.graph.password = password.clone();
        }
        if let Some(database) = &self.database {
            config.graph.database = database.clone();
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage the lookup indexes
    #[command(subcommand)]
    Indexes(indexes::IndexCommands),

    /// Run the analytic read queries
    Analytics(analytics::AnalyticsArgs),

    /// Run graph-algorithm workflows (node similarity, betweenness)
    Algorithms(algorithms::AlgorithmArgs),

    /// Recommend reviewers for a research community
    Recommend(recommend::RecommendArgs),

    /// Load institutions and reviews, then decide acceptance
    Evolve(evolve::EvolveArgs),

    /// Execute a single Cypher query
    Query(query::QueryArgs),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let mut config = AppConfig::load(self.config.as_deref())
            .context("Failed to load configuration")?;
        self.connection.apply(&mut config);

        let client = GraphClient::connect(&config.graph)
            .await
            .with_context(|| format!("Failed to connect to Neo4j at {}", config.graph.uri))?;

        match self.command {
            Commands::Indexes(cmd) => indexes::execute(cmd, client).await,
            Commands::Analytics(args) => analytics::execute(args, client).await,
            Commands::Algorithms(args) => algorithms::execute(args, client).await,
            Commands::Recommend(args) => recommend::execute(args, client).await,
            Commands::Evolve(args) => evolve::execute(args, config.load, client).await,
            Commands::Query(args) => query::execute(args, client).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_flags_override_file() {
        let mut config = AppConfig::from_toml("[graph]\nuri = \"bolt://file:7687\"\nuser = \"reader\"").unwrap();
        let args = ConnectionArgs {
            uri: Some("bolt://flag:7687".to_string()),
            ..Default::default()
        };

        args.apply(&mut config);

        assert_eq!(config.graph.uri, "bolt://flag:7687");
        assert_eq!(config.graph.user, "reader");
    }

    #[test]
    fn test_cli_parses_query_with_params() {
        let cli = Cli::try_parse_from([
            "scholargraph",
            "query",
            "MATCH (p:Paper {ID: $id}) RETURN p",
            "--param",
            "id=p-1",
            "--write",
        ])
        .unwrap();

        match cli.command {
            Commands::Query(args) => {
                assert!(args.write);
                assert_eq!(args.params, vec!["id=p-1".to_string()]);
            }
            _ => panic!("expected query command"),
        }
    }
}
