//! Graph algorithm workflow commands.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use scholargraph_graph::queries::algorithms;
use scholargraph_graph::{execute_all, with_session, GraphSession, Step};

use crate::output;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Algorithm {
    /// Paper similarity based on shared keywords
    Similarity,
    /// Betweenness centrality over citations
    Betweenness,
}

impl Algorithm {
    fn title(&self) -> &'static str {
        match self {
            Algorithm::Similarity => "Algorithm 1 - Node Similarity",
            Algorithm::Betweenness => "Algorithm 2 - Betweenness Centrality",
        }
    }

    fn steps(&self, limit: i64) -> Vec<Step> {
        match self {
            Algorithm::Similarity => algorithms::node_similarity(algorithms::SIMILARITY_GRAPH, limit),
            Algorithm::Betweenness => {
                algorithms::betweenness_centrality(algorithms::BETWEENNESS_GRAPH, limit)
            }
        }
    }
}

#[derive(Args)]
pub struct AlgorithmArgs {
    /// Algorithms to run (default: all)
    #[arg(value_enum)]
    pub algorithms: Vec<Algorithm>,

    /// Rows streamed back per algorithm
    #[arg(long, default_value_t = algorithms::STREAM_LIMIT)]
    pub limit: i64,
}

pub async fn execute<S: GraphSession>(args: AlgorithmArgs, session: S) -> Result<()> {
    let selected = if args.algorithms.is_empty() {
        vec![Algorithm::Similarity, Algorithm::Betweenness]
    } else {
        args.algorithms
    };
    let limit = args.limit;

    with_session(session, move |s| {
        Box::pin(async move {
            for algorithm in selected {
                output::print_section(algorithm.title());
                let outcomes = execute_all(s, &algorithm.steps(limit))
                    .await
                    .with_context(|| format!("{} failed", algorithm.title()))?;

                if let Some((records, summary)) = outcomes.last() {
                    output::print_query_results(records, summary)?;
                }
            }
            Ok::<_, anyhow::Error>(())
        })
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use scholargraph_graph::testing::MemorySession;

    #[tokio::test]
    async fn test_default_runs_both_workflows() {
        let session = MemorySession::new();
        let log = session.query_log();

        execute(AlgorithmArgs { algorithms: vec![], limit: 5 }, session)
            .await
            .unwrap();

        let entries = log.entries();
        assert_eq!(entries.len(), 8);
        assert!(entries[3].0.contains("gds.nodeSimilarity.stream"));
        assert!(entries[7].0.contains("gds.betweenness.stream"));
    }

    #[tokio::test]
    async fn test_missing_gds_is_fatal_and_releases() {
        let session = MemorySession::new().fail_on("gds.graph.drop", "There is no procedure with the name `gds.graph.drop`");
        let closes = session.close_counter();

        let err = execute(
            AlgorithmArgs {
                algorithms: vec![Algorithm::Betweenness],
                limit: 5,
            },
            session,
        )
        .await
        .unwrap_err();

        assert!(err.to_string().contains("Betweenness"));
        assert_eq!(closes.get(), 1);
    }
}
