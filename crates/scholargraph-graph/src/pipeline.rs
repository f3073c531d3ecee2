//! Query execution pipeline.
//!
//! One query, one transaction: submit, drain every record, then build the
//! summary. Nothing is retried and records keep the order the store
//! produced them in.

use std::time::Instant;

use scholargraph_core::{AccessMode, CypherQuery, GraphResult, Record, Summary};
use tracing::{debug, info};

use crate::session::GraphSession;

/// Execute `query` in a transaction of `mode`.
///
/// The summary is only built after the result set is fully materialized, so
/// its elapsed time covers the whole round trip.
pub async fn execute<S: GraphSession>(
    session: &mut S,
    query: &CypherQuery,
    mode: AccessMode,
) -> GraphResult<(Vec<Record>, Summary)> {
    debug!(%mode, query = %query.one_line(), params = query.params().len(), "Submitting query");

    let started = Instant::now();
    let records = session.run(query, mode).await?;
    let summary = Summary {
        query: query.text().to_string(),
        mode,
        record_count: records.len(),
        elapsed: started.elapsed(),
    };

    debug!(
        records = summary.record_count,
        elapsed_ms = summary.elapsed_ms() as u64,
        "Query complete"
    );
    Ok((records, summary))
}

/// One statement of a multi-statement workflow.
#[derive(Debug, Clone)]
pub struct Step {
    pub label: &'static str,
    pub query: CypherQuery,
    pub mode: AccessMode,
}

impl Step {
    pub fn read(label: &'static str, query: CypherQuery) -> Self {
        Self {
            label,
            query,
            mode: AccessMode::Read,
        }
    }

    pub fn write(label: &'static str, query: CypherQuery) -> Self {
        Self {
            label,
            query,
            mode: AccessMode::Write,
        }
    }
}

/// Execute `steps` in order, each in its own transaction.
///
/// Stops at the first failure. Returns one outcome per step; the last is
/// usually the one worth reporting.
pub async fn execute_all<S: GraphSession>(
    session: &mut S,
    steps: &[Step],
) -> GraphResult<Vec<(Vec<Record>, Summary)>> {
    let mut outcomes = Vec::with_capacity(steps.len());
    for step in steps {
        info!("{}", step.label);
        outcomes.push(execute(session, &step.query, step.mode).await?);
    }
    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemorySession;
    use scholargraph_core::GraphError;

    fn titles(records: &[Record]) -> Vec<String> {
        records
            .iter()
            .filter_map(|r| r.get("title").and_then(|v| v.as_str()).map(str::to_string))
            .collect()
    }

    #[tokio::test]
    async fn test_record_order_is_preserved_across_runs() {
        let rows = vec![
            Record::new().with("title", "Zeta").with("score", 0.1),
            Record::new().with("title", "Alpha").with("score", 0.2),
            Record::new().with("title", "Mu").with("score", 0.3),
        ];
        let mut session = MemorySession::new().respond_to("gds.betweenness.stream", rows);
        let query = CypherQuery::new("CALL gds.betweenness.stream('g') YIELD nodeId, score RETURN score");

        let (first, _) = execute(&mut session, &query, AccessMode::Read).await.unwrap();
        let (second, _) = execute(&mut session, &query, AccessMode::Read).await.unwrap();

        assert_eq!(titles(&first), vec!["Zeta", "Alpha", "Mu"]);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_summary_matches_materialized_records() {
        let rows = vec![Record::new().with("n", 1i64), Record::new().with("n", 2i64)];
        let mut session = MemorySession::new().respond_to("UNWIND", rows);
        let query = CypherQuery::new("UNWIND [1, 2] AS n RETURN n");

        let (records, summary) = execute(&mut session, &query, AccessMode::Read).await.unwrap();

        assert_eq!(summary.record_count, records.len());
        assert_eq!(summary.query, query.text());
        assert_eq!(summary.mode, AccessMode::Read);
    }

    #[tokio::test]
    async fn test_write_matching_nothing_is_not_an_error() {
        let mut session = MemorySession::new();
        let query = CypherQuery::new(
            "MATCH (a:Author {ID: $start})-[r:reviews]->(p:Paper {ID: $end}) SET r.comment = $comment",
        )
        .param("start", "a-404")
        .param("end", "p-404")
        .param("comment", "solid");

        let (records, summary) = execute(&mut session, &query, AccessMode::Write).await.unwrap();

        assert!(records.is_empty());
        assert_eq!(summary.record_count, 0);
        assert!(summary.elapsed >= std::time::Duration::ZERO);
    }

    #[tokio::test]
    async fn test_submits_exactly_once_and_propagates_errors() {
        let mut session = MemorySession::new().fail_on("RETRUN", "Invalid input 'RETRUN'");
        let log = session.query_log();

        let err = execute(&mut session, &CypherQuery::new("RETRUN 1"), AccessMode::Read)
            .await
            .unwrap_err();

        assert!(matches!(err, GraphError::Query { .. }));
        assert_eq!(log.len(), 1);
    }

    #[tokio::test]
    async fn test_execute_all_stops_at_first_failure() {
        let mut session = MemorySession::new().fail_on("gds.graph.project", "Unknown procedure");
        let log = session.query_log();
        let steps = vec![
            Step::read("drop", CypherQuery::new("CALL gds.graph.drop('g', false)")),
            Step::read("project", CypherQuery::new("CALL gds.graph.project('g', 'Paper', 'cites')")),
            Step::read("stream", CypherQuery::new("CALL gds.pageRank.stream('g')")),
        ];

        assert!(execute_all(&mut session, &steps).await.is_err());
        assert_eq!(log.len(), 2);
    }

    #[tokio::test]
    async fn test_execute_all_uses_each_steps_mode() {
        let mut session = MemorySession::new();
        let log = session.query_log();
        let steps = vec![
            Step::write("create", CypherQuery::new("MERGE (rc:ResearchCommunity {name: $name})").param("name", "Databases")),
            Step::read("count", CypherQuery::new("MATCH (rc:ResearchCommunity) RETURN count(rc) AS n")),
        ];

        let outcomes = execute_all(&mut session, &steps).await.unwrap();

        assert_eq!(outcomes.len(), 2);
        let modes: Vec<_> = log.entries().into_iter().map(|(_, mode)| mode).collect();
        assert_eq!(modes, vec![AccessMode::Write, AccessMode::Read]);
    }
}
