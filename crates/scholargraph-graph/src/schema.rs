//! Neo4j schema initialization (lookup indexes).
//!
//! Both directions are idempotent by construction: every statement carries
//! an `IF NOT EXISTS` / `IF EXISTS` guard, so neither needs a precondition
//! check. The `SHOW INDEXES` snapshot taken first only feeds the report.

use std::collections::HashSet;

use scholargraph_core::{
    AccessMode, CypherQuery, GraphResult, IndexDescriptor, IndexOutcome, IndexReport, IndexState,
    PAPER_INDEXES,
};
use tracing::info;

use crate::pipeline::execute;
use crate::session::GraphSession;

async fn existing_index_names<S: GraphSession>(session: &mut S) -> GraphResult<HashSet<String>> {
    let query = CypherQuery::new("SHOW INDEXES YIELD name RETURN name");
    let (records, _) = execute(session, &query, AccessMode::Read).await?;
    Ok(records
        .iter()
        .filter_map(|r| r.get("name").and_then(|v| v.as_str()).map(str::to_string))
        .collect())
}

/// Current state of each index in `descriptors`.
pub async fn index_states<S: GraphSession>(
    session: &mut S,
    descriptors: &[IndexDescriptor],
) -> GraphResult<Vec<(IndexDescriptor, IndexState)>> {
    let existing = existing_index_names(session).await?;
    Ok(descriptors
        .iter()
        .map(|d| {
            let state = if existing.contains(d.name) {
                IndexState::Present
            } else {
                IndexState::Absent
            };
            (*d, state)
        })
        .collect())
}

/// Create every index in `descriptors` that does not exist yet.
pub async fn create_indexes<S: GraphSession>(
    session: &mut S,
    descriptors: &[IndexDescriptor],
) -> GraphResult<IndexReport> {
    let existing = existing_index_names(session).await?;
    let mut report = IndexReport::default();

    for descriptor in descriptors {
        info!("Index for {}", descriptor.label);
        let query = CypherQuery::new(descriptor.create_statement());
        execute(session, &query, AccessMode::Write).await?;

        let outcome = if existing.contains(descriptor.name) {
            IndexOutcome::AlreadyPresent
        } else {
            IndexOutcome::Created
        };
        report.push(*descriptor, outcome);
    }

    info!(
        created = report.changed(),
        unchanged = report.unchanged(),
        "Indexes ensured"
    );
    Ok(report)
}

/// Drop every index in `descriptors` that exists.
pub async fn remove_indexes<S: GraphSession>(
    session: &mut S,
    descriptors: &[IndexDescriptor],
) -> GraphResult<IndexReport> {
    let existing = existing_index_names(session).await?;
    let mut report = IndexReport::default();

    for descriptor in descriptors {
        let query = CypherQuery::new(descriptor.drop_statement());
        execute(session, &query, AccessMode::Write).await?;

        let outcome = if existing.contains(descriptor.name) {
            IndexOutcome::Dropped
        } else {
            IndexOutcome::AlreadyAbsent
        };
        report.push(*descriptor, outcome);
    }

    info!(
        dropped = report.changed(),
        unchanged = report.unchanged(),
        "Indexes dropped"
    );
    Ok(report)
}

/// Create the lookup indexes for the bibliographic graph.
///
/// Safe to run multiple times.
pub async fn ensure_indexes<S: GraphSession>(session: &mut S) -> GraphResult<IndexReport> {
    create_indexes(session, PAPER_INDEXES).await
}

/// Drop the lookup indexes for the bibliographic graph.
///
/// Safe to run multiple times.
pub async fn drop_indexes<S: GraphSession>(session: &mut S) -> GraphResult<IndexReport> {
    remove_indexes(session, PAPER_INDEXES).await
}
