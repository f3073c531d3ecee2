//! Graph Data Science workflows.
//!
//! Each workflow drops any stale in-memory projection, projects a fresh
//! one, asks GDS for a memory estimate and finally streams the results.
//! The algorithms themselves run inside the store.

use scholargraph_core::CypherQuery;

use crate::pipeline::Step;

pub const SIMILARITY_GRAPH: &str = "myGraph1";
pub const BETWEENNESS_GRAPH: &str = "myGraph2";

/// Rows streamed back from each algorithm.
pub const STREAM_LIMIT: i64 = 5;

/// Remove a catalog graph; a missing graph is not an error.
pub fn drop_projection(graph: &str) -> CypherQuery {
    CypherQuery::new("CALL gds.graph.drop($graph, false) YIELD graphName RETURN graphName")
        .param("graph", graph)
}

/// How similar two papers are, judged by their keywords.
pub fn node_similarity(graph: &str, limit: i64) -> Vec<Step> {
    vec![
        Step::read(
            "Dropping the graph from the catalog, only if it exists",
            drop_projection(graph),
        ),
        Step::read(
            "Projecting the graph",
            CypherQuery::new(
                "CALL gds.graph.project($graph, ['Paper', 'Keyword'], 'has')
                 YIELD graphName, nodeCount, relationshipCount
                 RETURN graphName, nodeCount, relationshipCount",
            )
            .param("graph", graph),
        ),
        Step::read(
            "Estimating node similarity for the projected graph",
            CypherQuery::new(
                "CALL gds.nodeSimilarity.write.estimate($graph, {
                     writeRelationshipType: 'SIMILAR',
                     writeProperty: 'score'
                 })
                 YIELD requiredMemory, nodeCount, relationshipCount
                 RETURN requiredMemory, nodeCount, relationshipCount",
            )
            .param("graph", graph),
        ),
        Step::read(
            "Running node similarity for the projected graph",
            CypherQuery::new(
                "CALL gds.nodeSimilarity.stream($graph)
                 YIELD node1, node2, similarity
                 RETURN gds.util.asNode(node1).title AS Paper1,
                        gds.util.asNode(node2).title AS Paper2,
                        similarity
                 ORDER BY similarity, Paper1, Paper2
                 LIMIT $limit",
            )
            .param("graph", graph)
            .param("limit", limit),
        ),
    ]
}

/// Importance of each paper in the undirected citation graph.
pub fn betweenness_centrality(graph: &str, limit: i64) -> Vec<Step> {
    vec![
        Step::read(
            "Dropping the graph from the catalog, only if it exists",
            drop_projection(graph),
        ),
        Step::read(
            "Projecting the graph",
            CypherQuery::new(
                "CALL gds.graph.project($graph, 'Paper', {cites: {orientation: 'UNDIRECTED'}})
                 YIELD graphName, nodeCount, relationshipCount
                 RETURN graphName, nodeCount, relationshipCount",
            )
            .param("graph", graph),
        ),
        Step::read(
            "Estimating betweenness centrality for the projected graph",
            CypherQuery::new(
                "CALL gds.betweenness.write.estimate($graph, {writeProperty: 'betweenness'})
                 YIELD requiredMemory, nodeCount, relationshipCount
                 RETURN requiredMemory, nodeCount, relationshipCount",
            )
            .param("graph", graph),
        ),
        Step::read(
            "Running betweenness centrality for the projected graph",
            CypherQuery::new(
                "CALL gds.betweenness.stream($graph)
                 YIELD nodeId, score
                 RETURN gds.util.asNode(nodeId).title AS title, score
                 ORDER BY score, title DESC
                 LIMIT $limit",
            )
            .param("graph", graph)
            .param("limit", limit),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::execute_all;
    use crate::testing::MemorySession;
    use scholargraph_core::{Param, Record};

    #[test]
    fn test_workflows_start_with_guarded_drop() {
        for steps in [
            node_similarity(SIMILARITY_GRAPH, STREAM_LIMIT),
            betweenness_centrality(BETWEENNESS_GRAPH, STREAM_LIMIT),
        ] {
            assert_eq!(steps.len(), 4);
            assert!(steps[0].query.text().contains("gds.graph.drop($graph, false)"));
            assert!(steps.last().unwrap().query.text().contains(".stream($graph)"));
        }
    }

    #[test]
    fn test_graph_name_is_bound_everywhere() {
        for step in node_similarity("papers", 3) {
            assert_eq!(
                step.query.params().get("graph"),
                Some(&Param::String("papers".to_string()))
            );
        }
    }

    #[tokio::test]
    async fn test_last_step_carries_the_stream() {
        let rows = vec![
            Record::new().with("Paper1", "A").with("Paper2", "B").with("similarity", 0.1),
            Record::new().with("Paper1", "A").with("Paper2", "C").with("similarity", 0.2),
        ];
        let mut session = MemorySession::new().respond_to("gds.nodeSimilarity.stream", rows.clone());

        let outcomes = execute_all(&mut session, &node_similarity(SIMILARITY_GRAPH, STREAM_LIMIT))
            .await
            .unwrap();

        let (records, summary) = outcomes.last().unwrap();
        assert_eq!(records, &rows);
        assert_eq!(summary.record_count, 2);
    }
}
