//! Graph evolution: institutions, review metadata and acceptance decisions.
//!
//! The CSV files must already be staged where the store's `LOAD CSV` can
//! read them.

use scholargraph_core::{CypherQuery, LoadConfig};

use crate::pipeline::Step;

/// Summed reviewer probability above which a paper counts as accepted.
pub const ACCEPTANCE_THRESHOLD: f64 = 0.5;

/// Merge institutions, then create authors affiliated with them.
pub fn load_institutions(authors_csv: &str) -> Vec<Step> {
    let url = LoadConfig::file_url(authors_csv);
    vec![
        Step::write(
            "Merging institutions",
            CypherQuery::new(
                "LOAD CSV WITH HEADERS FROM $url AS line
                 MERGE (i:Institution {name: line.institution})",
            )
            .param("url", url.as_str()),
        ),
        Step::write(
            "Creating authors and their affiliations",
            CypherQuery::new(
                "LOAD CSV WITH HEADERS FROM $url AS line
                 CREATE (a:Author {name: line.name})
                 WITH a, line
                 MATCH (i:Institution {name: line.institution})
                 CREATE (a)-[r:is_from]->(i)
                 SET r.department = line.department",
            )
            .param("url", url.as_str()),
        ),
    ]
}

/// Copy comments and acceptance probabilities onto existing `reviews`
/// relationships. Rows without a matching relationship are skipped.
pub fn load_reviews(reviews_csv: &str) -> CypherQuery {
    CypherQuery::new(
        "LOAD CSV WITH HEADERS FROM $url AS line
         MATCH (author:Author {ID: line.START_ID})-[r:reviews]->(paper:Paper {ID: line.END_ID})
         SET r.comment = line.comment,
             r.acceptanceProbability = toFloat(line.acceptanceProbability)
         RETURN count(r) AS reviewsUpdated",
    )
    .param("url", LoadConfig::file_url(reviews_csv))
}

/// Sum each paper's reviewer probabilities and store the verdict on every
/// review of that paper.
pub fn decide_acceptance(threshold: f64) -> CypherQuery {
    CypherQuery::new(
        "MATCH (:Author)-[r:reviews]->(p:Paper)
         WITH p, collect(r) AS reviews, sum(r.acceptanceProbability) AS totalProbability
         UNWIND reviews AS r
         SET r.decision = totalProbability > $threshold
         RETURN p.title AS paperTitle,
                totalProbability,
                r.decision AS decision",
    )
    .param("threshold", threshold)
}

/// Every evolution step, in order.
pub fn evolution(load: &LoadConfig, threshold: f64) -> Vec<Step> {
    let mut steps = load_institutions(&load.authors_csv);
    steps.push(Step::write("Loading review metadata", load_reviews(&load.reviews_csv)));
    steps.push(Step::write("Deciding paper acceptance", decide_acceptance(threshold)));
    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::execute_all;
    use crate::testing::MemorySession;
    use scholargraph_core::{AccessMode, Param};

    #[test]
    fn test_csv_urls_are_bound() {
        let steps = load_institutions("authors_semantic.csv");
        for step in &steps {
            assert_eq!(
                step.query.params().get("url"),
                Some(&Param::String("file:///authors_semantic.csv".to_string()))
            );
        }
    }

    #[test]
    fn test_evolution_is_all_writes() {
        let steps = evolution(&LoadConfig::default(), ACCEPTANCE_THRESHOLD);
        assert_eq!(steps.len(), 4);
        assert!(steps.iter().all(|s| s.mode == AccessMode::Write));
        assert!(steps[3].query.text().contains("> $threshold"));
    }

    #[tokio::test]
    async fn test_reviews_without_relationships_update_nothing() {
        let mut session = MemorySession::new();

        let outcomes = execute_all(&mut session, &evolution(&LoadConfig::default(), ACCEPTANCE_THRESHOLD))
            .await
            .unwrap();

        assert_eq!(outcomes.len(), 4);
        assert!(outcomes.iter().all(|(records, _)| records.is_empty()));
    }
}
