//! Analytic read queries over the bibliographic graph.

use scholargraph_core::CypherQuery;

use crate::pipeline::Step;

/// Default row cap for the analytic queries.
pub const DEFAULT_LIMIT: i64 = 5;

/// Editions an author must have published in for the shared-conference query.
pub const MIN_EDITIONS: i64 = 4;

/// Placeholder the dataset uses for a missing title.
const MISSING_TITLE: &str = "None";

/// Top 3 most cited papers of each conference.
pub fn top_cited_papers_per_conference() -> CypherQuery {
    CypherQuery::new(
        "MATCH (p:Paper)-[r1:cites]->(citedPaper:Paper)-[r2:presented_in]->(c:Conference)
         WITH c, citedPaper, count(r1) AS numberOfCitations
         ORDER BY c, numberOfCitations DESC
         WITH c, collect(citedPaper)[0..3] AS top3
         WHERE top3[1].title <> $missing AND top3[2].title <> $missing
         RETURN c.name AS conference,
                top3[0].title AS topCitedPaper1,
                top3[1].title AS topCitedPaper2,
                top3[2].title AS topCitedPaper3",
    )
    .param("missing", MISSING_TITLE)
}

/// Pairs of authors who both published in the same conference in at least
/// `min_editions` distinct editions.
pub fn authors_in_same_conference_editions(min_editions: i64, limit: i64) -> CypherQuery {
    CypherQuery::new(
        "MATCH (a:Author)-[:writes]->(p:Paper)-[:presented_in]->(c:Conference)
         WITH c.name AS conferenceName, a, count(DISTINCT c.edition) AS distinctEditions
         WHERE distinctEditions >= $min_editions
         WITH conferenceName, a
         MATCH (a2:Author)-[:writes]->(p2:Paper)-[:presented_in]->(c:Conference {name: conferenceName})
         WHERE a2.ID <> a.ID
         WITH conferenceName, a, a2, count(DISTINCT c.edition) AS otherEditions
         WHERE otherEditions >= $min_editions
         RETURN conferenceName,
                a.name AS author1_name,
                a.email AS author1_email,
                a2.name AS author2_name,
                a2.email AS author2_email
         LIMIT $limit",
    )
    .param("min_editions", min_editions)
    .param("limit", limit)
}

/// Journal impact factor: citations received in year Y divided by the
/// journal's publications in Y-1 and Y-2.
pub fn journal_impact_factor(limit: i64) -> CypherQuery {
    CypherQuery::new(
        "MATCH (p:Paper)-[r1:cites]->(citedP:Paper)-[r2:published_in]->(j:Journal)
         WITH j, r2.year AS currYear, count(r1) AS totalCitations
         MATCH (p2:Paper)-[r3:published_in]->(j)
         WHERE r3.year = currYear - 1 OR r3.year = currYear - 2
         WITH j, currYear, totalCitations, count(r3) AS totalPublications
         WHERE totalPublications > 0
         RETURN j.name AS journalName,
                currYear AS yearOfPublication,
                toFloat(totalCitations) / totalPublications AS impactFactor
         ORDER BY impactFactor DESC
         LIMIT $limit",
    )
    .param("limit", limit)
}

/// h-index per author: at least h papers with h citations each.
pub fn author_h_index(limit: i64) -> CypherQuery {
    CypherQuery::new(
        "MATCH (a:Author)-[r1:writes]->(p1:Paper)-[r2:cites]->(p2:Paper)
         WITH a, p2, collect(p1) AS papers
         WITH a, p2, range(1, size(papers)) AS listOfPapers
         UNWIND listOfPapers AS lp
         WITH a, lp AS currHIndex, count(p2) AS citedPapers
         WHERE currHIndex <= citedPapers
         RETURN a.name AS authorName,
                currHIndex AS hIndex
         ORDER BY currHIndex DESC
         LIMIT $limit",
    )
    .param("limit", limit)
}

/// The four analytic queries, in report order.
pub fn catalogue(limit: i64) -> Vec<Step> {
    vec![
        Step::read("Query 1: top 3 cited papers per conference", top_cited_papers_per_conference()),
        Step::read(
            "Query 2: authors sharing a conference across editions",
            authors_in_same_conference_editions(MIN_EDITIONS, limit),
        ),
        Step::read("Query 3: journal impact factor", journal_impact_factor(limit)),
        Step::read("Query 4: author h-index", author_h_index(limit)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use scholargraph_core::{AccessMode, Param};

    #[test]
    fn test_catalogue_is_read_only() {
        let steps = catalogue(DEFAULT_LIMIT);
        assert_eq!(steps.len(), 4);
        assert!(steps.iter().all(|s| s.mode == AccessMode::Read));
    }

    #[test]
    fn test_every_placeholder_is_bound() {
        for step in catalogue(10) {
            for (name, _) in step.query.params() {
                assert!(step.query.text().contains(&format!("${name}")));
            }
            if step.query.text().contains("$limit") {
                assert_eq!(step.query.params().get("limit"), Some(&Param::Int(10)));
            }
        }
    }

    #[test]
    fn test_min_editions_is_bound() {
        let q = authors_in_same_conference_editions(4, 5);
        assert_eq!(q.params().get("min_editions"), Some(&Param::Int(4)));
    }
}
