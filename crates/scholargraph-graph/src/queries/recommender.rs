//! Reviewer recommendation for a research community.
//!
//! Tags keywords with a community, finds the venues dominated by that
//! community, ranks their papers with PageRank and picks the authors of the
//! top-ranked papers as potential reviewers.

use scholargraph_core::CypherQuery;

use crate::pipeline::Step;

pub const COMMUNITY: &str = "Databases";

pub const COMMUNITY_KEYWORDS: &[&str] = &[
    "Data Management",
    "Indexing",
    "Data Modeling",
    "Big Data",
    "Data Processing",
    "Data Storage",
    "Data Querying",
];

/// Share of a venue's papers that must belong to the community.
pub const VENUE_THRESHOLD: f64 = 0.9;

pub const RANK_GRAPH: &str = "graph1_papers_belongingTo_databases_community";
pub const PAGERANK_MAX_ITERATIONS: i64 = 20;
pub const PAGERANK_DAMPING: f64 = 0.85;
pub const TOP_PAPERS: i64 = 100;
pub const MIN_GURU_PAPERS: i64 = 2;
pub const DEFAULT_LIMIT: i64 = 5;

/// Tunables for one recommender run.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommenderParams {
    pub community: String,
    pub keywords: Vec<String>,
    pub threshold: f64,
    pub top_papers: i64,
    pub min_papers: i64,
    pub limit: i64,
}

impl Default for RecommenderParams {
    fn default() -> Self {
        Self {
            community: COMMUNITY.to_string(),
            keywords: COMMUNITY_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            threshold: VENUE_THRESHOLD,
            top_papers: TOP_PAPERS,
            min_papers: MIN_GURU_PAPERS,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Papers at conferences/journals where the community share reaches
/// `$threshold`. Shared prefix of the ranking queries.
const COMMUNITY_VENUE_PAPERS: &str =
    "MATCH (rc:ResearchCommunity {name: $community})<-[:belongs_to]-(k:Keyword)<-[:has*1..]-(cp:Paper)-[:published_in|presented_in]->(x)
     WHERE x:Journal OR x:Conference
     WITH cp, count(DISTINCT cp) AS numberOfCommunityPapers
     MATCH (p:Paper)-[:published_in|presented_in]->(x)
     WHERE x:Journal OR x:Conference
     WITH p, cp, x, numberOfCommunityPapers, count(DISTINCT p) AS numberOfPapers
     WHERE toFloat(numberOfCommunityPapers) / numberOfPapers >= $threshold";

/// Replace any existing community nodes with a single named one.
pub fn define_research_community(community: &str) -> Vec<Step> {
    vec![
        Step::write(
            "Removing existing research communities",
            CypherQuery::new("MATCH (n:ResearchCommunity) DETACH DELETE n"),
        ),
        Step::write(
            "Creating the research community",
            CypherQuery::new("MERGE (rc:ResearchCommunity {name: $community})")
                .param("community", community),
        ),
    ]
}

/// Attach the community keywords to the community node.
pub fn link_keywords_to_community(params: &RecommenderParams) -> CypherQuery {
    CypherQuery::new(
        "MATCH (k:Keyword)
         WHERE k.name IN $keywords
         WITH k
         MATCH (rc:ResearchCommunity {name: $community})
         MERGE (k)-[r1:belongs_to]->(rc)
         RETURN k AS keyword,
                r1 AS belongs_to,
                rc AS researchCommunity
         LIMIT $limit",
    )
    .param("keywords", params.keywords.clone())
    .param("community", params.community.as_str())
    .param("limit", params.limit)
}

/// Papers from conferences or journals that belong to the community.
pub fn community_venue_papers(params: &RecommenderParams) -> CypherQuery {
    CypherQuery::new(format!(
        "{COMMUNITY_VENUE_PAPERS}
         RETURN p.title AS paperName,
                labels(x)[0] AS confJour,
                x.name AS nameOfConfJour
         LIMIT $limit"
    ))
    .param("community", params.community.as_str())
    .param("threshold", params.threshold)
    .param("limit", params.limit)
}

/// Project community papers and their citations, then write PageRank scores
/// to `pagerank`.
pub fn project_and_rank(params: &RecommenderParams, graph: &str) -> Vec<Step> {
    vec![
        Step::write(
            "Dropping the ranking graph from the catalog, only if it exists",
            super::algorithms::drop_projection(graph),
        ),
        Step::write(
            "Projecting community papers and citations",
            CypherQuery::new(format!(
                "CALL gds.graph.project.cypher(
                     $graph,
                     '{} RETURN id(p) AS id',
                     'MATCH (p1:Paper)-[:cites]->(p2:Paper) RETURN id(p1) AS source, id(p2) AS target',
                     {{validateRelationships: false, parameters: {{community: $community, threshold: $threshold}}}}
                 )
                 YIELD graphName, nodeCount, relationshipCount
                 RETURN graphName, nodeCount, relationshipCount",
                COMMUNITY_VENUE_PAPERS.replace('\'', "\\'")
            ))
            .param("graph", graph)
            .param("community", params.community.as_str())
            .param("threshold", params.threshold),
        ),
        Step::write(
            "Running PageRank for the projected graph",
            CypherQuery::new(
                "CALL gds.pageRank.write($graph, {
                     maxIterations: $max_iterations,
                     dampingFactor: $damping,
                     writeProperty: 'pagerank'
                 })
                 YIELD nodePropertiesWritten, ranIterations, didConverge
                 RETURN nodePropertiesWritten, ranIterations, didConverge",
            )
            .param("graph", graph)
            .param("max_iterations", PAGERANK_MAX_ITERATIONS)
            .param("damping", PAGERANK_DAMPING),
        ),
    ]
}

/// Top papers by PageRank for each community venue.
pub fn top_papers_by_pagerank(params: &RecommenderParams) -> CypherQuery {
    CypherQuery::new(format!(
        "{COMMUNITY_VENUE_PAPERS}
         WITH x, p
         ORDER BY p.pagerank DESC
         WITH x, collect(p) AS papers
         RETURN labels(x)[0] AS confJour,
                x.name AS nameOfConfJour,
                papers[0..$top] AS topPapers
         ORDER BY nameOfConfJour
         LIMIT $limit"
    ))
    .param("community", params.community.as_str())
    .param("threshold", params.threshold)
    .param("top", params.top_papers)
    .param("limit", params.limit)
}

/// Authors of at least `$min_papers` of the top-ranked papers.
pub fn community_gurus(params: &RecommenderParams) -> CypherQuery {
    CypherQuery::new(format!(
        "{COMMUNITY_VENUE_PAPERS}
         WITH x, p
         ORDER BY p.pagerank DESC
         WITH x, collect(DISTINCT p)[0..$top] AS topPapers
         UNWIND topPapers AS topPaper
         WITH collect(DISTINCT topPaper) AS topPapersList
         MATCH (a:Author)-[r3:writes]->(p:Paper)
         WHERE p IN topPapersList
         WITH a, count(r3) AS numberOfWrittenPapers
         WHERE numberOfWrittenPapers >= $min_papers
         RETURN a.name AS potentialReviewerName,
                a.email AS potentialReviewerEmail,
                numberOfWrittenPapers AS guru
         LIMIT $limit"
    ))
    .param("community", params.community.as_str())
    .param("threshold", params.threshold)
    .param("top", params.top_papers)
    .param("min_papers", params.min_papers)
    .param("limit", params.limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scholargraph_core::{AccessMode, Param};

    #[test]
    fn test_keywords_are_bound_not_inlined() {
        let q = link_keywords_to_community(&RecommenderParams::default());
        assert!(!q.text().contains("Indexing"));
        match q.params().get("keywords") {
            Some(Param::StringList(keywords)) => assert_eq!(keywords.len(), 7),
            other => panic!("unexpected keywords binding: {other:?}"),
        }
    }

    #[test]
    fn test_community_definition_is_write_only() {
        let steps = define_research_community(COMMUNITY);
        assert!(steps.iter().all(|s| s.mode == AccessMode::Write));
        assert!(steps[0].query.text().contains("DETACH DELETE"));
    }

    #[test]
    fn test_projection_escapes_embedded_query() {
        let steps = project_and_rank(&RecommenderParams::default(), RANK_GRAPH);
        let projection = steps[1].query.text();
        assert!(projection.contains("RETURN id(p) AS id"));
        assert!(projection.contains("parameters: {community: $community, threshold: $threshold}"));
    }

    #[test]
    fn test_pagerank_settings() {
        let steps = project_and_rank(&RecommenderParams::default(), RANK_GRAPH);
        let rank = &steps[2].query;
        assert_eq!(rank.params().get("max_iterations"), Some(&Param::Int(20)));
        assert_eq!(rank.params().get("damping"), Some(&Param::Float(0.85)));
    }

    #[test]
    fn test_ranking_queries_share_the_venue_filter() {
        let params = RecommenderParams::default();
        for q in [
            community_venue_papers(&params),
            top_papers_by_pagerank(&params),
            community_gurus(&params),
        ] {
            assert!(q.text().contains(">= $threshold"));
            assert_eq!(q.params().get("threshold"), Some(&Param::Float(0.9)));
        }
    }
}
