//! Reviewer recommendation command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use scholargraph_core::AccessMode;
use scholargraph_graph::queries::recommender::{self, RecommenderParams};
use scholargraph_graph::{execute as run_query, execute_all, with_session, GraphSession};

use crate::output;

#[derive(Args)]
pub struct RecommendArgs {
    /// Research community name
    #[arg(long, default_value = recommender::COMMUNITY)]
    pub community: String,

    /// Keywords that define the community (repeatable; default: the database keywords)
    #[arg(long = "keyword")]
    pub keywords: Vec<String>,

    /// Minimum share of a venue's papers that must belong to the community
    #[arg(long, default_value_t = recommender::VENUE_THRESHOLD)]
    pub threshold: f64,

    /// Top papers by PageRank kept per venue
    #[arg(long, default_value_t = recommender::TOP_PAPERS)]
    pub top: i64,

    /// Top papers an author must have written to count as a guru
    #[arg(long, default_value_t = recommender::MIN_GURU_PAPERS)]
    pub min_papers: i64,

    /// Maximum rows per report
    #[arg(long, default_value_t = recommender::DEFAULT_LIMIT)]
    pub limit: i64,
}

impl RecommendArgs {
    fn params(&self) -> RecommenderParams {
        let mut params = RecommenderParams {
            community: self.community.clone(),
            threshold: self.threshold,
            top_papers: self.top,
            min_papers: self.min_papers,
            limit: self.limit,
            ..Default::default()
        };
        if !self.keywords.is_empty() {
            params.keywords = self.keywords.clone();
        }
        params
    }
}

pub async fn execute<S: GraphSession>(args: RecommendArgs, session: S) -> Result<()> {
    let params = args.params();

    with_session(session, move |s| {
        Box::pin(async move {
            output::print_section("Part 1");
            println!("Creating research community node with name = {}", params.community.cyan());
            execute_all(s, &recommender::define_research_community(&params.community)).await?;
            println!("Creating relations from keywords to the research community");
            let (records, summary) = run_query(
                s,
                &recommender::link_keywords_to_community(&params),
                AccessMode::Write,
            )
            .await?;
            output::print_query_results(&records, &summary)?;

            output::print_section("Part 2");
            println!("Finding papers from conferences or journals that belong to the community");
            let (records, summary) =
                run_query(s, &recommender::community_venue_papers(&params), AccessMode::Read).await?;
            output::print_query_results(&records, &summary)?;

            output::print_section("Part 3");
            execute_all(s, &recommender::project_and_rank(&params, recommender::RANK_GRAPH)).await?;
            println!("Obtaining the results of PageRank");
            let (records, summary) =
                run_query(s, &recommender::top_papers_by_pagerank(&params), AccessMode::Read).await?;
            output::print_query_results(&records, &summary)?;

            output::print_section("Part 4");
            println!("Finding gurus of the top conferences and journals");
            let (records, summary) =
                run_query(s, &recommender::community_gurus(&params), AccessMode::Read).await?;
            output::print_query_results(&records, &summary)?;

            Ok::<_, anyhow::Error>(())
        })
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use scholargraph_core::Param;
    use scholargraph_graph::testing::MemorySession;

    fn args() -> RecommendArgs {
        RecommendArgs {
            community: "Databases".to_string(),
            keywords: vec![],
            threshold: 0.9,
            top: 100,
            min_papers: 2,
            limit: 5,
        }
    }

    #[test]
    fn test_default_keywords_apply_when_none_given() {
        let params = args().params();
        assert_eq!(params.keywords.len(), recommender::COMMUNITY_KEYWORDS.len());
    }

    #[test]
    fn test_explicit_keywords_replace_defaults() {
        let mut a = args();
        a.keywords = vec!["Graph Databases".to_string()];
        let q = recommender::link_keywords_to_community(&a.params());
        assert_eq!(
            q.params().get("keywords"),
            Some(&Param::StringList(vec!["Graph Databases".to_string()]))
        );
    }

    #[tokio::test]
    async fn test_runs_every_phase_in_order() {
        let session = MemorySession::new();
        let log = session.query_log();

        execute(args(), session).await.unwrap();

        let entries = log.entries();
        // 2 definition + 1 link + 1 venue + 3 ranking + 1 top papers + 1 gurus
        assert_eq!(entries.len(), 9);
        assert!(entries[0].0.contains("DETACH DELETE"));
        assert!(entries[6].0.contains("gds.pageRank.write"));
        assert!(entries[8].0.contains("potentialReviewerName"));
    }
}
