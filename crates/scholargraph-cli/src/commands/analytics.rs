//! Analytic query commands.

use anyhow::Result;
use clap::Args;
use scholargraph_graph::queries::analytics;
use scholargraph_graph::{execute as run_query, with_session, GraphSession};
use tracing::info;

use crate::output;

#[derive(Args)]
pub struct AnalyticsArgs {
    /// Maximum rows per query
    #[arg(long, default_value_t = analytics::DEFAULT_LIMIT)]
    pub limit: i64,

    /// Run only this query (1-4)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=4))]
    pub only: Option<u8>,
}

pub async fn execute<S: GraphSession>(args: AnalyticsArgs, session: S) -> Result<()> {
    with_session(session, move |s| {
        Box::pin(async move {
            let steps = analytics::catalogue(args.limit);
            for (i, step) in steps.iter().enumerate() {
                let number = i + 1;
                if args.only.is_some_and(|only| usize::from(only) != number) {
                    continue;
                }

                info!("{}", step.label);
                let (records, summary) = run_query(s, &step.query, step.mode).await?;
                output::print_section(&format!("Query Result {number}"));
                output::print_query_results(&records, &summary)?;
            }
            Ok::<_, anyhow::Error>(())
        })
    })
    .await
}
