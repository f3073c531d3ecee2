//! Graph evolution command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use scholargraph_core::LoadConfig;
use scholargraph_graph::queries::evolve;
use scholargraph_graph::{execute_all, with_session, GraphSession};

use crate::output;

#[derive(Args)]
pub struct EvolveArgs {
    /// Authors CSV in the Neo4j import directory (name, institution, department)
    #[arg(long)]
    pub authors_csv: Option<String>,

    /// Reviews CSV in the Neo4j import directory (START_ID, END_ID, comment, acceptanceProbability)
    #[arg(long)]
    pub reviews_csv: Option<String>,

    /// Summed acceptance probability above which a paper is accepted
    #[arg(long, default_value_t = evolve::ACCEPTANCE_THRESHOLD)]
    pub threshold: f64,
}

impl EvolveArgs {
    fn load_config(&self, mut load: LoadConfig) -> LoadConfig {
        if let Some(authors) = &self.authors_csv {
            load.authors_csv = authors.clone();
        }
        if let Some(reviews) = &self.reviews_csv {
            load.reviews_csv = reviews.clone();
        }
        load
    }
}

pub async fn execute<S: GraphSession>(args: EvolveArgs, load: LoadConfig, session: S) -> Result<()> {
    let load = args.load_config(load);
    let steps = evolve::evolution(&load, args.threshold);

    with_session(session, move |s| {
        Box::pin(async move {
            println!(
                "{}",
                "Creating and loading the evolved nodes and relations into the database...".bold()
            );
            let outcomes = execute_all(s, &steps).await?;

            if let Some((records, summary)) = outcomes.last() {
                output::print_query_results(records, summary)?;
            }
            println!("{}", "Creation and loading for evolved nodes done.".green());
            Ok::<_, anyhow::Error>(())
        })
    })
    .await
}
