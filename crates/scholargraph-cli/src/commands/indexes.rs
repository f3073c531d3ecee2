//! Lookup index commands.

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use scholargraph_core::PAPER_INDEXES;
use scholargraph_graph::{schema, with_session, GraphSession};

use crate::output;

#[derive(Subcommand)]
pub enum IndexCommands {
    /// Create the lookup indexes if they do not exist
    Create,

    /// Drop the lookup indexes if they exist
    Drop,

    /// Show which lookup indexes exist
    Status,
}

pub async fn execute<S: GraphSession>(cmd: IndexCommands, session: S) -> Result<()> {
    with_session(session, move |s| {
        Box::pin(async move {
            match cmd {
                IndexCommands::Create => {
                    println!("{}", "Creating lookup indexes...".bold());
                    let report = schema::ensure_indexes(s).await?;
                    output::print_index_report(&report);
                }
                IndexCommands::Drop => {
                    println!("{}", "Dropping lookup indexes...".bold());
                    let report = schema::drop_indexes(s).await?;
                    output::print_index_report(&report);
                }
                IndexCommands::Status => {
                    let states = schema::index_states(s, PAPER_INDEXES).await?;
                    output::print_index_states(&states);
                }
            }
            Ok::<_, anyhow::Error>(())
        })
    })
    .await
}
