//! Ad-hoc Cypher query command.

use anyhow::{bail, Result};
use clap::Args;
use scholargraph_core::{AccessMode, CypherQuery, Param};
use scholargraph_graph::{execute as run_query, with_session, GraphSession};

use crate::output;

#[derive(Args)]
pub struct QueryArgs {
    /// Cypher query string
    pub cypher: String,

    /// Run in a write transaction (default: read)
    #[arg(long)]
    pub write: bool,

    /// Bind a parameter, e.g. `--param limit=5` (repeatable). Quote the
    /// value to force a string: `--param id="'007'"`
    #[arg(long = "param", value_name = "KEY=VALUE")]
    pub params: Vec<String>,
}

impl QueryArgs {
    fn query(&self) -> Result<CypherQuery> {
        let mut query = CypherQuery::new(self.cypher.clone());
        for raw in &self.params {
            let Some((key, value)) = raw.split_once('=') else {
                bail!("Invalid parameter '{raw}', expected KEY=VALUE");
            };
            if key.trim().is_empty() {
                bail!("Invalid parameter '{raw}', empty key");
            }
            query = query.param(key.trim(), Param::parse_literal(value));
        }
        Ok(query)
    }

    fn mode(&self) -> AccessMode {
        if self.write {
            AccessMode::Write
        } else {
            AccessMode::Read
        }
    }
}

pub async fn execute<S: GraphSession>(args: QueryArgs, session: S) -> Result<()> {
    with_session(session, move |s| {
        Box::pin(async move {
            let query = args.query()?;
            let (records, summary) = run_query(s, &query, args.mode()).await?;
            output::print_query_results(&records, &summary)?;
            Ok::<_, anyhow::Error>(())
        })
    })
    .await
}
