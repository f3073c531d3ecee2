//! In-memory stand-in for a Neo4j session.
//!
//! Understands the index statements issued by the schema bootstrap
//! (`CREATE INDEX`, `DROP INDEX`, `SHOW INDEXES`); every other statement is
//! answered from scripted responses, or with zero records when nothing
//! matches.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use scholargraph_core::{AccessMode, CypherQuery, GraphError, GraphResult, Record};

use crate::session::GraphSession;

/// Observes how many times a session was closed, after it has been consumed.
#[derive(Debug, Clone, Default)]
pub struct CloseCounter(Arc<AtomicUsize>);

impl CloseCounter {
    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// Every statement submitted, in order, with its transaction mode.
#[derive(Debug, Clone, Default)]
pub struct QueryLog(Arc<Mutex<Vec<(String, AccessMode)>>>);

impl QueryLog {
    pub fn entries(&self) -> Vec<(String, AccessMode)> {
        self.0.lock().map(|log| log.clone()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.0.lock().map(|log| log.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(&self, text: &str, mode: AccessMode) {
        if let Ok(mut log) = self.0.lock() {
            log.push((text.to_string(), mode));
        }
    }
}

enum Scripted {
    Records(Vec<Record>),
    Failure(String),
}

#[derive(Default)]
pub struct MemorySession {
    indexes: BTreeSet<String>,
    scripts: Vec<(String, Scripted)>,
    close_failure: Option<String>,
    closes: CloseCounter,
    log: QueryLog,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer any statement containing `fragment` with `records`.
    pub fn respond_to(mut self, fragment: &str, records: Vec<Record>) -> Self {
        self.scripts
            .push((fragment.to_string(), Scripted::Records(records)));
        self
    }

    /// Fail any statement containing `fragment` with a query error.
    pub fn fail_on(mut self, fragment: &str, message: &str) -> Self {
        self.scripts
            .push((fragment.to_string(), Scripted::Failure(message.to_string())));
        self
    }

    /// Make `close` report a connection error.
    pub fn fail_close(mut self, message: &str) -> Self {
        self.close_failure = Some(message.to_string());
        self
    }

    pub fn close_counter(&self) -> CloseCounter {
        self.closes.clone()
    }

    pub fn query_log(&self) -> QueryLog {
        self.log.clone()
    }

    /// Names of the indexes currently present.
    pub fn index_names(&self) -> Vec<String> {
        self.indexes.iter().cloned().collect()
    }

    fn create_index(&mut self, text: &str) -> GraphResult<Vec<Record>> {
        let name = statement_word(text, 2)?;
        if !self.indexes.insert(name.clone()) && !text.contains("IF NOT EXISTS") {
            return Err(GraphError::query(
                text,
                format!("An equivalent index already exists, '{name}'"),
            ));
        }
        Ok(Vec::new())
    }

    fn drop_index(&mut self, text: &str) -> GraphResult<Vec<Record>> {
        let name = statement_word(text, 2)?;
        if !self.indexes.remove(&name) && !text.contains("IF EXISTS") {
            return Err(GraphError::query(
                text,
                format!("There is no such index '{name}'"),
            ));
        }
        Ok(Vec::new())
    }

    fn show_indexes(&self) -> Vec<Record> {
        self.indexes
            .iter()
            .map(|name| Record::new().with("name", name.as_str()))
            .collect()
    }
}

fn statement_word(text: &str, position: usize) -> GraphResult<String> {
    text.split_whitespace()
        .nth(position)
        .map(str::to_string)
        .ok_or_else(|| GraphError::query(text, "Incomplete index statement"))
}

#[async_trait]
impl GraphSession for MemorySession {
    async fn run(&mut self, query: &CypherQuery, mode: AccessMode) -> GraphResult<Vec<Record>> {
        let text = query.one_line();
        self.log.push(&text, mode);

        if let Some((_, scripted)) = self
            .scripts
            .iter()
            .find(|(fragment, _)| text.contains(fragment.as_str()))
        {
            return match scripted {
                Scripted::Records(records) => Ok(records.clone()),
                Scripted::Failure(message) => Err(GraphError::query(query.text(), message.as_str())),
            };
        }

        if text.starts_with("CREATE INDEX") {
            self.create_index(&text)
        } else if text.starts_with("DROP INDEX") {
            self.drop_index(&text)
        } else if text.starts_with("SHOW INDEXES") {
            Ok(self.show_indexes())
        } else {
            Ok(Vec::new())
        }
    }

    async fn close(self) -> GraphResult<()> {
        self.closes.0.fetch_add(1, Ordering::SeqCst);
        match self.close_failure {
            Some(message) => Err(GraphError::connection(message)),
            None => Ok(()),
        }
    }
}
