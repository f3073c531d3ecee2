//! Lookup index descriptors for the bibliographic graph.

use serde::Serialize;

/// A declared lookup index over one label/property pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct IndexDescriptor {
    pub label: &'static str,
    pub property: &'static str,
    pub name: &'static str,
}

impl IndexDescriptor {
    pub const fn new(label: &'static str, property: &'static str, name: &'static str) -> Self {
        Self {
            label,
            property,
            name,
        }
    }

    /// Cypher that creates the index unless one of the same name exists.
    pub fn create_statement(&self) -> String {
        format!(
            "CREATE INDEX {} IF NOT EXISTS FOR (n:{}) ON (n.{})",
            self.name, self.label, self.property
        )
    }

    /// Cypher that drops the index if it exists.
    pub fn drop_statement(&self) -> String {
        format!("DROP INDEX {} IF EXISTS", self.name)
    }
}

/// Entity label → lookup key for every entity the analytic queries match on.
pub const PAPER_INDEXES: &[IndexDescriptor] = &[
    IndexDescriptor::new("Paper", "ID", "idx_paper"),
    IndexDescriptor::new("Keyword", "keyword", "idx_keyword"),
    IndexDescriptor::new("Author", "ID", "idx_author"),
    IndexDescriptor::new("Conference", "ID", "idx_conference"),
    IndexDescriptor::new("Journal", "ID", "idx_journal"),
    IndexDescriptor::new("Proceeding", "ID", "idx_proceeding"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexState {
    Absent,
    Present,
}

/// What a bootstrap statement did to one descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexOutcome {
    Created,
    AlreadyPresent,
    Dropped,
    AlreadyAbsent,
}

impl IndexOutcome {
    /// True when the statement was an idempotent no-op.
    pub fn is_noop(&self) -> bool {
        matches!(self, IndexOutcome::AlreadyPresent | IndexOutcome::AlreadyAbsent)
    }
}

/// Per-descriptor outcomes of one bootstrap call.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IndexReport {
    pub entries: Vec<(IndexDescriptor, IndexOutcome)>,
}

impl IndexReport {
    pub fn push(&mut self, descriptor: IndexDescriptor, outcome: IndexOutcome) {
        self.entries.push((descriptor, outcome));
    }

    /// Number of descriptors whose state actually changed.
    pub fn changed(&self) -> usize {
        self.entries.iter().filter(|(_, o)| !o.is_noop()).count()
    }

    pub fn unchanged(&self) -> usize {
        self.entries.len() - self.changed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_statements_are_guarded() {
        let paper = PAPER_INDEXES[0];
        assert_eq!(
            paper.create_statement(),
            "CREATE INDEX idx_paper IF NOT EXISTS FOR (n:Paper) ON (n.ID)"
        );
        assert_eq!(paper.drop_statement(), "DROP INDEX idx_paper IF EXISTS");
    }

    #[test]
    fn test_index_names_are_unique() {
        let names: HashSet<_> = PAPER_INDEXES.iter().map(|d| d.name).collect();
        assert_eq!(names.len(), 6);
    }

    #[test]
    fn test_report_counts() {
        let mut report = IndexReport::default();
        report.push(PAPER_INDEXES[0], IndexOutcome::Created);
        report.push(PAPER_INDEXES[1], IndexOutcome::AlreadyPresent);
        assert_eq!(report.changed(), 1);
        assert_eq!(report.unchanged(), 1);
    }
}
