//! Result reporting.
//!
//! Purely a formatting boundary: one header line per result set, then each
//! record as an indented mapping followed by a blank line.

use std::io::Write;

use scholargraph_core::{GraphResult, Record, Summary};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

type HeaderStyle = Box<dyn Fn(&str) -> String>;

pub struct Reporter<W: Write> {
    out: W,
    header_style: Option<HeaderStyle>,
}

impl Reporter<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            header_style: None,
        }
    }

    /// Decorate the header line, e.g. with terminal colors.
    pub fn with_header_style(mut self, style: impl Fn(&str) -> String + 'static) -> Self {
        self.header_style = Some(Box::new(style));
        self
    }

    /// Write the header for `summary` and every record in `records`.
    pub fn report(&mut self, records: &[Record], summary: &Summary) -> GraphResult<()> {
        let header = header_line(records.len(), summary);
        match &self.header_style {
            Some(style) => writeln!(self.out, "{}", style(&header))?,
            None => writeln!(self.out, "{header}")?,
        }

        for record in records {
            writeln!(self.out, "{}", render_record(record)?)?;
            writeln!(self.out)?;
        }
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// The single header line for a result set of `count` records.
pub fn header_line(count: usize, summary: &Summary) -> String {
    let query = summary.query.split_whitespace().collect::<Vec<_>>().join(" ");
    format!(
        "The query `{}` returned {} records in {} ms.",
        query,
        count,
        summary.elapsed_ms()
    )
}

/// A record as a 4-space-indented mapping with keys in sorted order.
pub fn render_record(record: &Record) -> GraphResult<String> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    record.to_json().serialize(&mut ser)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scholargraph_core::{AccessMode, Value};
    use std::collections::BTreeMap;
    use std::time::Duration;

    fn summary(query: &str, ms: u64) -> Summary {
        Summary {
            query: query.to_string(),
            mode: AccessMode::Read,
            record_count: 0,
            elapsed: Duration::from_millis(ms),
        }
    }

    fn run(records: &[Record], summary: &Summary) -> String {
        let mut reporter = Reporter::new(Vec::new());
        reporter.report(records, summary).unwrap();
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn test_header_counts_records_passed_in() {
        let records: Vec<Record> = (0..5)
            .map(|i| Record::new().with("hIndex", i as i64))
            .collect();
        let output = run(&records, &summary("MATCH (a:Author) RETURN a", 12));

        let header = output.lines().next().unwrap();
        assert_eq!(
            header,
            "The query `MATCH (a:Author) RETURN a` returned 5 records in 12 ms."
        );
        assert_eq!(output.lines().filter(|l| l.is_empty()).count(), 5);
        assert_eq!(output.matches("\"hIndex\"").count(), 5);
    }

    #[test]
    fn test_multiline_query_stays_on_one_header_line() {
        let output = run(&[], &summary("MATCH (p:Paper)\n    RETURN p.title\n    LIMIT 5;", 3));

        assert_eq!(output.lines().count(), 1);
        assert!(output.contains("`MATCH (p:Paper) RETURN p.title LIMIT 5;` returned 0 records in 3 ms."));
    }

    #[test]
    fn test_heterogeneous_records_render() {
        let mut properties = BTreeMap::new();
        properties.insert("keyword".to_string(), Value::from("Indexing"));
        let records = vec![
            Record::new().with("conference", "VLDB").with("topCitedPaper1", "A"),
            Record::new().with(
                "keyword",
                Value::Node {
                    id: 3,
                    labels: vec!["Keyword".to_string()],
                    properties,
                },
            ),
        ];

        let output = run(&records, &summary("RETURN 1", 0));

        assert!(output.contains("    \"conference\": \"VLDB\""));
        assert!(output.contains("        \"keyword\": \"Indexing\""));
    }

    #[test]
    fn test_header_style_applies_to_header_only() {
        let mut reporter = Reporter::new(Vec::new()).with_header_style(|h| format!(">> {h}"));
        reporter
            .report(&[Record::new().with("x", 1i64)], &summary("RETURN 1 AS x", 1))
            .unwrap();
        let output = String::from_utf8(reporter.into_inner()).unwrap();

        assert!(output.starts_with(">> The query"));
        assert_eq!(output.matches(">>").count(), 1);
    }
}
