//! Terminal output formatting.

use colored::Colorize;
use scholargraph_core::{IndexDescriptor, IndexOutcome, IndexReport, IndexState, Record, Summary};
use scholargraph_graph::Reporter;

/// Print a section banner, e.g. `Query Result 1.........`.
pub fn print_section(title: &str) {
    println!("{}", format!("{title}..........").cyan().bold());
}

/// Report one result set on stdout with a bold header.
pub fn print_query_results(records: &[Record], summary: &Summary) -> anyhow::Result<()> {
    let mut reporter = Reporter::stdout().with_header_style(|h| h.bold().to_string());
    reporter.report(records, summary)?;
    Ok(())
}

fn outcome_label(outcome: IndexOutcome) -> colored::ColoredString {
    match outcome {
        IndexOutcome::Created => "created".green(),
        IndexOutcome::Dropped => "dropped".yellow(),
        IndexOutcome::AlreadyPresent => "already present".dimmed(),
        IndexOutcome::AlreadyAbsent => "already absent".dimmed(),
    }
}

/// Print the per-index outcomes of a bootstrap call.
pub fn print_index_report(report: &IndexReport) {
    println!("{:<18} {:<12} {:<10} {}", "Index", "Label", "Property", "Outcome");
    println!("{}", "─".repeat(58));

    for (descriptor, outcome) in &report.entries {
        println!(
            "{:<18} {:<12} {:<10} {}",
            descriptor.name,
            descriptor.label,
            descriptor.property,
            outcome_label(*outcome)
        );
    }

    println!();
    println!(
        "{} changed, {} unchanged",
        report.changed().to_string().bold(),
        report.unchanged()
    );
}

/// Print the present/absent state of each index.
pub fn print_index_states(states: &[(IndexDescriptor, IndexState)]) {
    println!("{}", "Lookup Indexes".bold());
    println!("{}", "─".repeat(40));

    for (descriptor, state) in states {
        let (indicator, label) = match state {
            IndexState::Present => ("✓".green(), "present".green()),
            IndexState::Absent => ("✗".red(), "absent".red()),
        };
        println!(
            "  {} {:<18} ({}.{}) {}",
            indicator, descriptor.name, descriptor.label, descriptor.property, label
        );
    }

    println!("{}", "─".repeat(40));
}
