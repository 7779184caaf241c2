use std::fmt::Write as _;

use itertools::Itertools;

use crate::{
    frequency::Distribution,
    pipeline::{Outcome, RunReport},
    table,
    validate::MissingColumns,
};

pub const NO_MATCHES_MESSAGE: &str = "no matching data found";

const DISTRIBUTION_HEADERS: [&str; 4] = ["column", "value", "count", "percent"];

/// Human-readable summary of a pipeline run.
pub fn render_run(report: &RunReport, top: usize, preview_rows: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Total rows: {}", report.source_rows);
    let _ = writeln!(out, "Total columns: {}", report.source_columns);
    out.push('\n');
    out.push_str(&render_distributions(&report.distributions, top));

    let _ = writeln!(out, "\nFilter conditions:");
    for clause in report.predicate.clauses() {
        let _ = writeln!(out, "  - {} = '{}'", clause.column, clause.value);
    }
    out.push('\n');

    match &report.outcome {
        Outcome::MissingColumns(missing) => {
            out.push_str(&render_missing(missing));
            let _ = writeln!(out, "{NO_MATCHES_MESSAGE}");
        }
        Outcome::NoMatches => {
            let _ = writeln!(out, "Matched rows: 0");
            let _ = writeln!(out, "{NO_MATCHES_MESSAGE}");
        }
        Outcome::Written { path, rows } => {
            let _ = writeln!(out, "Matched rows: {rows}");
            if let Some(matches) = &report.matches
                && preview_rows > 0
            {
                let _ = writeln!(out, "\nPreview:");
                out.push_str(&table::render_sheet(matches, preview_rows));
            }
            let _ = writeln!(out, "\nResults saved to {}", path.display());
        }
    }
    out
}

pub fn render_distributions(distributions: &[Distribution], top: usize) -> String {
    if distributions.is_empty() {
        return "No analyzed columns present in sheet.\n".to_string();
    }
    let headers = DISTRIBUTION_HEADERS
        .iter()
        .map(|h| h.to_string())
        .collect::<Vec<_>>();
    let rows = distributions
        .iter()
        .flat_map(|distribution| distribution.render_rows(top))
        .collect::<Vec<_>>();
    table::render_table(&headers, &rows)
}

pub fn render_missing(missing: &MissingColumns) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Warning: missing column(s): {}",
        missing.missing.iter().join(", ")
    );
    let _ = writeln!(out, "Available columns:");
    for (position, name) in missing.numbered_available() {
        let _ = writeln!(out, "  {position}. {name}");
    }
    out
}
