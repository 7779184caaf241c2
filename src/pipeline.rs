//! End-to-end filter run: load, validate, analyze, filter, persist.
//!
//! A run moves through `Loaded → Validated → Filtered` and ends in one of the
//! [`Outcome`] variants. Missing columns stop the run before filtering but are
//! not an error; only I/O failures surface as [`PipelineError`].

use log::{info, warn};

use crate::{
    config::FilterConfig,
    error::PipelineError,
    filter::{Predicate, filter_sheet},
    frequency::{Distribution, analyze},
    loader::Loader,
    sheet::Sheet,
    validate::{MissingColumns, Validation, validate_columns},
    writer::{Persisted, persist},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    MissingColumns(MissingColumns),
    NoMatches,
    Written {
        path: std::path::PathBuf,
        rows: usize,
    },
}

/// Everything the console report needs from a finished run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub source_rows: usize,
    pub source_columns: usize,
    pub distributions: Vec<Distribution>,
    pub predicate: Predicate,
    /// Filter result; `None` when validation stopped the run.
    pub matches: Option<Sheet>,
    pub outcome: Outcome,
}

impl RunReport {
    pub fn match_count(&self) -> usize {
        self.matches.as_ref().map_or(0, Sheet::row_count)
    }
}

pub fn loader_for(config: &FilterConfig) -> Loader {
    if config.lenient {
        Loader::default()
    } else {
        Loader::strict()
    }
}

pub fn run(config: &FilterConfig) -> Result<RunReport, PipelineError> {
    let sheet = loader_for(config).load(&config.input, &config.sheet)?;
    info!(
        "Loaded {} row(s) x {} column(s) from sheet '{}'",
        sheet.row_count(),
        sheet.column_count(),
        sheet.name()
    );
    run_on_sheet(&sheet, config)
}

/// Runs every stage after loading against an in-memory sheet.
pub fn run_on_sheet(sheet: &Sheet, config: &FilterConfig) -> Result<RunReport, PipelineError> {
    let distributions = analyze(sheet, &config.analyzed());
    let predicate = config.predicate();
    let mut report = RunReport {
        source_rows: sheet.row_count(),
        source_columns: sheet.column_count(),
        distributions,
        predicate,
        matches: None,
        outcome: Outcome::NoMatches,
    };

    if let Validation::MissingColumns(missing) = validate_columns(sheet, &config.required()) {
        warn!("Missing required column(s): {}", missing.missing.join(", "));
        report.outcome = Outcome::MissingColumns(missing);
        return Ok(report);
    }

    let matches = filter_sheet(sheet, &report.predicate);
    info!("{} of {} row(s) matched", matches.row_count(), sheet.row_count());
    report.outcome = match persist(&matches, &config.output)? {
        Persisted::Written { path, rows } => Outcome::Written { path, rows },
        Persisted::NoMatches => Outcome::NoMatches,
    };
    report.matches = Some(matches);
    Ok(report)
}
