//! Workbook loading with an ordered list of read strategies.
//!
//! Every cell ends up as text. The strict [`ReadStrategy::AllText`] pass only
//! accepts cells whose text is unambiguous; if it fails for any reason the
//! [`ReadStrategy::Typed`] pass re-reads the sheet and accepts calamine's
//! native type inference. The last failure is reported as
//! [`PipelineError::SheetRead`].

use std::path::Path;

use anyhow::{Result, anyhow, bail};
use calamine::{Data, ExcelDateTime, Range, Reader, open_workbook_auto};
use chrono::{NaiveTime, TimeDelta};
use log::{debug, info, warn};

use crate::{error::PipelineError, sheet::Sheet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadStrategy {
    /// Cells must already be text-like; dates and error cells are refused.
    AllText,
    /// Accepts dates and error cells and renders them as text.
    Typed,
}

impl ReadStrategy {
    pub fn name(self) -> &'static str {
        match self {
            ReadStrategy::AllText => "all-text",
            ReadStrategy::Typed => "typed",
        }
    }

    fn read(self, path: &Path, sheet_name: &str) -> Result<Sheet> {
        // The workbook handle lives only for this attempt.
        let range = {
            let mut workbook = open_workbook_auto(path)
                .map_err(|err| anyhow!("cannot open workbook: {err}"))?;
            let names = workbook.sheet_names();
            if !names.iter().any(|name| name == sheet_name) {
                bail!(
                    "worksheet '{sheet_name}' not found (available: {})",
                    names.join(", ")
                );
            }
            workbook
                .worksheet_range(sheet_name)
                .map_err(|err| anyhow!("cannot read worksheet: {err}"))?
        };
        self.materialize(sheet_name, &range)
    }

    /// The range starts at the first used cell; columns to its left are
    /// kept as empty columns so positions match the worksheet.
    fn materialize(self, sheet_name: &str, range: &Range<Data>) -> Result<Sheet> {
        let lead = range.start().map_or(0, |(_, col)| col as usize);
        let mut rows = range.rows();
        let Some(header_row) = rows.next() else {
            return Ok(Sheet::new(sheet_name, Vec::new(), Vec::new()));
        };
        let headers = self.row_text(header_row, 0, lead)?;

        let mut body = Vec::new();
        for (offset, row) in rows.enumerate() {
            let values = self.row_text(row, offset + 1, lead)?;
            if values.iter().all(|value| value.is_empty()) {
                continue;
            }
            body.push(values);
        }
        Ok(Sheet::new(sheet_name, headers, body))
    }

    fn row_text(self, cells: &[Data], row: usize, lead: usize) -> Result<Vec<String>> {
        let mut values = vec![String::new(); lead];
        for (offset, cell) in cells.iter().enumerate() {
            values.push(self.cell_text(cell, row, lead + offset)?);
        }
        Ok(values)
    }

    fn cell_text(self, cell: &Data, row: usize, col: usize) -> Result<String> {
        let text = match cell {
            Data::Empty => String::new(),
            Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
            Data::Int(i) => i.to_string(),
            Data::Float(f) => format_number(*f),
            Data::Bool(b) => String::from(if *b { "TRUE" } else { "FALSE" }),
            Data::DateTime(dt) => match self {
                ReadStrategy::AllText => bail!(
                    "cell at row {} column {} holds a date serial ({})",
                    row + 1,
                    col + 1,
                    dt.as_f64()
                ),
                ReadStrategy::Typed => format_excel_datetime(dt),
            },
            Data::Error(err) => match self {
                ReadStrategy::AllText => bail!(
                    "cell at row {} column {} holds an error value ({err})",
                    row + 1,
                    col + 1
                ),
                ReadStrategy::Typed => err.to_string(),
            },
            #[allow(unreachable_patterns)]
            other => other.to_string(),
        };
        Ok(text)
    }
}

#[derive(Debug, Clone)]
pub struct Loader {
    strategies: Vec<ReadStrategy>,
    lenient: bool,
}

impl Default for Loader {
    fn default() -> Self {
        Self {
            strategies: vec![ReadStrategy::AllText, ReadStrategy::Typed],
            lenient: true,
        }
    }
}

impl Loader {
    /// A loader that only tries the strict text pass.
    pub fn strict() -> Self {
        Self::with_strategies(vec![ReadStrategy::AllText]).lenient(false)
    }

    pub fn with_strategies(strategies: Vec<ReadStrategy>) -> Self {
        Self {
            strategies,
            ..Self::default()
        }
    }

    /// Lenient loaders log strategy fallbacks at debug level instead of warn.
    pub fn lenient(mut self, lenient: bool) -> Self {
        self.lenient = lenient;
        self
    }

    pub fn strategies(&self) -> &[ReadStrategy] {
        &self.strategies
    }

    pub fn load(&self, path: &Path, sheet_name: &str) -> Result<Sheet, PipelineError> {
        if !path.exists() {
            return Err(PipelineError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        info!("Reading sheet '{sheet_name}' from {path:?}");

        let mut last_error = anyhow!("no read strategies configured");
        for strategy in &self.strategies {
            match strategy.read(path, sheet_name) {
                Ok(sheet) => {
                    debug!(
                        "Loaded {} row(s) x {} column(s) using {} read",
                        sheet.row_count(),
                        sheet.column_count(),
                        strategy.name()
                    );
                    return Ok(sheet);
                }
                Err(err) => {
                    if self.lenient {
                        debug!("{} read of {path:?} failed: {err:#}", strategy.name());
                    } else {
                        warn!("{} read of {path:?} failed: {err:#}", strategy.name());
                    }
                    last_error = err;
                }
            }
        }
        Err(PipelineError::SheetRead {
            path: path.to_path_buf(),
            sheet: sheet_name.to_string(),
            message: format!("{last_error:#}"),
        })
    }
}

/// Loads `sheet_name` from `path` with the default strategy list.
pub fn load_sheet(path: &Path, sheet_name: &str) -> Result<Sheet, PipelineError> {
    Loader::default().load(path, sheet_name)
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

/// Renders a date cell as Excel displays it: calendar values as
/// `YYYY-MM-DD[ HH:MM:SS]` (1900 or 1904 date system), durations as
/// `[h]:mm:ss`.
fn format_excel_datetime(value: &ExcelDateTime) -> String {
    if value.is_duration() {
        return value
            .as_duration()
            .map_or_else(|| format_number(value.as_f64()), format_duration);
    }
    match value.as_datetime() {
        Some(moment) if moment.time() == NaiveTime::MIN => moment.format("%Y-%m-%d").to_string(),
        Some(moment) => moment.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => format_number(value.as_f64()),
    }
}

fn format_duration(duration: TimeDelta) -> String {
    let total = duration.num_seconds();
    let sign = if total < 0 { "-" } else { "" };
    let seconds = total.unsigned_abs();
    format!(
        "{sign}{}:{:02}:{:02}",
        seconds / 3600,
        seconds / 60 % 60,
        seconds % 60
    )
}
