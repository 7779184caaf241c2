//! Pipeline configuration.
//!
//! [`FilterConfig`] gathers every input the pipeline needs: source workbook
//! and sheet, output path, predicate clauses, and which columns are required
//! and analyzed. Defaults reproduce the stock `DTS` issue-tracker filter. A
//! YAML file may override any subset of fields:
//!
//! ```yaml
//! input: wenti.xlsx
//! sheet: DTS
//! output: filtered_data.xlsx
//! clauses:
//!   - column: 处理状态
//!     value: 定位分发
//!   - column: 领域责任人
//!     value: 闵赛
//! analyze_columns: [处理状态, 领域责任人]
//! ```

use std::{
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::filter::{Clause, Predicate};

pub const DEFAULT_INPUT: &str = "wenti.xlsx";
pub const DEFAULT_SHEET: &str = "DTS";
pub const DEFAULT_OUTPUT: &str = "filtered_data.xlsx";
pub const STATUS_COLUMN: &str = "处理状态";
pub const OWNER_COLUMN: &str = "领域责任人";
pub const STATUS_VALUE: &str = "定位分发";
pub const OWNER_VALUE: &str = "闵赛";
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterConfig {
    pub input: PathBuf,
    pub sheet: String,
    pub output: PathBuf,
    pub clauses: Vec<Clause>,
    /// Columns required in addition to those named by `clauses`.
    pub required_columns: Vec<String>,
    /// Columns to report distributions for; empty means the clause columns.
    pub analyze_columns: Vec<String>,
    pub preview_rows: usize,
    /// Maximum distinct values shown per distribution (0 = all).
    pub top: usize,
    /// Retry with a typed read when the strict text read fails, logging the
    /// fallback at debug level. When false only the strict read is tried.
    pub lenient: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            sheet: DEFAULT_SHEET.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            clauses: vec![
                Clause::new(STATUS_COLUMN, STATUS_VALUE),
                Clause::new(OWNER_COLUMN, OWNER_VALUE),
            ],
            required_columns: Vec::new(),
            analyze_columns: Vec::new(),
            preview_rows: DEFAULT_PREVIEW_ROWS,
            top: 0,
            lenient: true,
        }
    }
}

impl FilterConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let mut file = File::open(path).with_context(|| format!("Opening config file {path:?}"))?;
        let mut raw = String::new();
        file.read_to_string(&mut raw)
            .with_context(|| format!("Reading config file {path:?}"))?;
        Self::from_yaml(&raw).with_context(|| format!("Parsing config file {path:?}"))
    }

    pub fn from_yaml(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(raw)?)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn predicate(&self) -> Predicate {
        Predicate::new(self.clauses.clone())
    }

    /// Clause columns followed by any extra required columns, without repeats.
    pub fn required(&self) -> Vec<String> {
        let mut required: Vec<String> = Vec::new();
        let names = self
            .clauses
            .iter()
            .map(|clause| &clause.column)
            .chain(self.required_columns.iter());
        for name in names {
            if !required.contains(name) {
                required.push(name.clone());
            }
        }
        required
    }

    pub fn analyzed(&self) -> Vec<String> {
        if self.analyze_columns.is_empty() {
            self.clauses
                .iter()
                .map(|clause| clause.column.clone())
                .collect()
        } else {
            self.analyze_columns.clone()
        }
    }
}
