use serde::Serialize;

use crate::sheet::Sheet;

/// Result of checking a sheet for the columns a pipeline needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Validation {
    Ok,
    MissingColumns(MissingColumns),
}

impl Validation {
    pub fn is_ok(&self) -> bool {
        matches!(self, Validation::Ok)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingColumns {
    /// Absent names, each once, in the order they were required.
    pub missing: Vec<String>,
    /// Every column of the sheet, in sheet order.
    pub available: Vec<String>,
}

impl MissingColumns {
    /// Available columns paired with their 1-based position.
    pub fn numbered_available(&self) -> impl Iterator<Item = (usize, &str)> {
        self.available
            .iter()
            .enumerate()
            .map(|(idx, name)| (idx + 1, name.as_str()))
    }
}

pub fn validate_columns<S: AsRef<str>>(sheet: &Sheet, required: &[S]) -> Validation {
    let mut missing: Vec<String> = Vec::new();
    for name in required.iter().map(|name| name.as_ref()) {
        if !sheet.has_column(name) && !missing.iter().any(|m| m == name) {
            missing.push(name.to_string());
        }
    }
    if missing.is_empty() {
        Validation::Ok
    } else {
        Validation::MissingColumns(MissingColumns {
            missing,
            available: sheet.headers().to_vec(),
        })
    }
}
