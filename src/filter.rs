use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::sheet::Sheet;

/// One `column == value` test. Comparison is exact: case-sensitive and
/// without trimming either side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clause {
    pub column: String,
    pub value: String,
}

impl Clause {
    pub fn new(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }

    /// Parses `column=value`. Whitespace around both sides is dropped; quote
    /// the value (`'...'` or `"..."`) to keep leading or trailing spaces.
    pub fn parse(expression: &str) -> Result<Self> {
        let Some((left, right)) = expression.split_once('=') else {
            return Err(anyhow!(
                "Failed to parse condition '{expression}' (expected column=value)"
            ));
        };
        let column = left.trim();
        if column.is_empty() {
            return Err(anyhow!("Condition '{expression}' has an empty column name"));
        }
        Ok(Self::new(column, unquote(right.trim())))
    }
}

fn unquote(value: &str) -> &str {
    if value.len() >= 2 {
        let bytes = value.as_bytes();
        if (bytes[0] == b'"' && bytes[value.len() - 1] == b'"')
            || (bytes[0] == b'\'' && bytes[value.len() - 1] == b'\'')
        {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Conjunction of equality clauses. An empty predicate matches every row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Predicate {
    clauses: Vec<Clause>,
}

impl Predicate {
    pub fn new(clauses: Vec<Clause>) -> Self {
        Self { clauses }
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Resolves clause columns against the sheet header. `None` when any
    /// clause names a column the sheet lacks.
    fn bind(&self, sheet: &Sheet) -> Option<Vec<(usize, &str)>> {
        self.clauses
            .iter()
            .map(|clause| {
                sheet
                    .column_index(&clause.column)
                    .map(|idx| (idx, clause.value.as_str()))
            })
            .collect()
    }
}

/// Rows of `sheet` satisfying every clause, in original order, as a new sheet
/// with the same columns. The source sheet is left as is.
pub fn filter_sheet(sheet: &Sheet, predicate: &Predicate) -> Sheet {
    let Some(bound) = predicate.bind(sheet) else {
        return sheet.with_rows(Vec::new());
    };
    let rows = sheet
        .rows()
        .iter()
        .filter(|row| bound.iter().all(|(idx, expected)| row[*idx] == *expected))
        .cloned()
        .collect();
    sheet.with_rows(rows)
}
