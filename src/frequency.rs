use std::collections::HashMap;

use serde::Serialize;

use crate::sheet::Sheet;

pub const EMPTY_LABEL: &str = "<empty>";

/// Value counts for one column, most frequent first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Distribution {
    pub column: String,
    pub total: usize,
    pub entries: Vec<ValueCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

impl Distribution {
    pub fn count_of(&self, value: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|entry| entry.value == value)
            .map(|entry| entry.count)
    }

    pub fn distinct(&self) -> usize {
        self.entries.len()
    }

    /// Table rows of `column, value, count, percent`, truncated to `top`
    /// entries when `top > 0`.
    pub fn render_rows(&self, top: usize) -> Vec<Vec<String>> {
        if self.total == 0 {
            return Vec::new();
        }
        let limit = if top > 0 { top } else { self.entries.len() };
        self.entries
            .iter()
            .take(limit)
            .map(|entry| {
                let percent = (entry.count as f64 / self.total as f64) * 100.0;
                let value = if entry.value.is_empty() {
                    EMPTY_LABEL.to_string()
                } else {
                    entry.value.clone()
                };
                vec![
                    self.column.clone(),
                    value,
                    entry.count.to_string(),
                    format!("{percent:.2}%"),
                ]
            })
            .collect()
    }
}

/// Counts distinct values for each named column present in `sheet`.
/// Columns the sheet does not have are skipped.
pub fn analyze<S: AsRef<str>>(sheet: &Sheet, columns: &[S]) -> Vec<Distribution> {
    columns
        .iter()
        .filter_map(|name| {
            let index = sheet.column_index(name.as_ref())?;
            let mut accumulator = FrequencyAccumulator::default();
            for row in sheet.rows() {
                accumulator.ingest(&row[index]);
            }
            Some(accumulator.finish(name.as_ref()))
        })
        .collect()
}

/// Tracks counts in first-seen order so ties keep their original ordering.
#[derive(Default)]
struct FrequencyAccumulator {
    positions: HashMap<String, usize>,
    counts: Vec<(String, usize)>,
    total: usize,
}

impl FrequencyAccumulator {
    fn ingest(&mut self, value: &str) {
        self.total += 1;
        if let Some(&slot) = self.positions.get(value) {
            self.counts[slot].1 += 1;
        } else {
            self.positions.insert(value.to_string(), self.counts.len());
            self.counts.push((value.to_string(), 1));
        }
    }

    fn finish(mut self, column: &str) -> Distribution {
        // Stable sort keeps first-seen order among equal counts.
        self.counts.sort_by(|a, b| b.1.cmp(&a.1));
        Distribution {
            column: column.to_string(),
            total: self.total,
            entries: self
                .counts
                .into_iter()
                .map(|(value, count)| ValueCount { value, count })
                .collect(),
        }
    }
}
