//! In-memory sheet model.
//!
//! A [`Sheet`] is a rectangular table of text cells: one header row naming the
//! columns and any number of data rows, each exactly as wide as the header.
//! Every cell is a `String`; the loader is responsible for turning typed
//! spreadsheet cells into text before a `Sheet` is built.
//!
//! Column names are fixed once the sheet exists. Operations that derive new
//! data (filtering, frequency analysis) borrow the sheet and return owned
//! results, so the source is never mutated.

use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    name: String,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Sheet {
    /// Builds a sheet, normalising headers and squaring every row to the
    /// header width.
    pub fn new(name: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let headers = unique_headers(headers);
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self {
            name: name.into(),
            headers,
            rows,
        }
    }

    /// A sheet with the same name and columns as `self` holding `rows`.
    pub(crate) fn with_rows(&self, rows: Vec<Vec<String>>) -> Self {
        Self {
            name: self.name.clone(),
            headers: self.headers.clone(),
            rows,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Values of one column in row order, or `None` if the column is absent.
    pub fn column_values<'a>(
        &'a self,
        name: &str,
    ) -> Option<impl Iterator<Item = &'a str> + use<'a>> {
        let index = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| row[index].as_str()))
    }

    /// Looks up a single cell by row position and column name.
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let index = self.column_index(column)?;
        self.rows.get(row).map(|values| values[index].as_str())
    }
}

/// Blank headers become `Unnamed: N`; repeats get `.1`, `.2`, ... suffixes.
fn unique_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::with_capacity(headers.len());
    let mut result = Vec::with_capacity(headers.len());
    for (idx, header) in headers.into_iter().enumerate() {
        let base = if header.is_empty() {
            format!("Unnamed: {idx}")
        } else {
            header
        };
        let mut candidate = base.clone();
        let mut suffix = 1;
        while seen.contains(&candidate) {
            candidate = format!("{base}.{suffix}");
            suffix += 1;
        }
        seen.insert(candidate.clone());
        result.push(candidate);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn new_pads_and_truncates_rows_to_header_width() {
        let sheet = Sheet::new(
            "DTS",
            strings(&["a", "b", "c"]),
            vec![strings(&["1"]), strings(&["1", "2", "3", "4"])],
        );
        assert_eq!(sheet.rows()[0], strings(&["1", "", ""]));
        assert_eq!(sheet.rows()[1], strings(&["1", "2", "3"]));
    }

    #[test]
    fn duplicate_and_blank_headers_are_made_unique() {
        let sheet = Sheet::new("DTS", strings(&["id", "", "id", "id"]), Vec::new());
        assert_eq!(sheet.headers(), strings(&["id", "Unnamed: 1", "id.1", "id.2"]));
    }

    #[test]
    fn cell_and_column_values_resolve_by_name() {
        let sheet = Sheet::new(
            "DTS",
            strings(&["处理状态", "领域责任人"]),
            vec![strings(&["定位分发", "闵赛"]), strings(&["已解决", "张三"])],
        );
        assert_eq!(sheet.cell(1, "领域责任人"), Some("张三"));
        assert_eq!(sheet.cell(2, "领域责任人"), None);
        let statuses: Vec<&str> = sheet.column_values("处理状态").unwrap().collect();
        assert_eq!(statuses, vec!["定位分发", "已解决"]);
        assert!(sheet.column_values("描述").is_none());
    }
}
