//! Plain-text tables for console reports.
//!
//! Cells are measured in terminal columns: CJK characters take two, so
//! sheets mixing Chinese headers with ASCII values stay aligned.

use std::borrow::Cow;

use itertools::Itertools;

use crate::sheet::Sheet;

const COLUMN_GAP: &str = "  ";
const MIN_RULE_WIDTH: usize = 3;

pub fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let widths = column_widths(headers, rows);
    let rule_widths = widths
        .iter()
        .map(|width| (*width).max(MIN_RULE_WIDTH))
        .collect::<Vec<_>>();
    let rule = rule_widths
        .iter()
        .map(|width| "-".repeat(*width))
        .collect::<Vec<_>>();

    let mut output = String::new();
    push_line(&mut output, headers, &widths);
    push_line(&mut output, &rule, &rule_widths);
    for row in rows {
        push_line(&mut output, row, &widths);
    }
    output
}

pub fn print_table(headers: &[String], rows: &[Vec<String>]) {
    print!("{}", render_table(headers, rows));
}

/// Renders the first `limit` rows of `sheet`, or every row when `limit` is 0.
pub fn render_sheet(sheet: &Sheet, limit: usize) -> String {
    let rows = if limit > 0 && sheet.row_count() > limit {
        &sheet.rows()[..limit]
    } else {
        sheet.rows()
    };
    render_table(sheet.headers(), rows)
}

fn column_widths(headers: &[String], rows: &[Vec<String>]) -> Vec<usize> {
    (0..headers.len())
        .map(|idx| {
            rows.iter()
                .filter_map(|row| row.get(idx))
                .chain(std::iter::once(&headers[idx]))
                .map(|cell| display_width(&flatten(cell)))
                .max()
                .unwrap_or(0)
                .max(1)
        })
        .collect()
}

/// Appends one row, each cell padded to its column width; cells beyond the
/// header width are dropped and trailing padding is trimmed.
fn push_line(output: &mut String, cells: &[String], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let text = flatten(cell);
            let padding = width.saturating_sub(display_width(&text));
            format!("{text}{}", " ".repeat(padding))
        })
        .join(COLUMN_GAP);
    output.push_str(line.trim_end_matches(' '));
    output.push('\n');
}

fn display_width(value: &str) -> usize {
    value.chars().map(|ch| if is_wide(ch) { 2 } else { 1 }).sum()
}

/// East Asian wide and fullwidth ranges.
fn is_wide(ch: char) -> bool {
    matches!(
        ch as u32,
        0x1100..=0x115F
            | 0x2E80..=0x303E
            | 0x3041..=0x33FF
            | 0x3400..=0x4DBF
            | 0x4E00..=0x9FFF
            | 0xA000..=0xA4CF
            | 0xAC00..=0xD7A3
            | 0xF900..=0xFAFF
            | 0xFE30..=0xFE4F
            | 0xFF00..=0xFF60
            | 0xFFE0..=0xFFE6
            | 0x20000..=0x2FFFD
            | 0x30000..=0x3FFFD
    )
}

/// Multi-line cells (common in issue descriptions) are shown on one line.
fn flatten(value: &str) -> Cow<'_, str> {
    if value.contains(['\n', '\r', '\t']) {
        Cow::Owned(value.replace(['\n', '\r', '\t'], " "))
    } else {
        Cow::Borrowed(value)
    }
}
