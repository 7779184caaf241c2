use std::path::{Path, PathBuf};

use log::info;
use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};

use crate::{error::PipelineError, sheet::Sheet};

/// What happened to a filter result handed to [`persist`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Persisted {
    Written { path: PathBuf, rows: usize },
    /// Nothing matched; no file was created or touched.
    NoMatches,
}

/// Writes `result` to `path` as a single default worksheet, replacing any
/// existing file. An empty result writes nothing.
pub fn persist(result: &Sheet, path: &Path) -> Result<Persisted, PipelineError> {
    if result.is_empty() {
        info!("No matching rows; leaving {path:?} untouched");
        return Ok(Persisted::NoMatches);
    }
    write_workbook(result, path, None).map_err(|source| PipelineError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Wrote {} row(s) to {path:?}", result.row_count());
    Ok(Persisted::Written {
        path: path.to_path_buf(),
        rows: result.row_count(),
    })
}

/// Serialises every cell of `sheet` as a string, header row first. Without a
/// `worksheet_name` the worksheet keeps the default `Sheet1`.
pub fn write_workbook(
    sheet: &Sheet,
    path: &Path,
    worksheet_name: Option<&str>,
) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    if let Some(name) = worksheet_name {
        worksheet.set_name(name)?;
    }
    write_row(worksheet, 0, sheet.headers())?;
    for (idx, row) in sheet.rows().iter().enumerate() {
        let row_num = u32::try_from(idx + 1).map_err(|_| XlsxError::RowColumnLimitError)?;
        write_row(worksheet, row_num, row)?;
    }
    workbook.save(path)
}

fn write_row(worksheet: &mut Worksheet, row: u32, values: &[String]) -> Result<(), XlsxError> {
    for (col, value) in values.iter().enumerate() {
        // Blank cells read back as empty text, so they are left unwritten.
        if value.is_empty() {
            continue;
        }
        let col = u16::try_from(col).map_err(|_| XlsxError::RowColumnLimitError)?;
        worksheet.write_string(row, col, value)?;
    }
    Ok(())
}
