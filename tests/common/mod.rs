#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use sheet_filter::{sheet::Sheet, writer};
use tempfile::{TempDir, tempdir};

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    /// Creates a fresh scratch directory for the current test case.
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    /// Returns the root path for all files owned by this workspace.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn join(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    /// Writes raw bytes into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &[u8]) -> PathBuf {
        let path = self.join(name);
        fs::write(&path, contents).expect("write temp file contents");
        path
    }

    /// Writes `headers` and `rows` as a workbook whose only sheet is
    /// `sheet_name`.
    pub fn write_workbook(
        &self,
        name: &str,
        sheet_name: &str,
        headers: &[&str],
        rows: &[Vec<&str>],
    ) -> PathBuf {
        let sheet = sheet(sheet_name, headers, rows);
        let path = self.join(name);
        writer::write_workbook(&sheet, &path, Some(sheet_name)).expect("write workbook");
        path
    }
}

pub fn sheet(name: &str, headers: &[&str], rows: &[Vec<&str>]) -> Sheet {
    Sheet::new(
        name,
        headers.iter().map(|h| h.to_string()).collect(),
        rows.iter()
            .map(|row| row.iter().map(|v| v.to_string()).collect())
            .collect(),
    )
}
