use std::path::PathBuf;

use thiserror::Error;

/// Fatal conditions that end a pipeline run.
///
/// Missing columns are deliberately absent: the validator reports them as a
/// [`crate::validate::Validation`] value instead.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("input file {path:?} does not exist")]
    FileNotFound { path: PathBuf },

    #[error("failed to read sheet '{sheet}' from {path:?}: {message}")]
    SheetRead {
        path: PathBuf,
        sheet: String,
        message: String,
    },

    #[error("failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },
}

impl PipelineError {
    pub fn is_file_not_found(&self) -> bool {
        matches!(self, PipelineError::FileNotFound { .. })
    }
}
