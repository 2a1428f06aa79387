use crate::trace::{comparator::LengthMismatchError, trace_line::FormatError};

use std::path::PathBuf;

/// A trace file could not be opened or read.
/// `path` is `None` when the trace came from a caller-supplied reader.
#[derive(Debug, thiserror::Error)]
#[error("failed to read {}: {source}", source_name(.path))]
pub struct FileAccessError {
    pub path: Option<PathBuf>,
    pub source: std::io::Error,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    FileAccess(FileAccessError),
    #[error(transparent)]
    Format(FormatError),
    #[error(transparent)]
    LengthMismatch(LengthMismatchError),
}

impl From<FileAccessError> for Error {
    fn from(value: FileAccessError) -> Self {
        Self::FileAccess(value)
    }
}

impl From<FormatError> for Error {
    fn from(value: FormatError) -> Self {
        Self::Format(value)
    }
}

impl From<LengthMismatchError> for Error {
    fn from(value: LengthMismatchError) -> Self {
        Self::LengthMismatch(value)
    }
}

fn source_name(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => path.display().to_string(),
        None => String::from("trace reader"),
    }
}
