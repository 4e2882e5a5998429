//! Located, serializable lint results

use crate::models::ViolationKind;
use serde::Serialize;
use std::path::PathBuf;

/// 1-based source position
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub rule: &'static str,
    pub path: PathBuf,
    #[serde(flatten)]
    pub location: Location,
    pub message: String,
    pub mock_name: String,
    #[serde(flatten)]
    pub kind: ViolationKind,
}

/// A file that could not be linted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileError {
    pub path: PathBuf,
    pub message: String,
}

/// Outcome of linting a set of files
#[derive(Debug, Clone, Default, Serialize)]
pub struct LintReport {
    pub files_checked: usize,
    pub diagnostics: Vec<Diagnostic>,
    pub errors: Vec<FileError>,
}

impl LintReport {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty() && self.errors.is_empty()
    }
}
