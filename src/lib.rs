//! Sinon mock lifecycle linter
//!
//! Detects spies and stubs that still wrap a real collaborator when a test
//! asserts, including inside returned promise continuations, and mocks set up
//! in `beforeEach` hooks that no `afterEach` hook restores.

pub mod error;
pub mod config;
pub mod models;
pub mod parser;
pub mod analyzer;
pub mod report;
pub mod utils;
pub mod wasm;

pub use analyzer::{analyze_module, RULE_NAME};
pub use config::{Conventions, LintConfig};
pub use error::{Error, Result};
pub use models::{Diagnostic, FileError, LintReport, Location, Violation, ViolationKind};

use parser::AstParser;
use std::path::{Path, PathBuf};

/// Parses test files and runs the mock lifecycle analysis over them
pub struct Linter {
    config: LintConfig,
}

impl Linter {
    pub fn new(config: LintConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LintConfig {
        &self.config
    }

    /// Lint one in-memory source; `path` selects the syntax and labels results
    pub fn lint_source(&self, code: &str, path: &Path) -> Result<Vec<Diagnostic>> {
        // Source maps only grow, so each file gets its own
        let parser = AstParser::new();
        let module = parser.parse(code, path)?;
        let violations = analyze_module(&module, &self.config.conventions);
        log::debug!("{}: {} violations", path.display(), violations.len());

        Ok(violations
            .into_iter()
            .map(|violation| Diagnostic {
                rule: RULE_NAME,
                path: path.to_path_buf(),
                location: parser.locate(violation.span),
                message: violation.message(),
                mock_name: violation.mock_name,
                kind: violation.kind,
            })
            .collect())
    }

    pub fn lint_file(&self, path: &Path) -> Result<Vec<Diagnostic>> {
        let code = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        self.lint_source(&code, path)
    }

    /// Lint files and directories. A file that cannot be read or parsed is
    /// recorded in the report and does not stop the run.
    pub fn lint_paths(&self, paths: &[PathBuf]) -> Result<LintReport> {
        let pattern = self.config.test_file_regex()?;
        let files = utils::discover_test_files(paths, &pattern)?;

        let mut report = LintReport::default();
        for file in files {
            report.files_checked += 1;
            match self.lint_file(&file) {
                Ok(diagnostics) => report.diagnostics.extend(diagnostics),
                Err(e) => {
                    log::warn!("skipping {}: {}", file.display(), e);
                    report.errors.push(FileError {
                        path: file,
                        message: e.to_string(),
                    });
                }
            }
        }

        Ok(report)
    }
}

impl Default for Linter {
    fn default() -> Self {
        Self::new(LintConfig::default())
    }
}

/// Lint a single source string with the default conventions
pub fn lint_source(code: &str, path: &Path) -> Result<Vec<Diagnostic>> {
    Linter::default().lint_source(code, path)
}
