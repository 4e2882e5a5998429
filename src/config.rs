//! Lint configuration
//!
//! Every identifier the analyzer matches on lives in [`Conventions`], so a
//! project that renames its mocking namespace or assertion helper only has to
//! touch one place. Configuration files are JSON5 so they may carry comments.

use crate::error::{Error, Result};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File names probed in the working directory when no config is given
pub const CONFIG_FILE_NAMES: &[&str] = &[".mocklintrc.json5", ".mocklintrc"];

pub const DEFAULT_TEST_FILE_PATTERN: &str = r"\.(test|spec)\.[cm]?[jt]sx?$";

lazy_static! {
    static ref DEFAULT_TEST_FILE_REGEX: Regex =
        Regex::new(DEFAULT_TEST_FILE_PATTERN).expect("default test file pattern is valid");
}

/// Naming conventions the pattern matchers trust
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Conventions {
    pub mock_namespaces: Vec<String>,
    pub dangerous_factories: Vec<String>,
    /// Skip factory calls without arguments (`sinon.stub()`); they wrap nothing.
    pub exempt_naked_mocks: bool,
    pub release_method: String,
    /// Treat `sinon.restore()` as releasing every mock in scope. Off by
    /// default: the call then only releases a mock literally named `sinon`.
    pub namespace_release_all: bool,
    pub assertion_entry_points: Vec<String>,
    pub test_entry_points: Vec<String>,
    pub group_entry_points: Vec<String>,
    pub setup_hooks: Vec<String>,
    pub teardown_hooks: Vec<String>,
    pub registration_modifiers: Vec<String>,
}

impl Default for Conventions {
    fn default() -> Self {
        Self {
            mock_namespaces: strings(&["sinon"]),
            dangerous_factories: strings(&["spy", "stub"]),
            exempt_naked_mocks: true,
            release_method: "restore".to_string(),
            namespace_release_all: false,
            assertion_entry_points: strings(&["expect"]),
            test_entry_points: strings(&["it", "specify"]),
            group_entry_points: strings(&["describe", "context"]),
            setup_hooks: strings(&["beforeEach"]),
            teardown_hooks: strings(&["afterEach"]),
            registration_modifiers: strings(&["only", "skip"]),
        }
    }
}

impl Conventions {
    /// Teardown hook name used in messages when a group has none
    pub fn primary_teardown_hook(&self) -> &str {
        self.teardown_hooks
            .first()
            .map(String::as_str)
            .unwrap_or("afterEach")
    }
}

fn strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

pub(crate) fn contains(names: &[String], name: &str) -> bool {
    names.iter().any(|n| n == name)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LintConfig {
    pub conventions: Conventions,
    /// Regex applied to file names during directory discovery
    pub test_file_pattern: String,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            conventions: Conventions::default(),
            test_file_pattern: DEFAULT_TEST_FILE_PATTERN.to_string(),
        }
    }
}

impl LintConfig {
    /// Parse a JSON5 config document
    pub fn parse(content: &str, origin: &Path) -> Result<Self> {
        let config: LintConfig = json5::from_str(content).map_err(|e| Error::Config {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })?;
        config.test_file_regex().map_err(|e| Error::Config {
            path: origin.to_path_buf(),
            message: format!("invalid testFilePattern: {}", e),
        })?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::parse(&content, path)
    }

    /// Load `explicit` if given, else the first config file found in `dir`,
    /// else defaults.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match find_config_file(dir) {
            Some(path) => {
                log::debug!("using config file {}", path.display());
                Self::from_file(&path)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn test_file_regex(&self) -> Result<Regex> {
        if self.test_file_pattern == DEFAULT_TEST_FILE_PATTERN {
            return Ok(DEFAULT_TEST_FILE_REGEX.clone());
        }
        Ok(Regex::new(&self.test_file_pattern)?)
    }
}

fn find_config_file(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.is_file())
}
