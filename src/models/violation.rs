//! Violations produced by the analyzer

use serde::Serialize;
use swc_core::common::Span;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViolationKind {
    /// An assertion ran while the mock was still installed
    BeforeExpect,
    /// A setup hook created the mock and no teardown hook restored it
    NotReleasedInTeardown { hook: String },
}

/// One unreleased mock, anchored at the node the host should report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub kind: ViolationKind,
    pub mock_name: String,
    pub span: Span,
}

impl Violation {
    pub fn before_expect(mock_name: impl Into<String>, span: Span) -> Self {
        Self {
            kind: ViolationKind::BeforeExpect,
            mock_name: mock_name.into(),
            span,
        }
    }

    pub fn in_teardown(mock_name: impl Into<String>, hook: impl Into<String>, span: Span) -> Self {
        Self {
            kind: ViolationKind::NotReleasedInTeardown { hook: hook.into() },
            mock_name: mock_name.into(),
            span,
        }
    }

    pub fn message(&self) -> String {
        match &self.kind {
            ViolationKind::BeforeExpect => {
                format!("Call '{}.restore()' before 'expect'", self.mock_name)
            }
            ViolationKind::NotReleasedInTeardown { hook } => {
                format!("Call '{}.restore()' in an '{}' block", self.mock_name, hook)
            }
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}
