//! Mock lifecycle analysis
//!
//! Finds spies and stubs that are still wrapping a real collaborator when a
//! test asserts, and setup-hook mocks that no teardown hook restores.

pub mod matchers;
pub mod registry;
pub mod walker;
pub mod hooks;

pub use hooks::HookPropagator;
pub use registry::MockRegistry;
pub use walker::{ScopeWalker, WalkMode};

use crate::config::Conventions;
use crate::models::Violation;
use matchers::Registration;
use swc_core::ecma::ast::*;
use swc_core::ecma::visit::{Visit, VisitWith};

pub const RULE_NAME: &str = "no-unrestored-sinon-before-expect";

/// Analyze a parsed test file.
///
/// The module's top-level statements form an implicit root group, so root
/// hooks are checked like any other group's. Violations come out in
/// processing order: a group's hook findings precede its tests' findings.
pub fn analyze_module(module: &Module, conventions: &Conventions) -> Vec<Violation> {
    let mut analyzer = MockLifecycleAnalyzer::new(conventions);
    let top_level = module.body.iter().filter_map(|item| match item {
        ModuleItem::Stmt(stmt) => Some(stmt),
        ModuleItem::ModuleDecl(_) => None,
    });
    HookPropagator::new(conventions).check_group(top_level, &mut analyzer.violations);
    module.visit_with(&mut analyzer);
    analyzer.violations
}

/// Traversal entry point
///
/// Only expression statements are of interest. A test or group registration
/// is analyzed right here and its callback is not handed back to the
/// traversal, so every registration is seen exactly once.
pub struct MockLifecycleAnalyzer<'c> {
    conventions: &'c Conventions,
    violations: Vec<Violation>,
}

impl<'c> MockLifecycleAnalyzer<'c> {
    pub fn new(conventions: &'c Conventions) -> Self {
        Self {
            conventions,
            violations: Vec::new(),
        }
    }

    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }

    /// Each test callback starts from an empty registry
    fn check_test(&mut self, test: &Registration<'_>) {
        log::debug!("walking {} body ({} callbacks)", test.entry_point, test.callbacks.len());
        let walker = ScopeWalker::new(self.conventions, WalkMode::TestBody);
        for callback in &test.callbacks {
            let mut registry = MockRegistry::new();
            walker.walk(&callback.body.stmts, &mut registry, &mut self.violations);
        }
    }

    fn check_group(&mut self, group: &Registration<'_>) {
        log::debug!("checking {} hooks", group.entry_point);
        for callback in &group.callbacks {
            HookPropagator::new(self.conventions)
                .check_group(&callback.body.stmts, &mut self.violations);
            for stmt in &callback.body.stmts {
                self.check_group_member(stmt);
            }
        }
    }

    fn check_group_member(&mut self, stmt: &Stmt) {
        if let Stmt::Expr(expr_stmt) = stmt {
            if self.check_registration(expr_stmt) {
                return;
            }
        }
        // Registrations buried in other constructs, e.g. `cases.forEach(c => it(...))`
        stmt.visit_with(self);
    }

    /// Returns false when `stmt` registers neither a test nor a group
    fn check_registration(&mut self, stmt: &ExprStmt) -> bool {
        let conventions = self.conventions;
        if let Some(test) = matchers::test_registration(stmt, conventions) {
            self.check_test(&test);
            true
        } else if let Some(group) = matchers::group_registration(stmt, conventions) {
            self.check_group(&group);
            true
        } else {
            false
        }
    }
}

impl Visit for MockLifecycleAnalyzer<'_> {
    fn visit_expr_stmt(&mut self, node: &ExprStmt) {
        if !self.check_registration(node) {
            node.visit_children_with(self);
        }
    }
}
