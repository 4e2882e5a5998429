//! Scope walker
//!
//! Replays a statement sequence in source order against a [`MockRegistry`].
//! Branches, loops and nested functions are not entered: a block is treated
//! as one flat, unconditional sequence. Returned promise continuations are
//! the exception; their callback bodies continue the same sequence with the
//! same registry.

use crate::analyzer::matchers::{self, Release};
use crate::analyzer::registry::MockRegistry;
use crate::config::Conventions;
use crate::models::Violation;
use swc_core::common::Spanned;
use swc_core::ecma::ast::*;

/// What a walk is allowed to observe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkMode {
    /// Test case body: creations, releases and assertions
    TestBody,
    /// Setup hook: creations by declaration or by assignment to an outer variable
    Setup,
    /// Teardown hook: releases only
    Teardown,
}

pub struct ScopeWalker<'c> {
    conventions: &'c Conventions,
    mode: WalkMode,
}

impl<'c> ScopeWalker<'c> {
    pub fn new(conventions: &'c Conventions, mode: WalkMode) -> Self {
        Self { conventions, mode }
    }

    /// Walk `stmts`, pushing a violation for every mock still created when an
    /// assertion runs. Each unreleased mock is reported once per sequence.
    pub fn walk(&self, stmts: &[Stmt], registry: &mut MockRegistry, violations: &mut Vec<Violation>) {
        for stmt in stmts {
            self.walk_stmt(stmt, registry, violations);
        }
    }

    fn walk_stmt(&self, stmt: &Stmt, registry: &mut MockRegistry, violations: &mut Vec<Violation>) {
        match stmt {
            Stmt::Decl(Decl::Var(var)) if self.mode != WalkMode::Teardown => {
                for name in matchers::declared_mocks(var, self.conventions) {
                    registry.record(name);
                }
            }
            Stmt::Expr(expr_stmt) => self.walk_expr_stmt(expr_stmt, registry, violations),
            Stmt::Return(ret) => {
                for body in matchers::promise_continuations(ret) {
                    self.walk(&body.stmts, registry, violations);
                }
            }
            _ => {}
        }
    }

    fn walk_expr_stmt(
        &self,
        stmt: &ExprStmt,
        registry: &mut MockRegistry,
        violations: &mut Vec<Violation>,
    ) {
        if let Some(release) = matchers::release_target(stmt, self.conventions) {
            match release {
                Release::Mock(name) => registry.mark_released(name),
                Release::All => registry.mark_all_released(),
            }
            return;
        }

        match self.mode {
            WalkMode::TestBody => {
                if matchers::is_assertion_statement(stmt, self.conventions) {
                    let span = stmt.expr.span();
                    for record in registry.drain_unreleased() {
                        violations.push(Violation::before_expect(record.name, span));
                    }
                }
            }
            WalkMode::Setup => {
                if let Some(name) = matchers::assigned_mock(stmt, self.conventions) {
                    registry.record(name);
                }
            }
            WalkMode::Teardown => {}
        }
    }
}
