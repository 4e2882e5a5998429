//! Hook propagator
//!
//! Mocks installed by a group's setup hooks never appear in any test body,
//! so they get a group-level check instead: replay the setup hooks, replay
//! the teardown hooks, and whatever is still created at the end of teardown
//! was never restored. This registry is separate from the per-test ones;
//! a mock created in `beforeEach` is invisible to the assertions of the
//! tests it wraps.

use crate::analyzer::matchers::{self, Callback};
use crate::analyzer::registry::MockRegistry;
use crate::analyzer::walker::{ScopeWalker, WalkMode};
use crate::config::Conventions;
use crate::models::Violation;
use swc_core::ecma::ast::Stmt;

/// Hook callback with the entry point that registered it
#[derive(Debug, Clone, Copy)]
struct Hook<'a> {
    name: &'a str,
    callback: Callback<'a>,
}

pub struct HookPropagator<'c> {
    conventions: &'c Conventions,
}

impl<'c> HookPropagator<'c> {
    pub fn new(conventions: &'c Conventions) -> Self {
        Self { conventions }
    }

    /// Check the direct hooks among `stmts`, the body of one group.
    ///
    /// Nested groups are not scanned here; they get their own check.
    pub fn check_group<'a, I>(&self, stmts: I, violations: &mut Vec<Violation>)
    where
        I: IntoIterator<Item = &'a Stmt>,
    {
        let (setups, teardowns) = self.collect_hooks(stmts);
        if setups.is_empty() {
            return;
        }

        let mut registry = MockRegistry::new();
        let setup = ScopeWalker::new(self.conventions, WalkMode::Setup);
        for hook in &setups {
            setup.walk(&hook.callback.body.stmts, &mut registry, violations);
        }
        if !registry.has_unreleased() {
            return;
        }

        let teardown = ScopeWalker::new(self.conventions, WalkMode::Teardown);
        for hook in &teardowns {
            teardown.walk(&hook.callback.body.stmts, &mut registry, violations);
        }

        // End of teardown acts as the assertion point. Without any teardown
        // hook, anchor at the first setup hook instead.
        let (hook_name, span) = match teardowns.last() {
            Some(hook) => (hook.name, hook.callback.span),
            None => (
                self.conventions.primary_teardown_hook(),
                setups[0].callback.span,
            ),
        };
        for record in registry.drain_unreleased() {
            log::debug!("{} is not restored by any {}", record.name, hook_name);
            violations.push(Violation::in_teardown(record.name, hook_name, span));
        }
    }

    fn collect_hooks<'a, I>(&self, stmts: I) -> (Vec<Hook<'a>>, Vec<Hook<'a>>)
    where
        I: IntoIterator<Item = &'a Stmt>,
    {
        let mut setups = Vec::new();
        let mut teardowns = Vec::new();

        for stmt in stmts {
            let Stmt::Expr(expr_stmt) = stmt else {
                continue;
            };
            let conventions = self.conventions;
            if let Some(registration) =
                matchers::hook_registration(expr_stmt, &conventions.setup_hooks, conventions)
            {
                setups.extend(registration.callbacks.into_iter().map(|callback| Hook {
                    name: registration.entry_point,
                    callback,
                }));
            } else if let Some(registration) =
                matchers::hook_registration(expr_stmt, &conventions.teardown_hooks, conventions)
            {
                teardowns.extend(registration.callbacks.into_iter().map(|callback| Hook {
                    name: registration.entry_point,
                    callback,
                }));
            }
        }

        (setups, teardowns)
    }
}
