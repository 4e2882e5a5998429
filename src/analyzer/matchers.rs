//! Syntactic pattern matchers
//!
//! Each matcher classifies a single node by its shape and the names in
//! [`Conventions`]. Nothing here is type-resolved: a renamed `sinon` import or
//! a custom assertion helper simply does not match. A node whose shape cannot
//! be confirmed never matches.

use crate::config::{contains, Conventions};
use swc_core::common::Span;
use swc_core::ecma::ast::*;

/// A function literal passed to a registration or continuation call
#[derive(Debug, Clone, Copy)]
pub struct Callback<'a> {
    pub span: Span,
    pub body: &'a BlockStmt,
}

/// A call to `it`, `describe`, `beforeEach`, ... with its callbacks
#[derive(Debug, Clone)]
pub struct Registration<'a> {
    pub entry_point: &'a str,
    pub span: Span,
    pub callbacks: Vec<Callback<'a>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Release<'a> {
    /// `stub.restore()`
    Mock(&'a str),
    /// `sinon.restore()` with `namespaceReleaseAll` enabled
    All,
}

/// Strip wrappers that do not change what an expression evaluates to
fn unwrap_expr(expr: &Expr) -> &Expr {
    match expr {
        Expr::Paren(paren) => unwrap_expr(&paren.expr),
        Expr::TsAs(ts_as) => unwrap_expr(&ts_as.expr),
        Expr::TsNonNull(non_null) => unwrap_expr(&non_null.expr),
        Expr::TsTypeAssertion(assertion) => unwrap_expr(&assertion.expr),
        Expr::TsConstAssertion(assertion) => unwrap_expr(&assertion.expr),
        Expr::TsSatisfies(satisfies) => unwrap_expr(&satisfies.expr),
        _ => expr,
    }
}

fn callee_member(call: &CallExpr) -> Option<&MemberExpr> {
    if let Callee::Expr(callee) = &call.callee {
        if let Expr::Member(member) = unwrap_expr(callee) {
            return Some(member);
        }
    }
    None
}

fn member_name(member: &MemberExpr) -> Option<&str> {
    if let MemberProp::Ident(prop) = &member.prop {
        return Some(&*prop.sym);
    }
    None
}

fn ident_name(expr: &Expr) -> Option<&str> {
    if let Expr::Ident(ident) = unwrap_expr(expr) {
        return Some(&*ident.sym);
    }
    None
}

/// Check if an expression creates a tracked mock: `sinon.stub(obj, 'method')`
///
/// Chained configuration such as `sinon.stub(obj, 'm').callsFake(fn)` still
/// counts; the namespace call at the bottom of the chain decides. With
/// `exempt_naked_mocks` a factory call without arguments wraps no
/// collaborator and is not tracked.
pub fn is_mock_factory_call(expr: &Expr, conventions: &Conventions) -> bool {
    let Expr::Call(call) = unwrap_expr(expr) else {
        return false;
    };
    let Some(member) = callee_member(call) else {
        return false;
    };

    match unwrap_expr(&member.obj) {
        Expr::Ident(namespace) if contains(&conventions.mock_namespaces, &*namespace.sym) => {
            let is_factory = member_name(member)
                .map(|name| contains(&conventions.dangerous_factories, name))
                .unwrap_or(false);
            is_factory && (!conventions.exempt_naked_mocks || !call.args.is_empty())
        }
        chained @ Expr::Call(_) => is_mock_factory_call(chained, conventions),
        _ => false,
    }
}

/// Names bound by `const stub = sinon.stub(...)` declarators
pub fn declared_mocks<'a>(decl: &'a VarDecl, conventions: &Conventions) -> Vec<&'a str> {
    decl.decls
        .iter()
        .filter_map(|declarator| {
            let Pat::Ident(binding) = &declarator.name else {
                return None;
            };
            let init = declarator.init.as_ref()?;
            is_mock_factory_call(init, conventions).then(|| &*binding.id.sym)
        })
        .collect()
}

/// Name assigned by `spy = sinon.spy(...)` to an already declared variable
pub fn assigned_mock<'a>(stmt: &'a ExprStmt, conventions: &Conventions) -> Option<&'a str> {
    let Expr::Assign(assign) = unwrap_expr(&stmt.expr) else {
        return None;
    };
    if assign.op != AssignOp::Assign || !is_mock_factory_call(&assign.right, conventions) {
        return None;
    }
    if let AssignTarget::Simple(SimpleAssignTarget::Ident(binding)) = &assign.left {
        return Some(&*binding.id.sym);
    }
    None
}

/// Match `<ident>.restore()`
pub fn release_target<'a>(stmt: &'a ExprStmt, conventions: &Conventions) -> Option<Release<'a>> {
    let Expr::Call(call) = unwrap_expr(&stmt.expr) else {
        return None;
    };
    let member = callee_member(call)?;
    if member_name(member)? != conventions.release_method {
        return None;
    }
    let object = ident_name(&member.obj)?;
    if conventions.namespace_release_all && contains(&conventions.mock_namespaces, object) {
        Some(Release::All)
    } else {
        Some(Release::Mock(object))
    }
}

/// Match `expect(...).to.equal(...)` and other chains hanging off an
/// assertion entry point. The entry point call alone (`expect(x);`) asserts
/// nothing and does not match.
pub fn is_assertion_statement(stmt: &ExprStmt, conventions: &Conventions) -> bool {
    let expr = match unwrap_expr(&stmt.expr) {
        Expr::Await(await_expr) => unwrap_expr(&await_expr.arg),
        expr => expr,
    };
    reaches_assertion_root(expr, conventions, false)
}

fn reaches_assertion_root(expr: &Expr, conventions: &Conventions, through_member: bool) -> bool {
    match unwrap_expr(expr) {
        Expr::Member(member) => reaches_assertion_root(&member.obj, conventions, true),
        Expr::Call(call) => match &call.callee {
            Callee::Expr(callee) => match unwrap_expr(callee) {
                Expr::Ident(ident) => {
                    through_member && contains(&conventions.assertion_entry_points, &*ident.sym)
                }
                inner => reaches_assertion_root(inner, conventions, through_member),
            },
            _ => false,
        },
        _ => false,
    }
}

/// Callback bodies of a returned promise chain, in source order
///
/// `return Promise.all(p).then(a).catch(b)` yields the bodies of `a` then `b`.
/// An empty result means the return is not a continuation.
pub fn promise_continuations(ret: &ReturnStmt) -> Vec<&BlockStmt> {
    let Some(arg) = &ret.arg else {
        return Vec::new();
    };

    let mut chain = Vec::new();
    let mut current = unwrap_expr(arg);
    while let Expr::Call(call) = current {
        chain.push(call);
        match callee_member(call) {
            Some(member) => current = unwrap_expr(&member.obj),
            None => break,
        }
    }

    chain
        .into_iter()
        .rev()
        .flat_map(|call| call.args.iter())
        .filter_map(|arg| callback(&arg.expr))
        .map(|callback| callback.body)
        .collect()
}

pub fn is_promise_continuation(ret: &ReturnStmt) -> bool {
    !promise_continuations(ret).is_empty()
}

/// Function literal with a block body
pub fn callback(expr: &Expr) -> Option<Callback<'_>> {
    match unwrap_expr(expr) {
        Expr::Arrow(arrow) => match &*arrow.body {
            BlockStmtOrExpr::BlockStmt(body) => Some(Callback {
                span: arrow.span,
                body,
            }),
            BlockStmtOrExpr::Expr(_) => None,
        },
        Expr::Fn(fn_expr) => fn_expr.function.body.as_ref().map(|body| Callback {
            span: fn_expr.function.span,
            body,
        }),
        _ => None,
    }
}

/// `name(...)` or `name.only(...)` / `name.skip(...)`
fn registration_name<'a>(call: &'a CallExpr, conventions: &Conventions) -> Option<&'a str> {
    let Callee::Expr(callee) = &call.callee else {
        return None;
    };
    match unwrap_expr(callee) {
        Expr::Ident(ident) => Some(&*ident.sym),
        Expr::Member(member) => {
            let modifier = member_name(member)?;
            if contains(&conventions.registration_modifiers, modifier) {
                ident_name(&member.obj)
            } else {
                None
            }
        }
        _ => None,
    }
}

fn registration<'a>(
    stmt: &'a ExprStmt,
    entry_points: &[String],
    conventions: &Conventions,
) -> Option<Registration<'a>> {
    let Expr::Call(call) = unwrap_expr(&stmt.expr) else {
        return None;
    };
    let entry_point = registration_name(call, conventions)?;
    if !contains(entry_points, entry_point) {
        return None;
    }
    Some(Registration {
        entry_point,
        span: call.span,
        callbacks: call.args.iter().filter_map(|arg| callback(&arg.expr)).collect(),
    })
}

pub fn test_registration<'a>(stmt: &'a ExprStmt, conventions: &Conventions) -> Option<Registration<'a>> {
    registration(stmt, &conventions.test_entry_points, conventions)
}

pub fn group_registration<'a>(stmt: &'a ExprStmt, conventions: &Conventions) -> Option<Registration<'a>> {
    registration(stmt, &conventions.group_entry_points, conventions)
}

pub fn hook_registration<'a>(
    stmt: &'a ExprStmt,
    hook_names: &[String],
    conventions: &Conventions,
) -> Option<Registration<'a>> {
    registration(stmt, hook_names, conventions)
}
