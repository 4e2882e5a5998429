//! Rule behavior on complete test files
//!
//! Valid and invalid snippets for `no-unrestored-sinon-before-expect`, plus the
//! ordering, scoping and naming-convention properties the analyzer guarantees.

use mocklint::{lint_source, Conventions, Diagnostic, LintConfig, Linter, ViolationKind};
use pretty_assertions::assert_eq;
use std::path::Path;
use test_case::test_case;

fn lint(code: &str) -> Vec<Diagnostic> {
    lint_source(code, Path::new("rule.test.js")).unwrap()
}

fn messages(code: &str) -> Vec<String> {
    lint(code).into_iter().map(|d| d.message).collect()
}

#[test_case(r#"it("passes with unstub before expect", () => {
        var ajaxStub = sinon.stub(AjaxHelpers, 'post', ajaxCallBack);
        ajaxStub.restore();
        expect(true).to.equal(true);
      });"# ; "restore before expect")]
#[test_case(r#"it("passes with a promise", () => {
        var ajaxStub = sinon.stub(AjaxHelpers, 'post', ajaxCallBack);
        const promise = Promise.resolve(ajaxStub);
        return Promise.all(promise).then(() => {
          ajaxStub.restore();
          expect(true).to.equal(true);
        })
      });"# ; "restore inside continuation")]
#[test_case(r#"it("passes with unstub before expect", function() {
        var ajaxStub = sinon.stub(AjaxHelpers, 'post', ajaxCallBack);
        ajaxStub.restore();
        expect(true).to.equal(true);
      });"# ; "function expression callback")]
#[test_case(r#"it("passes when spy is restored before expect", () => {
        var ajaxSpy = sinon.spy(AjaxHelpers, 'post', ajaxCallBack);
        ajaxSpy.restore();
        expect(true).to.equal(true);
      });"# ; "spy restored")]
#[test_case(r#"it("should ignore naked spies", function() {
        var ajaxSpy = sinon.spy();
        ajaxSpy();
        expect(ajaxSpy.callCount).to.equal(1);
      });"# ; "naked spy")]
#[test_case(r#"it("should ignore naked stubs", function() {
        var someStub = sinon.stub();
        someStub();
        expect(someStub.callCount).to.equal(1);
      });"# ; "naked stub")]
#[test_case(r#"describe("passing case with before/after hooks", function() {
        let spy;
        beforeEach(() => {
          spy = sinon.spy(someHelper, 'someMethod');
        });
        afterEach(() => {
          spy.restore();
        });
      });"# ; "hooks restore")]
#[test_case(r#"describe("passes with hooks and it block", function() {
        let spy;
        beforeEach(() => {
          spy = sinon.spy(someHelper, 'someMethod');
        });
        afterEach(() => {
          spy.restore();
        });
        it("passes", () => {
          const stub = sinon.stub(helper, 'method');
          stub();
          stub.restore();
          expect(stub.called).to.equal(true);
        })
      });"# ; "hooks and test both clean")]
fn valid(code: &str) {
    assert_eq!(lint(code), Vec::<Diagnostic>::new());
}

#[test_case(r#"it("should fail if a single stub is not restored", () => {
        var ajaxStub = sinon.stub(AjaxHelpers, 'post', ajaxCallBack);
        expect(true).to.equal(true);
        ajaxStub.restore();
      });"#, &["Call 'ajaxStub.restore()' before 'expect'"] ; "stub restored after expect")]
#[test_case(r#"it("should fail if a stub is not restored in a promise", () => {
        const ajaxStub = sinon.stub(AjaxHelpers, 'post', ajaxCallBack);
        const promise = Promise.resolve(ajaxStub);
        return Promise.all(promise).then(() => {
          expect(true).to.equal(true);
          ajaxStub.restore();
        })
      });"#, &["Call 'ajaxStub.restore()' before 'expect'"] ; "restored after expect in continuation")]
#[test_case(r#"it("should fail if a spy is not restored", function() {
        var ajaxSpy = sinon.spy(AjaxHelpers, 'post', ajaxCallBack);
        expect(true).to.equal(true);
        ajaxSpy.restore();
      });"#, &["Call 'ajaxSpy.restore()' before 'expect'"] ; "spy restored after expect")]
#[test_case(r#"it("should report multiple violations in a test", function() {
        var ajaxSpy = sinon.spy(AjaxHelpers, 'post');
        var someStub = sinon.stub(SomeHelper, 'method', callback);
        expect(true).to.equal(true);
        ajaxSpy.restore();
        someStub.restore();
      });"#, &[
        "Call 'ajaxSpy.restore()' before 'expect'",
        "Call 'someStub.restore()' before 'expect'",
      ] ; "multiple mocks")]
#[test_case(r#"it("should report a single violation when multiple stubs in a test", function() {
        var ajaxSpy = sinon.spy(AjaxHelpers, 'post');
        var anotherSpy = sinon.spy(SomeHelper, 'method');
        anotherSpy.restore();
        expect(true).to.equal(true);
        ajaxSpy.restore();
      });"#, &["Call 'ajaxSpy.restore()' before 'expect'"] ; "only the unrestored mock")]
#[test_case(r#"describe("failing case with before/after hooks", function() {
        let spy;
        beforeEach(() => {
          spy = sinon.spy(someHelper, 'someMethod');
        });
        afterEach(() => {
        });
      });"#, &["Call 'spy.restore()' in an 'afterEach' block"] ; "empty teardown")]
#[test_case(r#"it("should report a single once when a test has multiple expects", function() {
        var ajaxSpy = sinon.spy(AjaxHelpers, 'post');
        var anotherSpy = sinon.spy(SomeHelper, 'method');
        anotherSpy.restore();
        expect(true).to.equal(true);
        expect(true).to.equal(true);
        expect(true).to.equal(true);
        expect(true).to.equal(true);
        ajaxSpy.restore();
      });"#, &["Call 'ajaxSpy.restore()' before 'expect'"] ; "one report across expects")]
#[test_case(r#"describe("it should report from hooks and it blocks", function() {
        let spy;
        beforeEach(() => {
          spy = sinon.spy(someHelper, 'someMethod');
        });
        afterEach(() => {
        });
        it("fails here too", () => {
          const stub = sinon.stub(myHelper, 'someMethod');
          expect(stub.callCount).to.equal(1);
        });
      });"#, &[
        "Call 'spy.restore()' in an 'afterEach' block",
        "Call 'stub.restore()' before 'expect'",
      ] ; "hooks and test both fail")]
#[test_case(r#"describe("it should report when sinon.callsFake is used", function() {
        it("fails here too", () => {
          const helperStub = sinon.stub(myHelper, 'someMethod').callsFake(() => {});
          expect(stub.callCount).to.equal(1);
        });
      });"#, &["Call 'helperStub.restore()' before 'expect'"] ; "chained callsFake")]
fn invalid(code: &str, expected: &[&str]) {
    assert_eq!(messages(code), expected);
}

#[test]
fn test_assertion_violation_points_at_the_expect_call() {
    let diagnostics = lint(
        "it('x', () => {\n  var s = sinon.stub(H, 'm');\n  expect(true).to.equal(true);\n  s.restore();\n});",
    );
    assert_eq!(diagnostics.len(), 1);
    assert_eq!((diagnostics[0].location.line, diagnostics[0].location.column), (3, 3));
    assert_eq!(diagnostics[0].kind, ViolationKind::BeforeExpect);
    assert_eq!(diagnostics[0].mock_name, "s");
}

#[test]
fn test_teardown_violation_points_at_the_teardown_callback() {
    let diagnostics = lint(
        "describe('d', () => {\n  let spy;\n  beforeEach(() => { spy = sinon.spy(H, 'm'); });\n  afterEach(() => {});\n});",
    );
    assert_eq!(diagnostics.len(), 1);
    assert_eq!((diagnostics[0].location.line, diagnostics[0].location.column), (4, 13));
    assert_eq!(
        diagnostics[0].kind,
        ViolationKind::NotReleasedInTeardown {
            hook: "afterEach".to_string()
        }
    );
}

#[test]
fn test_order_sensitivity() {
    let create_assert_release = "it('x', () => { const s = sinon.spy(H, 'm'); expect(1).to.equal(1); s.restore(); });";
    let create_release_assert = "it('x', () => { const s = sinon.spy(H, 'm'); s.restore(); expect(1).to.equal(1); });";
    assert_eq!(lint(create_assert_release).len(), 1);
    assert_eq!(lint(create_release_assert).len(), 0);
}

#[test]
fn test_one_shot_reporting_is_per_sequence() {
    let code = r#"
        it('first', () => {
            const s = sinon.spy(H, 'm');
            expect(1).to.equal(1);
            expect(2).to.equal(2);
        });
        it('second', () => {
            const s = sinon.spy(H, 'm');
            expect(1).to.equal(1);
        });
    "#;
    assert_eq!(lint(code).len(), 2);
}

#[test]
fn test_independent_test_scopes() {
    let code = r#"
        it('dirty', () => {
            const leaked = sinon.stub(H, 'm');
            expect(1).to.equal(1);
        });
        it('clean', () => {
            const s = sinon.stub(H, 'n');
            s.restore();
            leaked.restore();
            expect(1).to.equal(1);
        });
    "#;
    assert_eq!(messages(code), vec!["Call 'leaked.restore()' before 'expect'"]);
}

#[test]
fn test_hook_check_without_any_tests() {
    let code = r#"
        describe('empty group', () => {
            let spy;
            beforeEach(() => { spy = sinon.spy(H, 'm'); });
            afterEach(() => {});
        });
    "#;
    assert_eq!(messages(code), vec!["Call 'spy.restore()' in an 'afterEach' block"]);
}

#[test]
fn test_nested_group_hooks_are_checked_separately() {
    let code = r#"
        describe('outer', () => {
            let a;
            beforeEach(() => { a = sinon.stub(H, 'a'); });
            afterEach(() => { a.restore(); });
            describe('inner', () => {
                let b;
                beforeEach(() => { b = sinon.stub(H, 'b'); });
                afterEach(() => { a.restore(); });
            });
        });
    "#;
    assert_eq!(messages(code), vec!["Call 'b.restore()' in an 'afterEach' block"]);
}

#[test]
fn test_typescript_test_file() {
    let code = r#"
        describe('typed', () => {
            it('leaks', async () => {
                const stub = sinon.stub(api, 'get') as sinon.SinonStub;
                await expect(load()).to.eventually.equal(1);
                stub.restore();
            });
        });
    "#;
    let diagnostics = lint_source(code, Path::new("typed.test.ts")).unwrap();
    assert_eq!(diagnostics.len(), 1);
}

#[test_case("const s = <any>sinon.stub(H, 'm');" ; "angle bracket assertion")]
#[test_case("const s = sinon.stub(H, 'm') satisfies object;" ; "satisfies")]
#[test_case("const s = sinon.stub(H, 'm')!;" ; "non null assertion")]
fn typescript_wrappers_are_seen_through(declaration: &str) {
    let code = format!(
        "it('x', () => {{ {} expect(1).to.equal(1); }});",
        declaration
    );
    let diagnostics = lint_source(&code, Path::new("wrapped.test.ts")).unwrap();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].mock_name, "s");
}

#[test_case("var s = sandbox.stub(H, 'm'); expect(1).to.equal(1);" ; "aliased mocking namespace")]
#[test_case("var s = sinon.stub(H, 'm'); should(1).to.equal(1);" ; "renamed assertion entry point")]
#[test_case("var s = sinon.fake(H, 'm'); expect(1).to.equal(1);" ; "factory not in dangerous list")]
fn silent_when_conventions_do_not_match(body: &str) {
    let code = format!("it('x', () => {{ {} }});", body);
    assert!(lint(&code).is_empty());
}

#[test]
fn test_renamed_release_method_is_not_a_release() {
    let code = "it('x', () => { var s = sinon.stub(H, 'm'); s.undo(); expect(1).to.equal(1); });";
    assert_eq!(messages(code), vec!["Call 's.restore()' before 'expect'"]);
}

#[test]
fn test_custom_conventions_follow_configuration() {
    let config = LintConfig {
        conventions: Conventions {
            mock_namespaces: vec!["sandbox".to_string()],
            assertion_entry_points: vec!["should".to_string()],
            ..Conventions::default()
        },
        ..LintConfig::default()
    };
    let code = "it('x', () => { var s = sandbox.stub(H, 'm'); should(1).to.equal(1); });";
    let diagnostics = Linter::new(config)
        .lint_source(code, Path::new("custom.test.js"))
        .unwrap();
    assert_eq!(diagnostics.len(), 1);
}

#[test]
fn test_parse_failure_is_an_error() {
    let result = lint_source("it('x', () => {", Path::new("broken.test.js"));
    assert!(matches!(result, Err(mocklint::Error::Parse { .. })));
}
