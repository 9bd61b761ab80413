// Resource Scheme Tests
//
// Scripts pull shared modules and fixture files through `resource://` URIs, which are
// looked up under the main and test resource roots in that order.

use crate::common::TestFixture;
use suiterun::{
    Bindings, LuaEngine, ScriptEngine, TestExecutor, TestStatus,
    app::run_tests,
    resources::{PathResolver, ResourceRegistry, SchemeHandler},
};

#[test]
fn test_require_shared_module_from_main_resources() {
    let fixture = TestFixture::new();
    fixture.create_main_resource(
        "mappings/customer.lua",
        r#"
local M = {}
function M.transform(input)
    return { fullName = input.first .. " " .. input.last }
end
return M
"#,
    );
    fixture.create_test(
        "customer.lua",
        r#"
local mapping = require("resource://mappings/customer.lua")
return testing.expect("full name", mapping.transform({ first = "Ada", last = "Lovelace" }),
    { fullName = "Ada Lovelace" })
"#,
    );

    let result = run_tests(&fixture.app(), &[]).unwrap();

    assert!(result.is_all_success(), "{:?}", result);
}

#[test]
fn test_read_fixture_from_test_resources() {
    let fixture = TestFixture::new();
    fixture.create_test_resource("payloads/order.txt", "order-42");
    fixture.create_test(
        "order.lua",
        r#"return testing.expect("payload", read_url("resource://payloads/order.txt"), "order-42")"#,
    );

    let result = run_tests(&fixture.app(), &[]).unwrap();

    assert!(result.is_all_success(), "{:?}", result);
}

#[test]
fn test_main_resources_shadow_test_resources() {
    let fixture = TestFixture::new();
    fixture.create_main_resource("value.txt", "main");
    fixture.create_test_resource("value.txt", "test");
    fixture.create_test(
        "shadow.lua",
        r#"return testing.expect("value", read_url("resource://value.txt"), "main")"#,
    );

    let result = run_tests(&fixture.app(), &[]).unwrap();

    assert!(result.is_all_success(), "{:?}", result);
}

#[test]
fn test_unresolved_import_is_error_leaf() {
    let fixture = TestFixture::new();
    fixture.create_test(
        "broken.lua",
        r#"local m = require("resource://missing/module.lua")
return testing.success()"#,
    );

    let result = run_tests(&fixture.app(), &[]).unwrap();

    let leaf = &result.children()[0];
    assert_eq!(leaf.status(), TestStatus::Error);
    assert!(leaf.message().unwrap().contains("missing/module.lua"));
}

#[test]
fn test_module_with_syntax_error_is_error_leaf() {
    let fixture = TestFixture::new();
    fixture.create_main_resource("bad.lua", "local M = {\nreturn M");
    fixture.create_test(
        "uses_bad.lua",
        r#"require("resource://bad.lua")
return testing.success()"#,
    );

    let result = run_tests(&fixture.app(), &[]).unwrap();

    assert_eq!(result.children()[0].status(), TestStatus::Error);
}

#[test]
fn test_custom_registry_on_executor() {
    let fixture = TestFixture::new();
    let lib = fixture.mkdir("lib");
    fixture.write("lib/answer.lua", "return 42");
    let script = fixture.write(
        "answer_test.lua",
        r#"return testing.expect("answer", require("resource://answer.lua"), 42)"#,
    );

    let registry = ResourceRegistry::new()
        .with_handler(SchemeHandler::new(PathResolver::new(vec![lib])));
    let executor = TestExecutor::new(LuaEngine::with_registry(
        registry,
        fixture.path("fixtures"),
    ));

    let result = executor.execute(&script, &Bindings::predefined());

    assert_eq!(result.name(), "answer_test");
    assert_eq!(result.status(), TestStatus::Success);
}
