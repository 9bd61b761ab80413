use anyhow::Result;
use mlua::{Lua, LuaOptions, StdLib, Table};
use std::{path::Path, sync::Arc};

use crate::{lua::stdlib::register_suiterun_stdlib, resources::ResourceRegistry};

pub const TEST_RESOURCES_GLOBAL: &str = "TEST_RESOURCES";
pub const TESTING_LUA_KEY: &str = "testing";
const TESTING_LUA: &str = r#"
local testing = {}

-- Deep structural equality, tables compared key by key
local function equals(a, b)
    if a == b then
        return true
    end
    if type(a) ~= "table" or type(b) ~= "table" then
        return false
    end
    for k, v in pairs(a) do
        if not equals(v, b[k]) then
            return false
        end
    end
    for k in pairs(b) do
        if a[k] == nil then
            return false
        end
    end
    return true
end

local function describe(value)
    if type(value) == "string" then
        return string.format("%q", value)
    end
    if type(value) ~= "table" then
        return tostring(value)
    end
    local keys = {}
    for k in pairs(value) do
        keys[#keys + 1] = k
    end
    table.sort(keys, function(x, y) return tostring(x) < tostring(y) end)
    local parts = {}
    for _, k in ipairs(keys) do
        parts[#parts + 1] = tostring(k) .. " = " .. describe(value[k])
    end
    return "{" .. table.concat(parts, ", ") .. "}"
end

function testing.success(name)
    return { name = name, status = "SUCCESS" }
end

function testing.failure(message, name)
    return { name = name, status = "FAILURE", message = message }
end

function testing.ignored(name)
    return { name = name, status = "IGNORED" }
end

-- Compares actual against expected and reports the difference on mismatch
function testing.expect(name, actual, expected)
    if equals(actual, expected) then
        return testing.success(name)
    end
    return testing.failure("expected " .. describe(expected) .. " but got " .. describe(actual), name)
end

-- Groups outcomes; the group's status is derived from its children
function testing.suite(children, name)
    return { name = name, status = "SUCCESS", children = children }
end

testing.equals = equals
testing.describe = describe

return testing
"#;

/// Creates a sandboxed VM for one test script.
///
/// `os.exit` and `os.execute` are removed. Scripts get the `testing` helpers, the
/// test-support resource root and access to `resource://` URIs through `require` and
/// `read_url`.
pub fn create_lua_vm(resources: Arc<ResourceRegistry>, test_resources: &Path) -> Result<Lua> {
    let lua = Lua::new_with(StdLib::ALL_SAFE, LuaOptions::default())?;

    let os_table: Table = lua.globals().get("os")?;

    os_table.raw_remove("exit")?;

    os_table.raw_remove("execute")?;

    lua.globals().set("os", os_table)?;

    register_suiterun_stdlib(&lua, resources)?;

    lua.globals()
        .set(TEST_RESOURCES_GLOBAL, test_resources.display().to_string())?;

    let testing: Table = lua.load(TESTING_LUA).set_name("=testing").eval()?;
    lua.globals().set(TESTING_LUA_KEY, testing)?;

    Ok(lua)
}
