use mlua::{Error as LuaError, Lua, Result as LuaResult, Table as LuaTable, Value};
use std::sync::Arc;

use crate::resources::ResourceRegistry;

/// Installs `read_url` and a `require` searcher for URIs the registry recognizes.
pub fn register_suiterun_stdlib(lua: &Lua, resources: Arc<ResourceRegistry>) -> LuaResult<()> {
    let registry = resources.clone();
    let read_url_fn = lua.create_function(move |_, uri: String| {
        registry
            .read_to_string(&uri)
            .map_err(LuaError::external)?
            .ok_or_else(|| LuaError::external(format!("Resource not found: {}", uri)))
    })?;

    lua.globals().set("read_url", read_url_fn)?;

    // Runs right after package.preload so resource URIs never hit the filesystem searchers
    let searcher_fn = lua.create_function(move |lua_ctx, name: String| {
        if !resources.handles(&name) {
            return Ok((Value::Nil, Value::Nil));
        }

        let Some(source) = resources
            .read_to_string(&name)
            .map_err(LuaError::external)?
        else {
            let reason = lua_ctx.create_string(format!("no resource '{}'", name))?;
            return Ok((Value::String(reason), Value::Nil));
        };

        let loader = lua_ctx
            .load(source)
            .set_name(format!("@{}", name))
            .into_function()?;

        Ok((
            Value::Function(loader),
            Value::String(lua_ctx.create_string(&name)?),
        ))
    })?;

    let package: LuaTable = lua.globals().get("package")?;
    let searchers: LuaTable = package.get("searchers")?;
    searchers.raw_insert(2, searcher_fn)?;

    Ok(())
}
