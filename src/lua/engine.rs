use anyhow::{Context, Result};
use mlua::{Function, Lua, Table, Value};
use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{
    configs::EngineSettings,
    engine::{Bindings, EngineError, Outcome, ScriptEngine},
    lua::{create_lua_vm, json_to_lua, lua_to_json},
    resources::{PathResolver, ResourceRegistry, SchemeHandler},
};

/// A test script loaded into its own VM, ready to run once.
pub struct LuaUnit {
    lua: Lua,
    chunk: Function,
    path: PathBuf,
}

/// Evaluates Lua test scripts. Each script gets a fresh VM so nothing leaks between tests.
#[derive(Debug, Clone)]
pub struct LuaEngine {
    resources: Arc<ResourceRegistry>,
    test_resources: PathBuf,
}

impl LuaEngine {
    pub fn new(settings: &EngineSettings) -> Self {
        let registry = ResourceRegistry::new().with_handler(SchemeHandler::new(
            PathResolver::new(settings.resource_roots.clone()),
        ));
        Self::with_registry(registry, settings.test_resources.clone())
    }

    pub fn with_registry(resources: ResourceRegistry, test_resources: PathBuf) -> Self {
        Self {
            resources: Arc::new(resources),
            test_resources,
        }
    }

    fn load(&self, file: &Path, bindings: &Bindings) -> Result<LuaUnit> {
        let source =
            fs::read(file).with_context(|| format!("Failed to read {}", file.display()))?;

        let lua = create_lua_vm(self.resources.clone(), &self.test_resources)
            .context("Failed to create Lua VM")?;
        let env = script_environment(&lua, bindings)?;

        let chunk = lua
            .load(source.as_slice())
            .set_name(format!("@{}", file.display()))
            .set_environment(env)
            .into_function()?;

        Ok(LuaUnit {
            lua,
            chunk,
            path: file.to_path_buf(),
        })
    }
}

/// Globals of one script: its bindings, falling back to the VM globals for everything else.
fn script_environment(lua: &Lua, bindings: &Bindings) -> Result<Table> {
    let env: Table = lua
        .load("return setmetatable({}, { __index = _G })")
        .set_name("=environment")
        .eval()?;

    for (name, value) in bindings.iter() {
        env.raw_set(name, json_to_lua(lua, value)?)
            .with_context(|| format!("Failed to bind '{}'", name))?;
    }

    Ok(env)
}

impl ScriptEngine for LuaEngine {
    type Unit = LuaUnit;

    const OUTPUT_FORMAT: &'static str = "application/lua";

    /// Loads the script with `bindings` installed in its environment.
    fn compile(&self, file: &Path, bindings: &Bindings) -> Result<LuaUnit, EngineError> {
        self.load(file, bindings)
            .map_err(|err| EngineError::Compile {
                path: file.to_path_buf(),
                message: format!("{:#}", err),
            })
    }

    /// Bindings were installed at compile time, `run` only evaluates.
    fn run(
        &self,
        unit: LuaUnit,
        _bindings: &Bindings,
        output_format: &str,
    ) -> Result<Outcome, EngineError> {
        let LuaUnit { lua, chunk, path } = unit;

        if output_format != Self::OUTPUT_FORMAT {
            return Err(EngineError::Runtime {
                path,
                message: format!("Unsupported output format '{}'", output_format),
            });
        }

        let value: Value = chunk.call(()).map_err(|err| EngineError::Runtime {
            path: path.clone(),
            message: err.to_string(),
        })?;

        let outcome = lua_to_json(&value)
            .and_then(|json| Outcome::from_json(json).context("Outcome does not match schema"))
            .map_err(|err| EngineError::Outcome {
                path,
                message: format!("{:#}", err),
            });

        // The VM has to outlive every handle into it
        drop(value);
        drop(chunk);
        drop(lua);

        outcome
    }
}
