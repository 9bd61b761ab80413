mod bridge;
mod engine;
mod runtime;
mod stdlib;

pub(crate) use bridge::{json_to_lua, lua_to_json};
pub use engine::{LuaEngine, LuaUnit};
pub use runtime::{TEST_RESOURCES_GLOBAL, TESTING_LUA_KEY, create_lua_vm};
