pub mod app;
pub mod cli;
pub mod configs;
pub mod engine;
pub mod logging;
pub mod lua;
pub mod resources;
pub mod sync;
pub mod testing;

pub use app::App;
pub use configs::Config;

pub use configs::{find_config_file, load_config, validate_config};
pub use engine::{Bindings, EngineError, Outcome, ScriptEngine};
pub use lua::{LuaEngine, create_lua_vm};
pub use sync::{SyncError, TreeSynchronizer};
pub use testing::{TestDiscoverer, TestExecutor, TestResult, TestStatus};
