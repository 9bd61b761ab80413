mod run;

pub use run::{run, run_tests, synchronize};

use crate::configs::{Config, EngineSettings};

/// Everything one invocation needs, resolved before any filesystem work starts.
#[derive(Debug, Clone)]
pub struct App {
    pub config: Config,
    pub engine: EngineSettings,
}

impl App {
    pub fn new(config: Config, engine: EngineSettings) -> App {
        Self { config, engine }
    }
}
