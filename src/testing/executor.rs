use std::path::Path;
use tracing::{debug, warn};

use crate::{
    engine::{Bindings, ScriptEngine},
    testing::TestResult,
};

/// Runs single test files, turning every engine failure into an ERROR leaf.
#[derive(Debug)]
pub struct TestExecutor<E> {
    engine: E,
}

impl<E: ScriptEngine> TestExecutor<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn execute(&self, file: &Path, bindings: &Bindings) -> TestResult {
        let name = test_name(file);
        debug!(file = %file.display(), "Executing test");

        let outcome = self
            .engine
            .compile(file, bindings)
            .and_then(|unit| self.engine.run(unit, bindings, E::OUTPUT_FORMAT));

        match outcome {
            Ok(outcome) => TestResult::from_outcome(name, outcome),
            Err(err) => {
                warn!(file = %file.display(), error = %err, "Test errored");
                TestResult::error(name, err.to_string())
            }
        }
    }
}

/// Test files are named after their stem: `mapping.lua` reports as `mapping`.
fn test_name(file: &Path) -> String {
    file.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string())
}
