//! Contract between the harness and the script engine that evaluates test files.
//!
//! Evaluation is two-phase: [`ScriptEngine::compile`] turns a file into an engine specific unit,
//! [`ScriptEngine::run`] evaluates that unit and hands back an [`Outcome`].

mod bindings;
mod error;
mod outcome;

use std::path::Path;

pub use bindings::{Bindings, PREDEFINED_BINDINGS};
pub use error::EngineError;
pub use outcome::Outcome;

pub trait ScriptEngine {
    type Unit;

    /// Output format the engine should produce the outcome in.
    const OUTPUT_FORMAT: &'static str;

    fn compile(&self, file: &Path, bindings: &Bindings) -> Result<Self::Unit, EngineError>;

    fn run(
        &self,
        unit: Self::Unit,
        bindings: &Bindings,
        output_format: &str,
    ) -> Result<Outcome, EngineError>;
}
