mod args;
pub mod exit_code;
mod run;

pub use args::{Args, ReportFormat};
pub use run::run;
