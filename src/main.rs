use clap::Parser;
use std::process::ExitCode;

use suiterun::{
    cli::{Args, exit_code::INFRASTRUCTURE_FAILURE, run},
    logging::init_logging,
};

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::from(INFRASTRUCTURE_FAILURE)
        }
    }
}
