use anyhow::{Context, Result};
use std::{env, time::Instant};

use crate::{
    app::App,
    cli::{Args, ReportFormat, exit_code::exit_code_for},
    configs::{Config, TEST_RESOURCES_ENV, find_config_file, load_config, validate_config},
    testing::report::{render_json, render_text},
};

/// Runs the harness for parsed arguments and returns the process exit code.
///
/// Prints the report followed by the elapsed time. Test failures are reported through the
/// exit code; only infrastructure problems come back as `Err`.
pub fn run(args: Args) -> Result<u8> {
    let start = Instant::now();

    let config = match find_config_file(args.config)? {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };
    validate_config(&config).context("Invalid configuration")?;
    let config = config.expanded()?;

    let engine = config.engine_settings(env::var(TEST_RESOURCES_ENV).ok())?;
    let app = App::new(config, engine);

    let result = crate::app::run(&app, &args.paths, !args.no_sync)?;

    let report = match args.format {
        ReportFormat::Text => render_text(&result),
        ReportFormat::Json => render_json(&result)? + "\n",
    };
    print!("{}", report);
    println!("Time needed: {}ms", start.elapsed().as_millis());

    Ok(exit_code_for(&result))
}
