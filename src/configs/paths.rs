use anyhow::{Context, Result, anyhow};
use std::path::PathBuf;

pub const CONFIG_FILE_NAME: &str = "suiterun.toml";

/// Environment variable overriding the test-support resource root.
pub const TEST_RESOURCES_ENV: &str = "SUITERUN_TEST_RESOURCES";
pub const DEFAULT_TEST_RESOURCES: &str = "src/test/resources";

/// Expands a path with tilde (~) and environment variable substitution
///
/// - `~` → user's home directory
/// - `$VAR/path` and `${VAR}/path` → value of VAR
///
/// # Examples
///
/// ```no_run
/// use std::path::PathBuf;
/// use suiterun::configs::expand_path;
///
/// # fn main() -> anyhow::Result<()> {
/// let expanded = expand_path(PathBuf::from("$HOME/project/src/test/lua"))?;
/// # Ok(())
/// # }
/// ```
pub fn expand_path(path: PathBuf) -> Result<PathBuf> {
    let path_str = path
        .to_str()
        .context("Path contains invalid UTF-8 characters")?;

    let expanded = shellexpand::full(path_str).context("Failed to expand path")?;

    Ok(PathBuf::from(expanded.as_ref()))
}

/// Finds the config file using the following search order:
///
/// 1. CLI argument path (if provided) - returns error if specified but doesn't exist
/// 2. Current directory: `./suiterun.toml`
///
/// Returns `Ok(None)` when nothing was found by auto-discovery; defaults apply then.
pub fn find_config_file(cli_path: Option<PathBuf>) -> Result<Option<PathBuf>> {
    if let Some(path) = cli_path {
        if path.exists() {
            return Ok(Some(path));
        } else {
            return Err(anyhow!("Specified config file does not exist: {:?}", path));
        }
    }

    let local_config_path = PathBuf::from(".").join(CONFIG_FILE_NAME);
    if local_config_path.exists() {
        return Ok(Some(local_config_path));
    }

    Ok(None)
}

/// Picks the test-support resource root.
///
/// Priority: the environment override (ignored when empty), then the configured value, then
/// [`DEFAULT_TEST_RESOURCES`]. The environment is only read here, once, at startup.
pub fn resolve_test_resources(
    env_override: Option<String>,
    configured: Option<PathBuf>,
) -> Result<PathBuf> {
    let path = match env_override.filter(|value| !value.is_empty()) {
        Some(value) => PathBuf::from(value),
        None => configured.unwrap_or_else(|| PathBuf::from(DEFAULT_TEST_RESOURCES)),
    };

    let path = expand_path(path)?;
    if path.is_absolute() {
        return Ok(path);
    }

    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    Ok(cwd.join(path))
}
