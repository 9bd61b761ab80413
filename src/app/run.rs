use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

use crate::{
    app::App,
    configs::SyncConfig,
    engine::Bindings,
    lua::LuaEngine,
    sync::{SyncError, TreeSynchronizer},
    testing::{TestDiscoverer, TestResult},
};

/// Prepares the resource layout, then runs the requested tests.
///
/// Synchronization finishes completely (every copy, then every deletion) before the first
/// script is compiled. A synchronization failure aborts the run.
pub fn run(app: &App, paths: &[PathBuf], sync: bool) -> Result<TestResult> {
    if sync {
        synchronize(&app.config.sync).context("Failed to prepare resources")?;
    }

    run_tests(app, paths)
}

/// Mirrors every configured source into its target, then prunes the cleanup targets.
pub fn synchronize(config: &SyncConfig) -> Result<TreeSynchronizer, SyncError> {
    let mut syncer = TreeSynchronizer::new();
    for pattern in &config.protected_patterns {
        syncer.add_protected_pattern(pattern)?;
    }

    for mapping in &config.mappings {
        syncer.sync(&mapping.source, &mapping.target)?;
    }

    let mut deleted = 0;
    for target in &config.cleanup {
        deleted += syncer.delete_unexpected(target)?.len();
    }

    info!(
        mappings = config.mappings.len(),
        deleted, "Resources synchronized"
    );

    Ok(syncer)
}

/// Discovers and executes tests without touching the resource layout.
pub fn run_tests(app: &App, paths: &[PathBuf]) -> Result<TestResult> {
    let discoverer = TestDiscoverer::new(
        LuaEngine::new(&app.engine),
        Bindings::placeholders(app.config.bindings.iter().cloned()),
        app.config.test_extension.as_str(),
    );

    discoverer.discover_all(paths, &app.config.test_root)
}
