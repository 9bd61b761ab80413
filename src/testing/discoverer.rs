use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::{
    engine::{Bindings, ScriptEngine},
    testing::{TestExecutor, TestResult},
};

/// Name of the synthetic root wrapping several top-level arguments.
pub const ALL_TESTS: &str = "all tests";

/// Directory entries worth descending into: subdirectories and files with the test extension.
pub fn is_test_entry(path: &Path, extension: &str) -> bool {
    path.is_dir() || (path.is_file() && path.extension().is_some_and(|ext| ext == extension))
}

/// Walks files and directories, executing test files and building the result tree.
///
/// Entries are visited in name order so repeated runs produce identical trees.
#[derive(Debug)]
pub struct TestDiscoverer<E> {
    executor: TestExecutor<E>,
    bindings: Bindings,
    extension: String,
}

impl<E: ScriptEngine> TestDiscoverer<E> {
    pub fn new(engine: E, bindings: Bindings, extension: impl Into<String>) -> Self {
        Self {
            executor: TestExecutor::new(engine),
            bindings,
            extension: extension.into(),
        }
    }

    /// Runs the tests named on the command line.
    ///
    /// No paths runs `default_root`; one path runs that path; several are wrapped in an
    /// [`ALL_TESTS`] suite.
    pub fn discover_all(&self, paths: &[PathBuf], default_root: &Path) -> Result<TestResult> {
        match paths {
            [] => self.discover(default_root),
            [path] => self.discover(path),
            paths => {
                let mut root = TestResult::container(ALL_TESTS);
                for path in paths {
                    root.attach(self.discover(path)?);
                }
                Ok(root)
            }
        }
    }

    /// Builds the result for a test file or a directory of tests.
    ///
    /// A file passed here directly is executed whatever its extension; the extension only
    /// filters directory listings. Paths that are neither file nor directory yield an ERROR
    /// leaf. Failing to list a directory is not a test failure and is propagated.
    pub fn discover(&self, path: &Path) -> Result<TestResult> {
        if path.is_dir() {
            self.discover_directory(path)
        } else if path.is_file() {
            Ok(self.executor.execute(path, &self.bindings))
        } else {
            Ok(TestResult::error(
                display_name(path),
                format!("Neither file nor directory: {}", path.display()),
            ))
        }
    }

    fn discover_directory(&self, dir: &Path) -> Result<TestResult> {
        debug!(dir = %dir.display(), "Discovering tests");
        let mut suite = TestResult::container(display_name(dir));

        for entry in self.test_entries(dir)? {
            suite.attach(self.discover(&entry)?);
        }

        Ok(suite)
    }

    fn test_entries(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut entries = fs::read_dir(dir)
            .with_context(|| format!("Failed to read test directory {}", dir.display()))?
            .map(|entry| entry.map(|entry| entry.path()))
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("Failed to read entries of {}", dir.display()))?;

        entries.retain(|path| is_test_entry(path, &self.extension));
        entries.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        Ok(entries)
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
