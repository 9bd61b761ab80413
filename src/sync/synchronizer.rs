use indexmap::IndexSet;
use regex::Regex;
use std::{
    fs,
    path::{self, Component, Path, PathBuf},
};
use tracing::{debug, info};

use crate::sync::SyncError;

/// Counters collected by a single [`TreeSynchronizer::sync`] call.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SyncStats {
    /// Files whose bytes were written to the target
    pub copied: usize,
    /// Files left alone because the target already held identical bytes
    pub unchanged: usize,
    /// Directories created in the target
    pub directories: usize,
}

/// Mirrors source trees onto target trees and prunes what no source produced.
///
/// Every path written (or confirmed up to date) by [`sync`](Self::sync) is remembered in the
/// expected set. The set accumulates across calls, so several source roots can feed the same
/// target. [`delete_unexpected`](Self::delete_unexpected) must only run after the last `sync`
/// of a run, since it deletes everything outside that union that no protected pattern covers.
///
/// Expected paths are compared in absolute, lexically normalized form, so `target/classes` and
/// `./target/classes` name the same tree.
///
/// Protected patterns are full-match regexes tested against the path relative to the target
/// root being pruned, with `/` as separator (e.g. `.*\.class`).
#[derive(Debug, Default)]
pub struct TreeSynchronizer {
    protected: Vec<Regex>,
    expected: IndexSet<PathBuf>,
}

impl TreeSynchronizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a do-not-delete pattern. Patterns are cumulative.
    pub fn add_protected_pattern(&mut self, pattern: &str) -> Result<(), SyncError> {
        let regex = Regex::new(&format!("^(?:{})$", pattern)).map_err(|error| {
            SyncError::Pattern {
                pattern: pattern.to_string(),
                error,
            }
        })?;
        self.protected.push(regex);
        Ok(())
    }

    pub fn is_expected(&self, path: &Path) -> bool {
        self.expected.contains(&normalize(path))
    }

    /// Checks a target-relative path against the protected patterns.
    pub fn is_protected(&self, relative: &Path) -> bool {
        let candidate = relative
            .components()
            .map(|component| component.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        self.protected
            .iter()
            .any(|pattern| pattern.is_match(&candidate))
    }

    /// Makes `target` mirror `source`, which may be a file or a directory.
    ///
    /// A missing source is not an error: projects routinely lack one of the conventional roots.
    pub fn sync(&mut self, source: &Path, target: &Path) -> Result<SyncStats, SyncError> {
        let mut stats = SyncStats::default();

        if !source.exists() {
            debug!(source = %source.display(), "Sync source does not exist, skipping");
            return Ok(stats);
        }

        self.sync_entry(source, target, &mut stats)?;

        info!(
            source = %source.display(),
            target = %target.display(),
            copied = stats.copied,
            unchanged = stats.unchanged,
            directories = stats.directories,
            "Synchronized"
        );

        Ok(stats)
    }

    fn sync_entry(
        &mut self,
        source: &Path,
        target: &Path,
        stats: &mut SyncStats,
    ) -> Result<(), SyncError> {
        let metadata = fs::metadata(source).map_err(|error| SyncError::Read {
            path: source.to_path_buf(),
            error,
        })?;

        if metadata.is_dir() {
            self.sync_directory(source, target, stats)
        } else {
            self.sync_file(source, target, stats)
        }
    }

    fn sync_directory(
        &mut self,
        source: &Path,
        target: &Path,
        stats: &mut SyncStats,
    ) -> Result<(), SyncError> {
        if !target.is_dir() {
            fs::create_dir_all(target).map_err(|error| SyncError::CreateDir {
                path: target.to_path_buf(),
                error,
            })?;
            stats.directories += 1;
        }
        self.expected.insert(normalize(target));

        for name in sorted_entry_names(source)? {
            self.sync_entry(&source.join(&name), &target.join(&name), stats)?;
        }

        Ok(())
    }

    fn sync_file(
        &mut self,
        source: &Path,
        target: &Path,
        stats: &mut SyncStats,
    ) -> Result<(), SyncError> {
        let bytes = fs::read(source).map_err(|error| SyncError::Read {
            path: source.to_path_buf(),
            error,
        })?;

        self.expected.insert(normalize(target));

        if target.is_file() && fs::read(target).is_ok_and(|existing| existing == bytes) {
            stats.unchanged += 1;
            return Ok(());
        }

        if let Some(parent) = target.parent()
            && !parent.as_os_str().is_empty()
            && !parent.is_dir()
        {
            fs::create_dir_all(parent).map_err(|error| SyncError::CreateDir {
                path: parent.to_path_buf(),
                error,
            })?;
            stats.directories += 1;
        }

        fs::write(target, &bytes).map_err(|error| SyncError::Copy {
            from: source.to_path_buf(),
            to: target.to_path_buf(),
            error,
        })?;
        debug!(from = %source.display(), to = %target.display(), "Copied");
        stats.copied += 1;

        Ok(())
    }

    /// Deletes every entry below `target` that is neither expected nor protected.
    ///
    /// Directories are pruned bottom-up and only removed once empty. `target` itself is never
    /// removed. Returns the deleted paths in deletion order.
    pub fn delete_unexpected(&self, target: &Path) -> Result<Vec<PathBuf>, SyncError> {
        let mut deleted = Vec::new();

        if !target.is_dir() {
            return Ok(deleted);
        }

        self.prune_directory(target, target, &mut deleted)?;

        info!(
            target = %target.display(),
            deleted = deleted.len(),
            "Pruned unexpected entries"
        );

        Ok(deleted)
    }

    fn prune_directory(
        &self,
        root: &Path,
        dir: &Path,
        deleted: &mut Vec<PathBuf>,
    ) -> Result<(), SyncError> {
        for name in sorted_entry_names(dir)? {
            let path = dir.join(&name);
            let relative = path.strip_prefix(root).unwrap_or(&path);
            let keep = self.is_expected(&path) || self.is_protected(relative);

            let metadata = fs::symlink_metadata(&path).map_err(|error| SyncError::Read {
                path: path.clone(),
                error,
            })?;

            if metadata.is_dir() {
                self.prune_directory(root, &path, deleted)?;

                if keep || !is_empty_dir(&path)? {
                    continue;
                }

                fs::remove_dir(&path).map_err(|error| SyncError::Delete {
                    path: path.clone(),
                    error,
                })?;
            } else {
                if keep {
                    continue;
                }

                fs::remove_file(&path).map_err(|error| SyncError::Delete {
                    path: path.clone(),
                    error,
                })?;
            }

            debug!(path = %path.display(), "Deleted unexpected entry");
            deleted.push(path);
        }

        Ok(())
    }
}

/// Absolute form of `path` with `.` dropped and `..` folded into its parent.
fn normalize(path: &Path) -> PathBuf {
    let absolute = path::absolute(path).unwrap_or_else(|_| path.to_path_buf());

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push(component);
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}

fn sorted_entry_names(dir: &Path) -> Result<Vec<std::ffi::OsString>, SyncError> {
    let read_error = |error| SyncError::Read {
        path: dir.to_path_buf(),
        error,
    };

    let mut names = fs::read_dir(dir)
        .map_err(read_error)?
        .map(|entry| entry.map(|entry| entry.file_name()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(read_error)?;
    names.sort();

    Ok(names)
}

fn is_empty_dir(dir: &Path) -> Result<bool, SyncError> {
    let mut entries = fs::read_dir(dir).map_err(|error| SyncError::Read {
        path: dir.to_path_buf(),
        error,
    })?;
    Ok(entries.next().is_none())
}
