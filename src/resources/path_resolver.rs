use std::{
    fs::File,
    io,
    path::{Component, Path, PathBuf},
};

/// Looks a relative path up under an ordered list of root directories.
#[derive(Debug, Clone, Default)]
pub struct PathResolver {
    roots: Vec<PathBuf>,
}

impl PathResolver {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    /// Finds the first root containing `relative` as a regular file.
    ///
    /// Absolute paths and paths that climb out of a root with `..` are never found.
    pub fn find(&self, relative: &str) -> Option<PathBuf> {
        let relative = Path::new(relative);
        if !relative
            .components()
            .all(|component| matches!(component, Component::Normal(_) | Component::CurDir))
        {
            return None;
        }

        self.roots
            .iter()
            .map(|root| root.join(relative))
            .find(|candidate| candidate.is_file())
    }

    pub fn resolve(&self, relative: &str) -> io::Result<Option<File>> {
        self.find(relative).map(File::open).transpose()
    }
}
