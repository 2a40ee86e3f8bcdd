//! Path resolution relative to a configuration directory.

use std::path::{Path, PathBuf};

/// The directory relative setting paths are resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    config_dir: PathBuf,
}

impl Environment {
    /// Creates an environment rooted at the given configuration directory.
    #[must_use]
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    /// Resolves a setting path. Absolute paths are returned unchanged.
    #[must_use]
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.config_dir.join(path)
    }
}

/// Resolves `path` against `env` if one is given, else returns it as written.
#[must_use]
pub fn resolve_path(path: &Path, env: Option<&Environment>) -> PathBuf {
    env.map_or_else(|| path.to_path_buf(), |env| env.resolve(path))
}
