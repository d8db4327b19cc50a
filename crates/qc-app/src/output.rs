//! Output directory handling.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// A directory that exists on disk and receives report artifacts.
#[derive(Debug, Clone)]
pub struct OutputDir {
    root: PathBuf,
}

impl OutputDir {
    /// Create `root` (with parents) if it is missing.
    pub fn prepare(root: &Path) -> AppResult<Self> {
        if !root.is_dir() {
            fs::create_dir_all(root).map_err(|e| AppError::OutputDir {
                path: root.to_path_buf(),
                source: e,
            })?;
            tracing::debug!(dir = %root.display(), "created output directory");
        }
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_nested_directories() {
        let base = std::env::temp_dir().join("qc_app_output_nested");
        let _ = fs::remove_dir_all(&base);
        let target = base.join("a").join("b");

        let dir = OutputDir::prepare(&target).unwrap();
        assert!(dir.path().is_dir());

        // Second call on an existing directory is a no-op.
        OutputDir::prepare(&target).unwrap();
    }

    #[test]
    fn file_in_the_way_is_an_error() {
        let path = std::env::temp_dir().join("qc_app_output_is_a_file");
        let _ = fs::remove_dir_all(&path);
        fs::write(&path, "x").unwrap();

        let err = OutputDir::prepare(&path).unwrap_err();
        assert!(matches!(err, AppError::OutputDir { .. }));
    }
}
