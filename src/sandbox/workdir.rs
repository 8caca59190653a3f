//! Sandbox root lifetime

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{debug, info};

const TEMP_PREFIX: &str = "yaml_shellcheck_";

/// Directory the scripts are written into
///
/// A temporary directory is removed when the run finishes unless it is kept.
/// A user supplied directory is never removed.
#[derive(Debug)]
pub enum Workdir {
    Temporary(TempDir),
    Persistent(PathBuf),
}

impl Workdir {
    pub fn create(outdir: Option<&Path>) -> Result<Self> {
        match outdir {
            Some(dir) => {
                std::fs::create_dir_all(dir)
                    .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
                debug!("Using output directory {}", dir.display());
                Ok(Workdir::Persistent(dir.to_path_buf()))
            }
            None => {
                let dir = tempfile::Builder::new()
                    .prefix(TEMP_PREFIX)
                    .tempdir()
                    .context("Failed to create temporary directory")?;
                debug!("Using temporary directory {}", dir.path().display());
                Ok(Workdir::Temporary(dir))
            }
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Workdir::Temporary(dir) => dir.path(),
            Workdir::Persistent(path) => path,
        }
    }

    /// Releases the directory, returning its path when it is left on disk
    pub fn finish(self, keep: bool) -> Result<Option<PathBuf>> {
        match self {
            Workdir::Persistent(path) => Ok(Some(path)),
            Workdir::Temporary(dir) if keep => {
                let path = dir.into_path();
                info!("Keeping extracted scripts in {}", path.display());
                Ok(Some(path))
            }
            Workdir::Temporary(dir) => {
                let path = dir.path().to_path_buf();
                dir.close()
                    .with_context(|| format!("Failed to remove {}", path.display()))?;
                debug!("Removed temporary directory {}", path.display());
                Ok(None)
            }
        }
    }
}
