//! Writing extracted scripts into the sandbox

use super::path::sanitize;
use crate::extractors::Scripts;
use crate::fs::FileSystem;
use crate::progress::{ProgressEvent, ProgressHandler};
use anyhow::Result;
use std::path::PathBuf;
use tracing::debug;

pub struct Materializer<'a, F: FileSystem> {
    fs: &'a F,
    root: PathBuf,
    default_shell: String,
    progress: &'a dyn ProgressHandler,
}

impl<'a, F: FileSystem> Materializer<'a, F> {
    pub fn new(
        fs: &'a F,
        root: impl Into<PathBuf>,
        default_shell: impl Into<String>,
        progress: &'a dyn ProgressHandler,
    ) -> Self {
        Self {
            fs,
            root: root.into(),
            default_shell: default_shell.into(),
            progress,
        }
    }

    /// Writes every script of one source file
    ///
    /// Returns the written paths relative to the sandbox root, in extraction
    /// order. Filesystem errors are returned as-is; a partly written sandbox is
    /// not usable.
    pub fn materialize(&self, source: &str, scripts: &Scripts) -> Result<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(scripts.len());

        for (key, script) in scripts.iter() {
            let relative = sanitize(source, key);
            let target = self.root.join(&relative);
            if let Some(parent) = target.parent() {
                self.fs.create_dir_all(parent)?;
            }

            if self.fs.is_file(&target) {
                debug!("Overwriting {}", target.display());
            }
            self.fs.write(&target, &self.render(script))?;
            self.progress.on_progress(&ProgressEvent::FileWritten {
                path: relative.clone(),
            });
            written.push(relative);
        }

        Ok(written)
    }

    /// Script text with the default shebang when it has none
    pub fn render(&self, script: &str) -> String {
        if script.starts_with("#!") {
            script.to_string()
        } else {
            format!("{}\n{}", self.default_shell, script)
        }
    }
}
