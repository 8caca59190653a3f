//! Per-file extraction loop
//!
//! Every source is read, parsed, classified and extracted on its own. A failure
//! in one source is reported and the loop moves on; only filesystem errors while
//! writing the sandbox abort the run.

use crate::document::parse_documents;
use crate::error::{ExtractError, SourceError};
use crate::extractors::Scripts;
use crate::fs::FileSystem;
use crate::progress::{ProgressEvent, ProgressHandler};
use crate::sandbox::Materializer;
use crate::selector::select;
use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::info;

pub struct Pipeline<'a, F: FileSystem> {
    fs: &'a F,
    progress: &'a dyn ProgressHandler,
    sandbox_root: PathBuf,
    default_shell: String,
}

impl<'a, F: FileSystem> Pipeline<'a, F> {
    pub fn new(
        fs: &'a F,
        progress: &'a dyn ProgressHandler,
        sandbox_root: impl Into<PathBuf>,
        default_shell: impl Into<String>,
    ) -> Self {
        Self {
            fs,
            progress,
            sandbox_root: sandbox_root.into(),
            default_shell: default_shell.into(),
        }
    }

    /// Extracts the scripts of one source file without writing anything
    pub fn extract_file(&self, path: &Path) -> Result<Scripts, SourceError> {
        let unreadable = |message: &str| SourceError::Read {
            path: path.to_path_buf(),
            message: message.to_string(),
        };
        if !self.fs.exists(path) {
            return Err(unreadable("no such file"));
        }
        if self.fs.is_dir(path) {
            return Err(unreadable("is a directory"));
        }

        let content = self
            .fs
            .read_to_string(path)
            .map_err(|e| SourceError::Read {
                path: path.to_path_buf(),
                message: format!("{:#}", e),
            })?;
        let source = path.display().to_string();
        let scripts = self.extract_source(&source, &content).map_err(|e| match e {
            SourceFailure::Parse(source) => SourceError::Parse {
                path: path.to_path_buf(),
                source,
            },
            SourceFailure::Extract(ExtractError::Schema(source)) => SourceError::Schema {
                path: path.to_path_buf(),
                source,
            },
            SourceFailure::Extract(source) => SourceError::Extract {
                path: path.to_path_buf(),
                source,
            },
        })?;

        for (key, script) in scripts.iter() {
            self.progress.on_progress(&ProgressEvent::ScriptExtracted {
                key: key.to_string(),
                script: script.to_string(),
            });
        }
        Ok(scripts)
    }

    fn extract_source(&self, source: &str, content: &str) -> Result<Scripts, SourceFailure> {
        let documents = parse_documents(content).map_err(SourceFailure::Parse)?;
        let selection = select(source, &documents, self.progress)
            .map_err(|e| SourceFailure::Extract(e.into()))?;
        selection
            .dialect
            .extract(&documents[selection.document], self.progress)
            .map_err(SourceFailure::Extract)
    }

    /// Extracts and materializes every source, returning the written sandbox paths
    pub fn run(&self, sources: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let materializer = Materializer::new(
            self.fs,
            &self.sandbox_root,
            &self.default_shell,
            self.progress,
        );
        let mut written = Vec::new();

        for path in sources {
            let scripts = match self.extract_file(path) {
                Ok(scripts) => scripts,
                Err(e) => {
                    self.progress.on_progress(&ProgressEvent::FileFailed {
                        source: e.path().display().to_string(),
                        error: e.to_string(),
                    });
                    continue;
                }
            };
            written.extend(materializer.materialize(&path.display().to_string(), &scripts)?);
        }

        info!(
            "Extracted {} script(s) from {} file(s)",
            written.len(),
            sources.len()
        );
        self.progress.on_progress(&ProgressEvent::Completed {
            sources: sources.len(),
            files: written.len(),
        });
        Ok(written)
    }
}

enum SourceFailure {
    Parse(serde_yaml::Error),
    Extract(ExtractError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::Dialect;
    use crate::error::SchemaError;
    use crate::fs::MockFileSystem;
    use crate::progress::{NoOpHandler, RecordingHandler};

    const SHELL: &str = "#!/bin/sh -e";

    #[test]
    fn test_extract_file() {
        let fs = MockFileSystem::new();
        fs.add_file("/repo/.gitlab-ci.yml", "build:\n  script: make\n");
        let pipeline = Pipeline::new(&fs, &NoOpHandler, "/out", SHELL);

        let scripts = pipeline
            .extract_file(Path::new("/repo/.gitlab-ci.yml"))
            .unwrap();
        assert_eq!(scripts.get("build/script"), Some("make"));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let fs = MockFileSystem::new();
        let pipeline = Pipeline::new(&fs, &NoOpHandler, "/out", SHELL);

        let err = pipeline.extract_file(Path::new("/repo/missing.yml")).unwrap_err();
        assert!(matches!(err, SourceError::Read { .. }));
        assert_eq!(err.path(), &PathBuf::from("/repo/missing.yml"));
    }

    #[test]
    fn test_invalid_yaml_is_parse_error() {
        let fs = MockFileSystem::new();
        fs.add_file("/repo/bad.yml", "jobs: [unclosed");
        let pipeline = Pipeline::new(&fs, &NoOpHandler, "/out", SHELL);

        let err = pipeline.extract_file(Path::new("/repo/bad.yml")).unwrap_err();
        assert!(matches!(err, SourceError::Parse { .. }));
    }

    #[test]
    fn test_schema_errors_are_separated_from_extract_errors() {
        let fs = MockFileSystem::new();
        fs.add_file("/repo/scalar.yml", "just text\n");
        fs.add_file("/repo/wf.yml", "on: push\njobs:\n  a:\n    steps:\n      - run: [ls]\n");
        let pipeline = Pipeline::new(&fs, &NoOpHandler, "/out", SHELL);

        let err = pipeline.extract_file(Path::new("/repo/scalar.yml")).unwrap_err();
        assert!(matches!(
            err,
            SourceError::Schema {
                source: SchemaError::UnknownDialect,
                ..
            }
        ));

        let err = pipeline.extract_file(Path::new("/repo/wf.yml")).unwrap_err();
        assert!(matches!(err, SourceError::Extract { .. }));
        assert!(err.to_string().starts_with("read /repo/wf.yml, "));
    }

    #[test]
    fn test_empty_file_has_no_document() {
        let fs = MockFileSystem::new();
        fs.add_file("/repo/empty.yml", "# only a comment\n");
        let pipeline = Pipeline::new(&fs, &NoOpHandler, "/out", SHELL);

        let err = pipeline.extract_file(Path::new("/repo/empty.yml")).unwrap_err();
        assert!(matches!(
            err,
            SourceError::Schema {
                source: SchemaError::NoDocument,
                ..
            }
        ));
    }

    #[test]
    fn test_directory_is_read_error() {
        let fs = MockFileSystem::new();
        fs.add_dir("/repo/ci.yml");
        let pipeline = Pipeline::new(&fs, &NoOpHandler, "/out", SHELL);

        let err = pipeline.extract_file(Path::new("/repo/ci.yml")).unwrap_err();
        assert_eq!(err.to_string(), "failed to read /repo/ci.yml: is a directory");
    }

    #[test]
    fn test_run_skips_failing_files() {
        let fs = MockFileSystem::new();
        fs.add_file("/repo/bad.yml", "- [");
        fs.add_file("/repo/ci.yml", "test:\n  script:\n    - cargo test\n");
        let progress = RecordingHandler::new();
        let pipeline = Pipeline::new(&fs, &progress, "/out", SHELL);

        let written = pipeline
            .run(&[
                PathBuf::from("/repo/bad.yml"),
                PathBuf::from("/repo/missing.yml"),
                PathBuf::from("/repo/ci.yml"),
            ])
            .unwrap();

        assert_eq!(
            written,
            vec![PathBuf::from("__root__/repo/ci.yml/test/script")]
        );
        assert_eq!(
            fs.read_to_string(Path::new("/out/__root__/repo/ci.yml/test/script"))
                .unwrap(),
            "#!/bin/sh -e\ncargo test"
        );

        let events = progress.events();
        let failed: Vec<_> = events
            .iter()
            .filter_map(|event| match event {
                ProgressEvent::FileFailed { source, .. } => Some(source.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(failed, vec!["/repo/bad.yml", "/repo/missing.yml"]);
        assert_eq!(
            events.last(),
            Some(&ProgressEvent::Completed {
                sources: 3,
                files: 1,
            })
        );
    }

    #[test]
    fn test_run_reports_dialect_and_scripts() {
        let fs = MockFileSystem::new();
        fs.add_file(
            "/repo/action.yml",
            "inputs: {}\nruns:\n  using: composite\n  steps:\n    - run: echo ${{ inputs.name }}\n",
        );
        let progress = RecordingHandler::new();
        let pipeline = Pipeline::new(&fs, &progress, "/out", SHELL);

        pipeline.run(&[PathBuf::from("/repo/action.yml")]).unwrap();

        let events = progress.events();
        assert!(events.contains(&ProgressEvent::DialectSelected {
            source: "/repo/action.yml".to_string(),
            dialect: Dialect::GitHubAction,
            document: 0,
        }));
        assert!(events.contains(&ProgressEvent::ScriptExtracted {
            key: "runs/steps/0/run".to_string(),
            script: "echo $ACTION_EXPRESSION".to_string(),
        }));
    }

    #[test]
    fn test_nested_bitbucket_scripts_do_not_block_later_files() {
        let fs = MockFileSystem::new();
        fs.add_file(
            "/r/a.yml",
            "pipelines:\n  custom:\n    script:\n      - step:\n          script: [make]\n",
        );
        fs.add_file("/r/b.yml", "job:\n  script: ls\n");
        let pipeline = Pipeline::new(&fs, &NoOpHandler, "/out", SHELL);

        let written = pipeline
            .run(&[PathBuf::from("/r/a.yml"), PathBuf::from("/r/b.yml")])
            .unwrap();
        assert_eq!(
            written,
            vec![
                PathBuf::from("__root__/r/a.yml/pipelines/custom/script/0/step/script"),
                PathBuf::from("__root__/r/b.yml/job/script"),
            ]
        );
    }

    #[test]
    fn test_run_with_nothing_to_extract() {
        let fs = MockFileSystem::new();
        fs.add_file("/repo/wf.yml", "on: push\njobs: {}\n");
        let pipeline = Pipeline::new(&fs, &NoOpHandler, "/out", SHELL);

        let written = pipeline.run(&[PathBuf::from("/repo/wf.yml")]).unwrap();
        assert!(written.is_empty());
    }

    #[test]
    fn test_materialize_errors_abort_the_run() {
        let fs = MockFileSystem::new();
        fs.add_file("/repo/ci.yml", "job:\n  script: ls\n");
        fs.add_file("/out/__root__", "in the way");
        let pipeline = Pipeline::new(&fs, &NoOpHandler, "/out", SHELL);

        assert!(pipeline.run(&[PathBuf::from("/repo/ci.yml")]).is_err());
    }
}
