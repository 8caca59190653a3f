//! yaml-shellcheck - shell script extraction from CI configuration files
//!
//! CI systems embed shell scripts inside YAML. This library finds those scripts
//! in Bitbucket Pipelines, GitHub Actions, CircleCI, Drone CI, Ansible and GitLab
//! CI files and writes each one as a plain script file, so a shell checker can
//! lint them.
//!
//! # Core Concepts
//!
//! - **Dialect**: the CI system a file is written for, guessed from its keys
//! - **Job key**: `/`-joined path of the node a script came from, unique per file
//! - **Sandbox**: the directory scripts are written into, one file per job key
//!
//! # Example Usage
//!
//! ```no_run
//! use yaml_shellcheck::fs::RealFileSystem;
//! use yaml_shellcheck::progress::LoggingHandler;
//! use yaml_shellcheck::Pipeline;
//! use std::path::{Path, PathBuf};
//!
//! # fn main() -> anyhow::Result<()> {
//! let fs = RealFileSystem::new();
//! let pipeline = Pipeline::new(&fs, &LoggingHandler, "/tmp/scripts", "#!/bin/sh -e");
//!
//! let scripts = pipeline.extract_file(Path::new(".gitlab-ci.yml"))?;
//! for (key, script) in scripts.iter() {
//!     println!("{}:\n{}", key, script);
//! }
//!
//! let written = pipeline.run(&[PathBuf::from(".gitlab-ci.yml")])?;
//! println!("wrote {} file(s)", written.len());
//! # Ok(())
//! # }
//! ```

pub mod checker;
pub mod cli;
pub mod config;
pub mod dialect;
pub mod document;
pub mod error;
pub mod extractors;
pub mod fs;
pub mod pipeline;
pub mod placeholder;
pub mod progress;
pub mod sandbox;
pub mod selector;
pub mod util;

pub use checker::Checker;
pub use config::{ConfigError, ShellcheckConfig};
pub use dialect::Dialect;
pub use document::parse_documents;
pub use error::{ExtractError, SchemaError, SourceError};
pub use extractors::Scripts;
pub use pipeline::Pipeline;
pub use placeholder::Placeholder;
pub use selector::{classify, select, Selection};
pub use util::{init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
