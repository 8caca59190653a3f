//! Supported CI configuration dialects

use crate::error::ExtractError;
use crate::extractors::{ansible, bitbucket, circleci, drone, github, gitlab, Scripts};
use crate::progress::ProgressHandler;
use serde_yaml::Value;
use std::fmt;

/// The closed set of CI dialects scripts can be extracted from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// Bitbucket Pipelines, `pipelines.**.script`
    Bitbucket,
    /// GitHub Actions workflow, `jobs.**.run`
    GitHubWorkflow,
    /// GitHub composite action, `runs.**.run`
    GitHubAction,
    /// CircleCI, `jobs.*.steps[].run`
    CircleCi,
    /// Drone CI, `steps[].commands[]`
    Drone,
    /// Ansible task list, `shell` tasks
    Ansible,
    /// GitLab CI, flat job mapping with script sections
    GitLab,
}

impl Dialect {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bitbucket => "Bitbucket Pipelines",
            Self::GitHubWorkflow => "GitHub Actions",
            Self::GitHubAction => "GitHub Actions (action)",
            Self::CircleCi => "CircleCI",
            Self::Drone => "Drone CI",
            Self::Ansible => "Ansible",
            Self::GitLab => "GitLab CI",
        }
    }

    pub fn all_variants() -> &'static [Self] {
        &[
            Self::Bitbucket,
            Self::GitHubWorkflow,
            Self::GitHubAction,
            Self::CircleCi,
            Self::Drone,
            Self::Ansible,
            Self::GitLab,
        ]
    }

    /// Runs this dialect's extractor over one document
    pub fn extract(
        &self,
        document: &Value,
        progress: &dyn ProgressHandler,
    ) -> Result<Scripts, ExtractError> {
        match self {
            Self::Bitbucket => bitbucket::extract(document),
            Self::GitHubWorkflow => github::extract_workflow(document),
            Self::GitHubAction => github::extract_action(document),
            Self::CircleCi => circleci::extract(document, progress),
            Self::Drone => drone::extract(document, progress),
            Self::Ansible => ansible::extract(document, progress),
            Self::GitLab => gitlab::extract(document),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
