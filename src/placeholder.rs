//! Replacement of template expressions with inert shell variables
//!
//! CI dialects embed their own expression syntax inside scripts (`${{ }}`,
//! `<< >>`, `{{ }}`, `$[[ ]]`). None of these are evaluated here; every span is
//! swapped for a fixed variable reference so the checker sees valid shell.

use regex::{NoExpand, Regex};
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// GitHub Actions context expressions, `${{ github.ref }}`
    GitHubExpression,
    /// CircleCI pipeline parameters, `<< parameters.name >>`
    CircleCiParameter,
    /// Jinja expressions in Ansible tasks, `{{ item }}`
    JinjaExpression,
    /// GitLab CI/CD inputs, `$[[ inputs.stage ]]`
    GitLabInput,
}

impl Placeholder {
    pub fn replacement(&self) -> &'static str {
        match self {
            Self::GitHubExpression => "$ACTION_EXPRESSION",
            Self::CircleCiParameter => "\"$PARAMETER\"",
            Self::JinjaExpression => "$JINJA_EXPRESSION",
            Self::GitLabInput => "$INPUT_PARAMETER",
        }
    }

    fn pattern(&self) -> &'static Regex {
        static GITHUB: OnceLock<Regex> = OnceLock::new();
        static CIRCLECI: OnceLock<Regex> = OnceLock::new();
        static JINJA: OnceLock<Regex> = OnceLock::new();
        static GITLAB: OnceLock<Regex> = OnceLock::new();

        match self {
            Self::GitHubExpression => {
                GITHUB.get_or_init(|| Regex::new(r"(?s)\$\{\{.*?\}\}").expect("valid regex"))
            }
            Self::CircleCiParameter => {
                CIRCLECI.get_or_init(|| Regex::new(r"<<\s*[^\s>]*\s*>>").expect("valid regex"))
            }
            Self::JinjaExpression => {
                JINJA.get_or_init(|| Regex::new(r"(?s)\{\{.*?\}\}").expect("valid regex"))
            }
            Self::GitLabInput => GITLAB.get_or_init(|| {
                Regex::new(r"\$\[\[\s*inputs\.[^\]]*\]\]").expect("valid regex")
            }),
        }
    }

    /// Replaces every expression span in `script`
    pub fn apply(&self, script: &str) -> String {
        self.pattern()
            .replace_all(script, NoExpand(self.replacement()))
            .into_owned()
    }
}
