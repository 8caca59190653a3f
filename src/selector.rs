//! Schema selection: which dialect a source is written in
//!
//! CI files carry no schema marker, so the dialect is guessed from signature
//! keys. The checks run in a fixed priority order and the first match wins.

use crate::dialect::Dialect;
use crate::error::SchemaError;
use crate::progress::{ProgressEvent, ProgressHandler};
use serde_yaml::{Mapping, Value};

/// The chosen dialect and the index of the document to extract from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub dialect: Dialect,
    pub document: usize,
}

pub fn select(
    source: &str,
    documents: &[Value],
    progress: &dyn ProgressHandler,
) -> Result<Selection, SchemaError> {
    let index = match documents {
        [] => return Err(SchemaError::NoDocument),
        [header, _] if has_keys(header, &["spec"]) => 1,
        [_] => 0,
        [_, rest @ ..] => {
            progress.on_progress(&ProgressEvent::ExtraDocumentsIgnored {
                source: source.to_string(),
                count: rest.len(),
            });
            0
        }
    };

    let dialect = classify(&documents[index]).ok_or(SchemaError::UnknownDialect)?;
    progress.on_progress(&ProgressEvent::DialectSelected {
        source: source.to_string(),
        dialect,
        document: index,
    });

    Ok(Selection {
        dialect,
        document: index,
    })
}

/// Determines the dialect of a single document from its shape
pub fn classify(document: &Value) -> Option<Dialect> {
    match document {
        Value::Mapping(mapping) => Some(classify_mapping(mapping)),
        Value::Sequence(_) => Some(Dialect::Ansible),
        _ => None,
    }
}

fn classify_mapping(mapping: &Mapping) -> Dialect {
    let has = |keys: &[&str]| keys.iter().all(|key| mapping.contains_key(*key));

    if has(&["pipelines"]) {
        Dialect::Bitbucket
    } else if has(&["on", "jobs"]) {
        Dialect::GitHubWorkflow
    } else if has(&["inputs", "runs"]) {
        Dialect::GitHubAction
    } else if has(&["version", "jobs"]) {
        Dialect::CircleCi
    } else if has(&["steps", "kind", "type"]) {
        Dialect::Drone
    } else {
        // GitLab files have no distinguishing keys, so it is the fallback
        Dialect::GitLab
    }
}

fn has_keys(document: &Value, keys: &[&str]) -> bool {
    document
        .as_mapping()
        .map(|mapping| keys.iter().all(|key| mapping.contains_key(*key)))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parse_documents;
    use crate::progress::{NoOpHandler, RecordingHandler};
    use yare::parameterized;

    fn parse(yaml: &str) -> Value {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[parameterized(
        bitbucket = { "pipelines: {default: []}", Dialect::Bitbucket },
        bitbucket_wins_over_github = { "{pipelines: {}, on: push, jobs: {}}", Dialect::Bitbucket },
        github_workflow = { "{on: push, jobs: {}}", Dialect::GitHubWorkflow },
        github_action = { "{inputs: {}, runs: {using: composite}}", Dialect::GitHubAction },
        github_wins_over_circleci = { "{on: push, version: 2, jobs: {}}", Dialect::GitHubWorkflow },
        circleci = { "{version: 2.1, jobs: {}}", Dialect::CircleCi },
        drone = { "{kind: pipeline, type: docker, steps: []}", Dialect::Drone },
        drone_needs_all_keys = { "{kind: pipeline, steps: []}", Dialect::GitLab },
        ansible = { "[{shell: ls}]", Dialect::Ansible },
        gitlab = { "{build: {script: make}}", Dialect::GitLab },
        gitlab_jobs_without_version = { "{jobs: {}}", Dialect::GitLab },
    )]
    fn test_classify(yaml: &str, expected: Dialect) {
        assert_eq!(classify(&parse(yaml)), Some(expected));
    }

    #[test]
    fn test_classify_scalar_fails() {
        assert_eq!(classify(&parse("just text")), None);
        assert_eq!(classify(&Value::Null), None);
    }

    #[test]
    fn test_no_document() {
        let err = select("empty.yml", &[], &NoOpHandler).unwrap_err();
        assert!(matches!(err, SchemaError::NoDocument));
    }

    #[test]
    fn test_scalar_document() {
        let err = select("scalar.yml", &[parse("42")], &NoOpHandler).unwrap_err();
        assert!(matches!(err, SchemaError::UnknownDialect));
    }

    #[test]
    fn test_spec_header_selects_second_document() {
        let documents = vec![parse("{spec: {}}"), parse("{build: {script: [make]}}")];
        let selection = select("ci.yml", &documents, &NoOpHandler).unwrap();
        assert_eq!(
            selection,
            Selection {
                dialect: Dialect::GitLab,
                document: 1,
            }
        );
    }

    #[test]
    fn test_spec_header_with_unclassifiable_content() {
        let documents = vec![parse("{spec: {}}"), parse("plain")];
        let err = select("ci.yml", &documents, &NoOpHandler).unwrap_err();
        assert!(matches!(err, SchemaError::UnknownDialect));
    }

    #[test]
    fn test_extra_documents_warn_and_use_first() {
        let documents = parse_documents("pipelines: {}\n---\na: 1\n---\nb: 2\n").unwrap();
        let progress = RecordingHandler::new();
        let selection = select("multi.yml", &documents, &progress).unwrap();

        assert_eq!(selection.dialect, Dialect::Bitbucket);
        assert_eq!(selection.document, 0);
        assert_eq!(
            progress.events(),
            vec![
                ProgressEvent::ExtraDocumentsIgnored {
                    source: "multi.yml".to_string(),
                    count: 2,
                },
                ProgressEvent::DialectSelected {
                    source: "multi.yml".to_string(),
                    dialect: Dialect::Bitbucket,
                    document: 0,
                },
            ]
        );
    }

    #[test]
    fn test_three_documents_with_spec_header_use_first() {
        let documents = vec![parse("{spec: {}}"), parse("{a: {}}"), parse("{b: {}}")];
        let selection = select("ci.yml", &documents, &NoOpHandler).unwrap();
        assert_eq!(selection.document, 0);
        assert_eq!(selection.dialect, Dialect::GitLab);
    }

    #[test]
    fn test_selection_does_not_mutate_input() {
        let documents = vec![parse("{on: push, jobs: {a: {}}}")];
        let before = documents.clone();
        select("wf.yml", &documents, &NoOpHandler).unwrap();
        assert_eq!(documents, before);
    }
}
