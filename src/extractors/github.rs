//! GitHub Actions extraction
//!
//! Workflows keep scripts at `jobs.<job_id>.steps[*].run`, composite actions at
//! `runs.steps[*].run`. Both are matched loosely as `jobs.**.run` and
//! `runs.**.run`.

use super::walk::walk;
use super::{job_key, unexpected, Scripts};
use crate::error::{ExtractError, SchemaError};
use crate::placeholder::Placeholder;
use serde_yaml::{Mapping, Value};

const WORKFLOW_ENTRY: &str = "jobs";
const ACTION_ENTRY: &str = "runs";

/// `defaults.run` configures the shell, it is not a script
const SKIPPED_KEYS: &[&str] = &["defaults"];

const DIALECT_NAME: &str = "GitHub Actions";

/// Extracts from a workflow or an action, whichever the document is
pub fn extract(document: &Value) -> Result<Scripts, ExtractError> {
    if document.get(WORKFLOW_ENTRY).is_some() {
        extract_workflow(document)
    } else if document.get(ACTION_ENTRY).is_some() {
        extract_action(document)
    } else {
        Err(no_attachment_point())
    }
}

pub fn extract_workflow(document: &Value) -> Result<Scripts, ExtractError> {
    extract_from(document, WORKFLOW_ENTRY)
}

/// Only composite actions run shell steps; other action kinds are rejected
pub fn extract_action(document: &Value) -> Result<Scripts, ExtractError> {
    let using = document
        .get(ACTION_ENTRY)
        .and_then(|runs| runs.get("using"))
        .and_then(Value::as_str);
    if let Some(using) = using {
        if !using.eq_ignore_ascii_case("composite") {
            return Err(SchemaError::Unsupported {
                dialect: DIALECT_NAME.to_string(),
                reason: format!("action runs using '{}' has no shell steps", using),
            }
            .into());
        }
    }
    extract_from(document, ACTION_ENTRY)
}

fn extract_from(document: &Value, entry: &str) -> Result<Scripts, ExtractError> {
    if !document.is_mapping() {
        return Err(no_attachment_point());
    }

    let mut scripts = Scripts::new();
    let Some(root) = document.get(entry) else {
        return Ok(scripts);
    };

    walk(root, entry, SKIPPED_KEYS, &mut |node, path| {
        let key = job_key(path, "run");
        if let Some(run) = run_of(node, &key)? {
            scripts.insert(key, Placeholder::GitHubExpression.apply(run))?;
        }
        Ok(())
    })?;

    Ok(scripts)
}

/// The `run` script of a node; a non-string `run` is an error
pub fn run_of<'a>(node: &'a Mapping, key: &str) -> Result<Option<&'a str>, ExtractError> {
    match node.get("run") {
        None => Ok(None),
        Some(Value::String(script)) => Ok(Some(script)),
        Some(other) => Err(unexpected(key, "string", other)),
    }
}

fn no_attachment_point() -> ExtractError {
    SchemaError::NoAttachmentPoint {
        dialect: DIALECT_NAME.to_string(),
    }
    .into()
}
