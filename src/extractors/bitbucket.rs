//! Bitbucket Pipelines extraction
//!
//! Pipelines are deeply nested and have no published schema, so every
//! `script` element under `pipelines` is collected (`pipelines.**.script`).

use super::walk::walk;
use super::{job_key, Scripts};
use crate::error::ExtractError;
use serde_yaml::{Mapping, Value};

const ENTRY: &str = "pipelines";

pub fn extract(document: &Value) -> Result<Scripts, ExtractError> {
    let mut scripts = Scripts::new();
    let Some(pipelines) = document.get(ENTRY) else {
        return Ok(scripts);
    };

    walk(pipelines, ENTRY, &[], &mut |node, path| {
        if let Some(script) = script_of(node) {
            scripts.insert(job_key(path, "script"), script)?;
        }
        Ok(())
    })?;

    Ok(scripts)
}

/// Script text of a node bearing a `script` key
///
/// List items that are not strings (`pipe:` declarations) are not shell and
/// are left out.
pub fn script_of(node: &Mapping) -> Option<String> {
    match node.get("script")? {
        Value::String(script) => Some(script.clone()),
        Value::Sequence(items) => {
            let lines: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            if lines.is_empty() {
                None
            } else {
                Some(lines.join("\n"))
            }
        }
        _ => None,
    }
}
