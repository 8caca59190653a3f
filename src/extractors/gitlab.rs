//! GitLab CI extraction
//!
//! GitLab files are flat: many small jobs at the top level, each with up to
//! three script sections. Variables are exported ahead of every section so the
//! checker knows they are set.

use super::{key_segment, scalar_string, unexpected, Scripts};
use crate::error::ExtractError;
use crate::placeholder::Placeholder;
use indexmap::IndexMap;
use serde_yaml::Value;

/// Top-level keywords that are not jobs
const RESERVED_KEYWORDS: &[&str] = &[
    "variables",
    "include",
    "stages",
    "workflow",
    "spec",
    "image",
    "services",
    "cache",
];

const SECTIONS: &[&str] = &["script", "before_script", "after_script"];

pub fn extract(document: &Value) -> Result<Scripts, ExtractError> {
    let mut scripts = Scripts::new();
    let Some(root) = document.as_mapping() else {
        return Ok(scripts);
    };

    let global = variables_of(root.get("variables"), "variables")?;

    for (job_key, job) in root {
        let name = key_segment(job_key);
        if RESERVED_KEYWORDS.contains(&name.as_str()) {
            continue;
        }
        let Some(job) = job.as_mapping() else {
            continue;
        };

        let mut variables = global.clone();
        variables.extend(variables_of(
            job.get("variables"),
            &format!("{}/variables", name),
        )?);
        let preamble = export_preamble(&variables);

        for section in SECTIONS {
            let Some(content) = job.get(*section) else {
                continue;
            };
            let key = format!("{}/{}", name, section);
            let body = flatten(content, &key)?;
            let script = Placeholder::GitLabInput.apply(&format!("{}{}", preamble, body));
            scripts.insert(key, script)?;
        }
    }

    Ok(scripts)
}

/// Reads a `variables` mapping; `{value: ...}` entries use their value
fn variables_of(value: Option<&Value>, key: &str) -> Result<IndexMap<String, String>, ExtractError> {
    let mut variables = IndexMap::new();
    let mapping = match value {
        None | Some(Value::Null) => return Ok(variables),
        Some(Value::Mapping(mapping)) => mapping,
        Some(other) => return Err(unexpected(key, "mapping", other)),
    };

    for (name, value) in mapping {
        let value = match value {
            Value::Mapping(definition) => definition.get("value").and_then(scalar_string),
            other => scalar_string(other),
        };
        variables.insert(key_segment(name), value.unwrap_or_default());
    }
    Ok(variables)
}

fn export_preamble(variables: &IndexMap<String, String>) -> String {
    variables
        .iter()
        .map(|(name, value)| {
            let value = value.replace('\\', "\\\\").replace('"', "\\\"");
            format!("export {}=\"{}\"\n", name, value)
        })
        .collect()
}

/// Flattens a section of strings and nested string lists
fn flatten(value: &Value, key: &str) -> Result<String, ExtractError> {
    match value {
        Value::String(line) => Ok(line.clone()),
        Value::Sequence(items) => Ok(items
            .iter()
            .map(|item| flatten(item, key))
            .collect::<Result<Vec<_>, _>>()?
            .join("\n")),
        other => Err(unexpected(key, "string or list of strings", other)),
    }
}
