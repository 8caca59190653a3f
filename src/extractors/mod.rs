// Script extraction for each supported CI dialect
//
// Every extractor turns one parsed document into an ordered mapping from job
// key to script text. Expression placeholders are normalized inside the
// extractor, before any shebang is added.

pub mod ansible;
pub mod bitbucket;
pub mod circleci;
pub mod drone;
pub mod github;
pub mod gitlab;
pub mod walk;

use crate::error::ExtractError;
use indexmap::map::Entry;
use indexmap::IndexMap;
use serde_yaml::Value;

/// Extracted scripts keyed by job path, in extraction order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scripts {
    entries: IndexMap<String, String>,
}

impl Scripts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a script; an existing key is an error, never overwritten
    pub fn insert(&mut self, key: impl Into<String>, script: String) -> Result<(), ExtractError> {
        match self.entries.entry(key.into()) {
            Entry::Occupied(entry) => Err(ExtractError::DuplicateKey(entry.key().clone())),
            Entry::Vacant(entry) => {
                entry.insert(script);
                Ok(())
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Joins path segments and a terminal section into a job key
pub(crate) fn job_key(path: &[String], leaf: &str) -> String {
    let mut segments: Vec<&str> = path.iter().map(String::as_str).collect();
    segments.push(leaf);
    segments.join("/")
}

/// Renders a mapping key as a path segment
pub(crate) fn key_segment(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

/// String form of a scalar, `None` for collections and null
pub(crate) fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

pub(crate) fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "list",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

pub(crate) fn unexpected(key: &str, expected: &'static str, found: &Value) -> ExtractError {
    ExtractError::UnexpectedShape {
        key: key.to_string(),
        expected,
        found: kind(found),
    }
}

/// Newline-joins a list that must contain only strings
pub(crate) fn join_lines(items: &[Value], key: &str) -> Result<String, ExtractError> {
    let lines = items
        .iter()
        .map(|item| {
            item.as_str()
                .ok_or_else(|| unexpected(key, "list of strings", item))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(lines.join("\n"))
}
