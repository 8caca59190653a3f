//! Loading YAML sources into documents
//!
//! A source may hold several `---` separated documents. Merge keys (`<<`) are
//! resolved and tags are stripped so extractors only see plain values. GitLab's
//! `!reference [job, section]` cannot be resolved without the referenced file,
//! so it becomes a shell comment naming the reference.

use serde::Deserialize;
use serde_yaml::value::TaggedValue;
use serde_yaml::Value;

const REFERENCE_TAG: &str = "reference";

/// Parses every document of a YAML source
pub fn parse_documents(content: &str) -> Result<Vec<Value>, serde_yaml::Error> {
    let mut documents = Vec::new();
    for deserializer in serde_yaml::Deserializer::from_str(content) {
        let mut value = strip_tags(Value::deserialize(deserializer)?);
        value.apply_merge()?;
        documents.push(value);
    }
    // An empty or comment-only source loads as a single null document
    if matches!(documents.as_slice(), [Value::Null]) {
        documents.clear();
    }
    Ok(documents)
}

fn strip_tags(value: Value) -> Value {
    match value {
        Value::Tagged(tagged) => resolve_tag(*tagged),
        Value::Sequence(items) => Value::Sequence(items.into_iter().map(strip_tags).collect()),
        Value::Mapping(mapping) => Value::Mapping(
            mapping
                .into_iter()
                .map(|(key, value)| (strip_tags(key), strip_tags(value)))
                .collect(),
        ),
        other => other,
    }
}

fn resolve_tag(tagged: TaggedValue) -> Value {
    if tagged.tag == REFERENCE_TAG {
        if let Value::Sequence(items) = &tagged.value {
            let parts: Vec<String> = items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => serde_yaml::to_string(other)
                        .map(|s| s.trim_end().to_string())
                        .unwrap_or_default(),
                })
                .collect();
            return Value::String(format!("# !reference [{}]", parts.join(", ")));
        }
    }
    strip_tags(tagged.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_document() {
        let documents = parse_documents("jobs: {}\n").unwrap();
        assert_eq!(documents.len(), 1);
        assert!(documents[0].get("jobs").is_some());
    }

    #[test]
    fn test_multiple_documents() {
        let documents = parse_documents(
            r#"
spec:
  inputs:
    stage:
      default: test
---
job:
  script: echo hi
"#,
        )
        .unwrap();
        assert_eq!(documents.len(), 2);
        assert!(documents[0].get("spec").is_some());
        assert!(documents[1].get("job").is_some());
    }

    #[test]
    fn test_reference_tag_becomes_comment() {
        let documents = parse_documents(
            r#"
.setup:
  script:
    - echo setup
job:
  script:
    - !reference [.setup, script]
    - echo job
"#,
        )
        .unwrap();
        let script = documents[0]
            .get("job")
            .and_then(|job| job.get("script"))
            .and_then(Value::as_sequence)
            .unwrap();
        assert_eq!(script[0], Value::from("# !reference [.setup, script]"));
        assert_eq!(script[1], Value::from("echo job"));
    }

    #[test]
    fn test_unknown_tags_are_stripped() {
        let documents = parse_documents("value: !custom text\n").unwrap();
        assert_eq!(documents[0].get("value"), Some(&Value::from("text")));
    }

    #[test]
    fn test_merge_keys_are_resolved() {
        let documents = parse_documents(
            r#"
.base: &base
  image: alpine
  script: echo base
job:
  <<: *base
  stage: test
"#,
        )
        .unwrap();
        let job = documents[0].get("job").unwrap();
        assert_eq!(job.get("script"), Some(&Value::from("echo base")));
        assert!(job.get("<<").is_none());
    }

    #[test]
    fn test_empty_source_has_no_documents() {
        assert!(parse_documents("").unwrap().is_empty());
        assert!(parse_documents("# nothing here\n").unwrap().is_empty());
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        assert!(parse_documents("key: [unclosed").is_err());
    }
}
