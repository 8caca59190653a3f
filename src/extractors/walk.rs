//! Depth-first traversal of a value tree
//!
//! Dialects whose scripts can sit at any depth (Bitbucket, GitHub) share this
//! walker and only supply the per-node rule.

use super::key_segment;
use crate::error::ExtractError;
use serde_yaml::{Mapping, Value};

/// Visits every mapping reachable from `root`
///
/// `visit` receives each mapping together with its path from the entry point.
/// Mapping children are descended into by key, list elements by index; keys in
/// `skip_keys` are not descended into. Scalars and null end the recursion.
pub fn walk<V>(
    root: &Value,
    entry: &str,
    skip_keys: &[&str],
    visit: &mut V,
) -> Result<(), ExtractError>
where
    V: FnMut(&Mapping, &[String]) -> Result<(), ExtractError>,
{
    let mut path = vec![entry.to_string()];
    descend(root, &mut path, skip_keys, visit)
}

fn descend<V>(
    value: &Value,
    path: &mut Vec<String>,
    skip_keys: &[&str],
    visit: &mut V,
) -> Result<(), ExtractError>
where
    V: FnMut(&Mapping, &[String]) -> Result<(), ExtractError>,
{
    match value {
        Value::Mapping(mapping) => {
            visit(mapping, path.as_slice())?;
            for (key, child) in mapping {
                let segment = key_segment(key);
                if skip_keys.contains(&segment.as_str()) {
                    continue;
                }
                path.push(segment);
                descend(child, path, skip_keys, visit)?;
                path.pop();
            }
        }
        Value::Sequence(items) => {
            for (index, item) in items.iter().enumerate() {
                path.push(index.to_string());
                descend(item, path, skip_keys, visit)?;
                path.pop();
            }
        }
        Value::Tagged(tagged) => descend(&tagged.value, path, skip_keys, visit)?,
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
    }
    Ok(())
}
