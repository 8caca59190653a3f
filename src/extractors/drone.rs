//! Drone CI extraction, `steps[].commands[]`

use super::{join_lines, scalar_string, unexpected, Scripts};
use crate::error::ExtractError;
use crate::progress::{ProgressEvent, ProgressHandler};
use serde_yaml::Value;

const DEFAULT_PIPELINE_NAME: &str = "unknown";

pub fn extract(document: &Value, progress: &dyn ProgressHandler) -> Result<Scripts, ExtractError> {
    let mut scripts = Scripts::new();
    let Some(steps) = document.get("steps").and_then(Value::as_sequence) else {
        return Ok(scripts);
    };

    let prefix = document
        .get("name")
        .and_then(scalar_string)
        .unwrap_or_else(|| DEFAULT_PIPELINE_NAME.to_string());

    for (index, step) in steps.iter().enumerate() {
        let section = step
            .get("name")
            .and_then(scalar_string)
            .unwrap_or_else(|| index.to_string());
        let key = format!("{}/{}", prefix, section);

        let script = match step.get("commands") {
            None | Some(Value::Null) => {
                progress.on_progress(&ProgressEvent::StepSkipped {
                    key,
                    reason: "step without commands".to_string(),
                });
                continue;
            }
            Some(Value::Sequence(commands)) => join_lines(commands, &key)?,
            Some(Value::String(command)) => command.clone(),
            Some(other) => return Err(unexpected(&key, "list of commands", other)),
        };
        scripts.insert(key, script)?;
    }

    Ok(scripts)
}
