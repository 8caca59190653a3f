//! CircleCI extraction, `jobs.*.steps[].run`

use super::{join_lines, key_segment, unexpected, Scripts};
use crate::error::ExtractError;
use crate::placeholder::Placeholder;
use crate::progress::{ProgressEvent, ProgressHandler};
use serde_yaml::Value;
use tracing::debug;

/// CircleCI's default shell, see "Default shell options"
pub const DEFAULT_SHELL: &str = "/bin/bash";

pub fn extract(document: &Value, progress: &dyn ProgressHandler) -> Result<Scripts, ExtractError> {
    let mut scripts = Scripts::new();
    let Some(jobs) = document.get("jobs").and_then(Value::as_mapping) else {
        return Ok(scripts);
    };

    for (job_key, job) in jobs {
        let job_name = key_segment(job_key);
        let Some(steps) = job.get("steps").and_then(Value::as_sequence) else {
            continue;
        };

        for (step_num, step) in steps.iter().enumerate() {
            let key = format!("{}/{}", job_name, step_num);
            let Some(run) = step.as_mapping().and_then(|step| step.get("run")) else {
                debug!(key = %key, "no run declaration");
                continue;
            };

            let Some(command) = run_command(run, &key)? else {
                progress.on_progress(&ProgressEvent::StepSkipped {
                    key,
                    reason: "run declaration without command".to_string(),
                });
                continue;
            };

            let script = Placeholder::CircleCiParameter.apply(&command.script);
            let shell = command.shell.as_deref().unwrap_or(DEFAULT_SHELL);
            scripts.insert(key, format!("#!{}\n{}", shell, script))?;
        }
    }

    Ok(scripts)
}

/// A `run` step resolved to its script and optional interpreter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunCommand {
    pub script: String,
    pub shell: Option<String>,
}

/// Resolves the three accepted shapes of `run`
///
/// Returns `None` for a mapping without `command`.
pub fn run_command(run: &Value, key: &str) -> Result<Option<RunCommand>, ExtractError> {
    match run {
        Value::String(script) => Ok(Some(RunCommand {
            script: script.clone(),
            shell: None,
        })),
        Value::Sequence(lines) => Ok(Some(RunCommand {
            script: join_lines(lines, key)?,
            shell: None,
        })),
        Value::Mapping(run) => {
            let Some(command) = run.get("command") else {
                return Ok(None);
            };
            let script = match command {
                Value::String(script) => script.clone(),
                Value::Sequence(lines) => join_lines(lines, key)?,
                other => return Err(unexpected(key, "string", other)),
            };
            let shell = match run.get("shell") {
                None | Some(Value::Null) => None,
                Some(Value::String(shell)) => Some(shell.clone()),
                Some(other) => return Err(unexpected(key, "string shell", other)),
            };
            Ok(Some(RunCommand { script, shell }))
        }
        other => Err(unexpected(key, "string, list or mapping", other)),
    }
}
