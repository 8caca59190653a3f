//! Ansible extraction of `shell` tasks
//!
//! Jinja templates are not evaluated: expressions become a shell variable,
//! statements (`{% ... %}`) are left as they are.

use super::{job_key, unexpected, Scripts};
use crate::error::ExtractError;
use crate::placeholder::Placeholder;
use crate::progress::{ProgressEvent, ProgressHandler};
use serde_yaml::{Mapping, Value};

/// Simple and fully qualified collection names of the shell module
const SHELL_MODULES: &[&str] = &["shell", "ansible.builtin.shell"];

/// Keys holding nested task lists
const TASK_LISTS: &[&str] = &[
    "tasks",
    "block",
    "rescue",
    "always",
    "pre_tasks",
    "post_tasks",
    "handlers",
];

pub fn extract(document: &Value, progress: &dyn ProgressHandler) -> Result<Scripts, ExtractError> {
    let mut scripts = Scripts::new();
    if let Some(tasks) = document.as_sequence() {
        collect_tasks(tasks, &[], &mut scripts, progress)?;
    }
    Ok(scripts)
}

fn collect_tasks(
    tasks: &[Value],
    path: &[String],
    scripts: &mut Scripts,
    progress: &dyn ProgressHandler,
) -> Result<(), ExtractError> {
    for (index, task) in tasks.iter().enumerate() {
        let Some(task) = task.as_mapping() else {
            continue;
        };

        let mut task_path = path.to_vec();
        task_path.push(index.to_string());
        for module in SHELL_MODULES {
            let Some(value) = task.get(*module) else {
                continue;
            };
            let key = job_key(&task_path, module);
            if let Some(script) = shell_script(task, value, &key, progress)? {
                scripts.insert(key, script)?;
            }
        }

        for list in TASK_LISTS {
            let Some(children) = task.get(*list).and_then(Value::as_sequence) else {
                continue;
            };
            let mut child_path = path.to_vec();
            child_path.push(nested_segment(list, index));
            collect_tasks(children, &child_path, scripts, progress)?;
        }
    }
    Ok(())
}

/// Path segment for a nested task list: plain index for `tasks`, `<key>-index` otherwise
fn nested_segment(list: &str, index: usize) -> String {
    if list == "tasks" {
        index.to_string()
    } else {
        format!("{}-{}", list, index)
    }
}

/// Script of one shell task, `None` when it runs a non-shell interpreter
fn shell_script(
    task: &Mapping,
    value: &Value,
    key: &str,
    progress: &dyn ProgressHandler,
) -> Result<Option<String>, ExtractError> {
    let (script, module_executable) = match value {
        Value::String(script) => (script.as_str(), None),
        Value::Mapping(params) => match params.get("cmd") {
            Some(Value::String(cmd)) => (
                cmd.as_str(),
                params.get("executable").and_then(Value::as_str),
            ),
            _ => return Err(unexpected(key, "string or mapping with cmd", value)),
        },
        other => return Err(unexpected(key, "string or mapping with cmd", other)),
    };

    let script = Placeholder::JinjaExpression.apply(script);

    let executable = task
        .get("args")
        .and_then(|args| args.get("executable"))
        .and_then(Value::as_str)
        .or(module_executable);

    match executable {
        Some(executable) if !executable.contains("sh") => {
            progress.on_progress(&ProgressEvent::StepSkipped {
                key: key.to_string(),
                reason: format!("unsupported shell {}", executable),
            });
            Ok(None)
        }
        Some(executable) => Ok(Some(format!("#!{}\n{}", executable, script))),
        None => Ok(Some(script)),
    }
}
