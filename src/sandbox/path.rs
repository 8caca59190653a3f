//! Confinement of job keys and source names to the sandbox
//!
//! Source names and job keys come straight from user input and CI files. They
//! are reduced to plain relative segments so that nothing written for them can
//! land outside the sandbox root.

use std::path::PathBuf;

/// Namespace for sources given as absolute paths
pub const ROOT_SEGMENT: &str = "__root__";

/// Used when a job key has no usable segment left
const EMPTY_KEY_SEGMENT: &str = "_";

/// Maps a source file name and job key to a sandbox-relative path
pub fn sanitize(source: &str, job_key: &str) -> PathBuf {
    let mut path = PathBuf::new();

    if let Some(drive) = absolute_root(source) {
        path.push(ROOT_SEGMENT);
        if let Some(drive) = drive {
            path.push(drive.to_string());
        }
    }
    let source = strip_drive(source);
    for segment in segments(source) {
        path.push(segment);
    }

    let mut key_segments = segments(job_key).peekable();
    if key_segments.peek().is_none() {
        path.push(EMPTY_KEY_SEGMENT);
    }
    for segment in key_segments {
        path.push(segment);
    }

    path
}

/// `Some(drive)` for absolute paths; `drive` is set for `C:\`-style roots
fn absolute_root(source: &str) -> Option<Option<char>> {
    if source.starts_with('/') || source.starts_with('\\') {
        return Some(None);
    }
    let mut chars = source.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(drive), Some(':'), Some('/' | '\\')) if drive.is_ascii_alphabetic() => {
            Some(Some(drive))
        }
        _ => None,
    }
}

fn strip_drive(source: &str) -> &str {
    match absolute_root(source) {
        Some(Some(_)) => &source[2..],
        _ => source,
    }
}

/// Plain segments of a `/` or `\` separated path, without `.` and `..`
fn segments(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(['/', '\\'])
        .filter(|segment| !segment.is_empty() && *segment != "." && *segment != "..")
}
