//! Progress handler trait and events

use crate::dialect::Dialect;
use std::path::PathBuf;
use std::sync::Mutex;

/// Events emitted while sources are classified, extracted and materialized
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// A source was matched to a dialect
    DialectSelected {
        source: String,
        dialect: Dialect,
        document: usize,
    },

    /// Documents after the first were not inspected
    ExtraDocumentsIgnored { source: String, count: usize },

    /// A script was extracted under the given job key
    ScriptExtracted { key: String, script: String },

    /// A script-like node was deliberately not extracted
    StepSkipped { key: String, reason: String },

    /// A script file was written into the sandbox
    FileWritten { path: PathBuf },

    /// Processing a source failed; remaining sources continue
    FileFailed { source: String, error: String },

    /// All sources were processed
    Completed { sources: usize, files: usize },
}

/// Trait for handling progress events
pub trait ProgressHandler: Send + Sync {
    /// Called when a progress event occurs
    fn on_progress(&self, event: &ProgressEvent);
}

/// No-op handler that ignores all events
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpHandler;

impl ProgressHandler for NoOpHandler {
    fn on_progress(&self, _event: &ProgressEvent) {}
}

/// Handler that keeps every event, for asserting on diagnostics
#[derive(Debug, Default)]
pub struct RecordingHandler {
    events: Mutex<Vec<ProgressEvent>>,
}

impl RecordingHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub fn skipped(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ProgressEvent::StepSkipped { key, .. } => Some(key),
                _ => None,
            })
            .collect()
    }
}

impl ProgressHandler for RecordingHandler {
    fn on_progress(&self, event: &ProgressEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}
