//! Logging-based progress handler

use super::{ProgressEvent, ProgressHandler};
use tracing::{debug, error, info, warn};

/// Handler that logs progress events using tracing
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingHandler;

impl ProgressHandler for LoggingHandler {
    fn on_progress(&self, event: &ProgressEvent) {
        match event {
            ProgressEvent::DialectSelected {
                source,
                dialect,
                document,
            } => {
                info!(document, "read {} as {} config...", source, dialect);
            }
            ProgressEvent::ExtraDocumentsIgnored { source, count } => {
                warn!(
                    source = %source,
                    ignored = count,
                    "multiple documents present, only the first is inspected"
                );
            }
            ProgressEvent::ScriptExtracted { key, script } => {
                debug!(key = %key, "extracted script:\n{}", script);
            }
            ProgressEvent::StepSkipped { key, reason } => {
                info!(key = %key, "skipping step: {}", reason);
            }
            ProgressEvent::FileWritten { path } => {
                debug!("wrote file {}", path.display());
            }
            ProgressEvent::FileFailed { source, error } => {
                error!(source = %source, "{}", error);
            }
            ProgressEvent::Completed { sources, files } => {
                debug!(sources, files, "extraction complete");
            }
        }
    }
}
