//! Progress reporting for extraction runs

mod handler;
mod logging;

pub use handler::{NoOpHandler, ProgressEvent, ProgressHandler, RecordingHandler};
pub use logging::LoggingHandler;
