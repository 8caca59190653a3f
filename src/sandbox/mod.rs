//! The output tree extracted scripts are written into

pub mod materialize;
pub mod path;
pub mod workdir;

pub use materialize::Materializer;
pub use path::sanitize;
pub use workdir::Workdir;
