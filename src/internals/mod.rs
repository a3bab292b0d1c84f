// Inner modules
mod connector;
mod source_task;

// Exports
pub use connector::Connector;
pub use source_task::{BoxError, SourceTask};
