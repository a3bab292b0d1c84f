// Inner modules
mod committer;
mod errors;

use std::sync::Arc;

use prometheus::Registry;

use crate::config::WorkerConfig;

// Exports
pub use committer::SourceTaskOffsetCommitter;
pub use errors::{CommitterError, CommitterResult};

pub fn init(config: &WorkerConfig, metrics: Arc<Registry>) -> SourceTaskOffsetCommitter {
    let committer = SourceTaskOffsetCommitter::new(
        config.offset_commit_interval(),
        config.commit_parallelism as usize,
        metrics,
    );

    debug!("Initialized");
    committer
}
