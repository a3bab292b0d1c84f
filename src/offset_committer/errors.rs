use thiserror::Error;
use tokio::task::JoinError;

use crate::connect_types::ConnectorTaskId;

/// Possible errors from the [`super::SourceTaskOffsetCommitter`].
#[derive(Error, Debug)]
pub enum CommitterError {
    /// [`super::SourceTaskOffsetCommitter::close`] was called: no new offset commits can be scheduled.
    #[error("Offset committer is closed: can't schedule offset commits for task '{0}'")]
    Closed(ConnectorTaskId),

    /// Offset commits of a task did not stop cleanly while the task was being removed.
    #[error("Unexpected interruption while removing offset commits of task '{id}': {source}")]
    Interrupted {
        id: ConnectorTaskId,
        #[source]
        source: JoinError,
    },
}

pub type CommitterResult<T> = Result<T, CommitterError>;
