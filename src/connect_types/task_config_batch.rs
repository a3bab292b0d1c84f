use super::ConnectKeyValue;

/// All the Task configurations of a Connector, as derived at a given point in time.
///
/// A batch is never patched: every recomputation produces a new one, replacing the previous.
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct TaskConfigBatch {
    /// Milliseconds timestamp shared by every Task configuration in the batch.
    pub update_timestamp: i64,

    /// Task configurations, where the one at position `N` is the one of Task `N`.
    pub tasks: Vec<ConnectKeyValue>,
}

impl TaskConfigBatch {
    pub(crate) fn new(update_timestamp: i64, tasks: Vec<ConnectKeyValue>) -> Self {
        Self {
            update_timestamp,
            tasks,
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
