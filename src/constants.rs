/// Maximum number of tasks a connector is allowed to run.
pub const MAX_TASK: &str = "max-task";

/// Default for [`MAX_TASK`], used when it's absent or can't be parsed.
pub const DEFAULT_MAX_TASK: i32 = 1;

/// When `"true"`, the connector runs pre-existing source and sink task implementations.
pub const CONNECTOR_DIRECT_ENABLE: &str = "connector.direct.enable";

/// Source task implementation used by a connector in direct mode.
pub const SOURCE_TASK_CLASS: &str = "source-task-class";

/// Sink task implementation used by a connector in direct mode.
pub const SINK_TASK_CLASS: &str = "sink-task-class";

/// Type of task, see [`crate::connect_types::TaskType`].
pub const TASK_TYPE: &str = "task-type";

/// Index of the task within its connector.
pub const TASK_ID: &str = "task-id";

/// Task implementation declared by the connector.
pub const TASK_CLASS: &str = "task-class";

/// Milliseconds timestamp of the recomputation that produced a task config.
pub const UPDATE_TIMESTAMP: &str = "update-timestamp";

/// Topic the connector reads from or writes to.
pub const CONNECT_TOPICNAME: &str = "connect-topicname";

/// Comma separated list of topics the connector reads from or writes to.
pub const CONNECT_TOPICNAMES: &str = "connect-topicnames";

/// Prefix shared by all the keys that define the transform chain.
pub const TRANSFORMS: &str = "transforms";

pub(crate) const DEFAULT_OFFSET_COMMIT_INTERVAL_MS: &str = "30000";
pub(crate) const DEFAULT_COMMIT_PARALLELISM: &str = "1";
pub(crate) const DEFAULT_SHUTDOWN_TIMEOUT_MS: &str = "5000";
