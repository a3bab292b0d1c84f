// Inner modules
mod connect_key_value;
mod connector_task_id;
mod task_config_batch;
mod task_type;

// Exports
pub use connect_key_value::ConnectKeyValue;
pub use connector_task_id::ConnectorTaskId;
pub use task_config_batch::TaskConfigBatch;
pub use task_type::TaskType;
