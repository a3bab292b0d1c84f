use crate::connect_types::{ConnectKeyValue, TaskConfigBatch, TaskType};
use crate::constants::{
    CONNECTOR_DIRECT_ENABLE, CONNECT_TOPICNAME, CONNECT_TOPICNAMES, SINK_TASK_CLASS,
    SOURCE_TASK_CLASS, TASK_CLASS, TASK_ID, TASK_TYPE, TRANSFORMS, UPDATE_TIMESTAMP,
};

/// Expand the partial Task configurations of a Connector into its [`TaskConfigBatch`].
///
/// Every Worker in the cluster computes this independently: given the same inputs,
/// the output must be the same, so this does no I/O and reads no clock.
///
/// Each entry of `partial_configs` becomes the Task with the same index, and is enriched with:
///
/// * the Task index, `task_class` and `current_timestamp`
/// * `task-type` `DIRECT` and the source/sink task classes, if direct mode is enabled in the
///   `persisted` Connector configuration
/// * topic name(s) and all the transform-chain keys, from the `configs` of the Connector
///
/// Source/sink task classes (in direct mode) and topic name(s) always come from the Connector
/// configuration: if missing there, they are removed from the Task configuration too.
///
/// # Arguments
///
/// * `persisted` - Connector configuration as previously persisted: only used to resolve direct mode
/// * `configs` - Connector configuration being applied
/// * `task_class` - Task implementation declared by the Connector
/// * `current_timestamp` - Milliseconds timestamp stamped on every Task configuration
/// * `partial_configs` - Task configurations, as split by the Connector
pub fn generate_task_configs(
    persisted: &ConnectKeyValue,
    configs: &ConnectKeyValue,
    task_class: &str,
    current_timestamp: i64,
    partial_configs: Vec<ConnectKeyValue>,
) -> TaskConfigBatch {
    let direct_enabled = persisted.get_bool(CONNECTOR_DIRECT_ENABLE);

    let tasks = partial_configs
        .into_iter()
        .enumerate()
        .map(|(task_id, mut task_config)| {
            if direct_enabled {
                task_config.put(TASK_TYPE, TaskType::Direct);
                copy_or_clear(persisted, &mut task_config, SOURCE_TASK_CLASS);
                copy_or_clear(persisted, &mut task_config, SINK_TASK_CLASS);
            }

            task_config.put(TASK_ID, task_id);
            task_config.put(TASK_CLASS, task_class);
            task_config.put(UPDATE_TIMESTAMP, current_timestamp);

            copy_or_clear(configs, &mut task_config, CONNECT_TOPICNAME);
            copy_or_clear(configs, &mut task_config, CONNECT_TOPICNAMES);
            for (k, v) in configs.iter().filter(|(k, _)| k.starts_with(TRANSFORMS)) {
                task_config.put(k.as_str(), v);
            }

            task_config
        })
        .collect();

    TaskConfigBatch::new(current_timestamp, tasks)
}

/// Set `key` to the value it has in `from`, or remove it if `from` doesn't have it.
fn copy_or_clear(from: &ConnectKeyValue, to: &mut ConnectKeyValue, key: &str) {
    match from.get_string(key) {
        Some(v) => to.put(key, v),
        None => to.remove(key),
    };
}
