use super::errors::{ConfigError, ConfigResult};
use super::generator::generate_task_configs;
use crate::connect_types::{ConnectKeyValue, TaskConfigBatch};
use crate::constants::{DEFAULT_MAX_TASK, MAX_TASK};
use crate::internals::Connector;

/// Keeps the Connector configurations and the Task configurations derived from them.
///
/// All the Workers in a cluster must hold the same configurations: implementors are
/// responsible for persisting (and replicating) them.
pub trait ConfigManagementService {
    /// Connector configuration, as currently persisted.
    async fn connector_config(&self, connector_name: &str) -> Option<ConnectKeyValue>;

    /// Persist the Task configurations of the Connector, replacing whatever was persisted before.
    async fn put_task_configs(&self, connector_name: &str, batch: TaskConfigBatch) -> ConfigResult<()>;

    /// Derive the Task configurations of the Connector from `configs`, and persist them.
    ///
    /// The Connector is asked to split its work in (at most) `max-task` Task configurations;
    /// these are then expanded via [`generate_task_configs`], using the persisted Connector
    /// configuration to resolve direct mode.
    ///
    /// # Arguments
    ///
    /// * `connector_name` - Name of the Connector
    /// * `connector` - The Connector, that splits its work in Tasks
    /// * `current_timestamp` - Milliseconds timestamp stamped on every Task configuration
    /// * `configs` - Connector configuration being applied
    async fn recompute_task_configs<C>(
        &self,
        connector_name: &str,
        connector: &C,
        current_timestamp: i64,
        configs: &ConnectKeyValue,
    ) -> ConfigResult<()>
    where
        C: Connector + ?Sized,
    {
        let max_task = configs.get_int(MAX_TASK, DEFAULT_MAX_TASK);
        let persisted = self
            .connector_config(connector_name)
            .await
            .ok_or_else(|| ConfigError::ConnectorConfigNotFound(connector_name.to_string()))?;

        let partial_configs = connector.task_configs(max_task);
        trace!(
            "Connector '{connector_name}' split in {} task configurations (max-task: {max_task})",
            partial_configs.len()
        );

        let batch = generate_task_configs(
            &persisted,
            configs,
            connector.task_class(),
            current_timestamp,
            partial_configs,
        );

        self.put_task_configs(connector_name, batch).await
    }
}
