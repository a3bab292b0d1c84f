use std::collections::HashMap;

use tokio::sync::RwLock;

use super::errors::ConfigResult;
use super::service::ConfigManagementService;
use crate::connect_types::{ConnectKeyValue, TaskConfigBatch};

/// [`ConfigManagementService`] that keeps everything in memory.
///
/// Suitable for a standalone Worker, where there is no cluster to keep consistent.
#[derive(Debug, Default)]
pub struct MemoryConfigManagementService {
    connector_configs: RwLock<HashMap<String, ConnectKeyValue>>,
    task_configs: RwLock<HashMap<String, TaskConfigBatch>>,
}

impl MemoryConfigManagementService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the configuration of a Connector, returning the one it replaced (if any).
    pub async fn put_connector_config(
        &self,
        connector_name: &str,
        config: ConnectKeyValue,
    ) -> Option<ConnectKeyValue> {
        self.connector_configs.write().await.insert(connector_name.to_string(), config)
    }

    /// Forget a Connector: both its configuration and its Task configurations.
    pub async fn remove_connector_config(&self, connector_name: &str) -> Option<ConnectKeyValue> {
        self.task_configs.write().await.remove(connector_name);
        self.connector_configs.write().await.remove(connector_name)
    }

    /// Task configurations of a Connector, as last persisted.
    pub async fn task_configs(&self, connector_name: &str) -> Option<TaskConfigBatch> {
        self.task_configs.read().await.get(connector_name).cloned()
    }

    /// Names of all known Connectors, sorted.
    pub async fn connector_names(&self) -> Vec<String> {
        let mut names = self.connector_configs.read().await.keys().cloned().collect::<Vec<_>>();
        names.sort();
        names
    }
}

impl ConfigManagementService for MemoryConfigManagementService {
    async fn connector_config(&self, connector_name: &str) -> Option<ConnectKeyValue> {
        self.connector_configs.read().await.get(connector_name).cloned()
    }

    async fn put_task_configs(&self, connector_name: &str, batch: TaskConfigBatch) -> ConfigResult<()> {
        info!(
            "Updated task configurations of connector '{connector_name}': {} tasks at {}",
            batch.len(),
            batch.update_timestamp
        );
        self.task_configs.write().await.insert(connector_name.to_string(), batch);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::MemoryConfigManagementService;
    use crate::connect_types::{ConnectKeyValue, TaskConfigBatch};
    use crate::constants::*;
    use crate::task_configs::{ConfigError, ConfigManagementService, ConfigResult};
    use crate::test_util::MockConnector;

    const TASK_CLASS_NAME: &str = "org.example.FileSourceTask";

    fn make_connector() -> MockConnector {
        MockConnector::new(
            TASK_CLASS_NAME,
            vec![ConnectKeyValue::from([("a", "1")]), ConnectKeyValue::from([("b", "2")])],
        )
    }

    #[tokio::test]
    async fn should_recompute_and_persist_task_configs() {
        let service = MemoryConfigManagementService::new();
        let configs = ConnectKeyValue::new().with(MAX_TASK, 2).with(CONNECT_TOPICNAME, "T");
        service.put_connector_config("file-source", configs.clone()).await;
        let connector = make_connector();

        service.recompute_task_configs("file-source", &connector, 1000, &configs).await.unwrap();

        assert_eq!(connector.requested_max_tasks(), 2);
        let batch = service.task_configs("file-source").await.unwrap();
        assert_eq!(batch.update_timestamp, 1000);
        assert_eq!(batch.len(), 2);
        for (i, task) in batch.tasks.iter().enumerate() {
            assert_eq!(task.get_int(TASK_ID, -1), i as i32);
            assert_eq!(task.get_string(CONNECT_TOPICNAME), Some("T"));
            assert_eq!(task.get_long(UPDATE_TIMESTAMP, -1), 1000);
            assert_eq!(task.get_string(TASK_CLASS), Some(TASK_CLASS_NAME));
        }
    }

    #[tokio::test]
    async fn should_default_max_task() {
        let service = MemoryConfigManagementService::new();
        let connector = make_connector();

        for configs in [
            ConnectKeyValue::new(),
            ConnectKeyValue::new().with(MAX_TASK, "many"),
        ] {
            service.put_connector_config("c", configs.clone()).await;
            service.recompute_task_configs("c", &connector, 1000, &configs).await.unwrap();
            assert_eq!(connector.requested_max_tasks(), 1);
        }
    }

    #[tokio::test]
    async fn should_replace_previous_batch() {
        let service = MemoryConfigManagementService::new();
        let configs = ConnectKeyValue::new();
        service.put_connector_config("c", configs.clone()).await;

        service.recompute_task_configs("c", &make_connector(), 1000, &configs).await.unwrap();
        let single = MockConnector::new(TASK_CLASS_NAME, vec![ConnectKeyValue::from([("z", "9")])]);
        service.recompute_task_configs("c", &single, 2000, &configs).await.unwrap();

        let batch = service.task_configs("c").await.unwrap();
        assert_eq!(batch.update_timestamp, 2000);
        assert_eq!(batch.len(), 1);
        assert_eq!(batch.tasks[0].get_string("z"), Some("9"));
        assert!(!batch.tasks[0].contains_key("a"));
    }

    #[tokio::test]
    async fn should_fail_without_persisted_connector_config() {
        let service = MemoryConfigManagementService::new();

        let res = service
            .recompute_task_configs("unknown", &make_connector(), 1000, &ConnectKeyValue::new())
            .await;

        assert_eq!(res, Err(ConfigError::ConnectorConfigNotFound("unknown".to_string())));
        assert!(service.task_configs("unknown").await.is_none());
    }

    #[tokio::test]
    async fn should_forget_removed_connectors() {
        let service = MemoryConfigManagementService::new();
        let configs = ConnectKeyValue::new();
        service.put_connector_config("b", configs.clone()).await;
        service.put_connector_config("a", configs.clone()).await;
        service.recompute_task_configs("a", &make_connector(), 1000, &configs).await.unwrap();
        assert_eq!(service.connector_names().await, vec!["a", "b"]);

        assert_eq!(service.remove_connector_config("a").await, Some(configs));
        assert!(service.task_configs("a").await.is_none());
        assert_eq!(service.connector_names().await, vec!["b"]);
    }

    /// Persists nothing, to check that persistence errors reach the caller.
    struct UnavailableStore;

    impl ConfigManagementService for UnavailableStore {
        async fn connector_config(&self, _connector_name: &str) -> Option<ConnectKeyValue> {
            Some(ConnectKeyValue::new())
        }

        async fn put_task_configs(&self, connector_name: &str, _batch: TaskConfigBatch) -> ConfigResult<()> {
            Err(ConfigError::Persistence {
                connector: connector_name.to_string(),
                reason: "store unavailable".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn should_propagate_persistence_errors() {
        let res = UnavailableStore
            .recompute_task_configs("c", &make_connector(), 1000, &ConnectKeyValue::new())
            .await;

        assert!(matches!(res, Err(ConfigError::Persistence { connector, .. }) if connector == "c"));
    }
}
