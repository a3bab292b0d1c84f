use std::sync::Arc;

use chrono::Utc;
use prometheus::Registry;
use thiserror::Error;

use crate::config::WorkerConfig;
use crate::connect_types::{ConnectKeyValue, ConnectorTaskId};
use crate::internals::{Connector, SourceTask};
use crate::offset_committer::{self, CommitterError, SourceTaskOffsetCommitter};
use crate::task_configs::{ConfigError, ConfigManagementService};

/// Possible errors from the [`Worker`].
#[derive(Error, Debug)]
pub enum WorkerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Committer(#[from] CommitterError),
}

pub type WorkerResult<T> = Result<T, WorkerError>;

/// Control plane of a Worker: derives Task configurations when Connectors are (re)configured,
/// and keeps offsets of running source Tasks periodically committed.
pub struct Worker<S> {
    config: WorkerConfig,
    config_service: Arc<S>,
    committer: SourceTaskOffsetCommitter,
}

impl<S: ConfigManagementService> Worker<S> {
    /// Create a new [`Worker`], registering its metrics with `metrics`.
    ///
    /// # Panics
    ///
    /// If another Worker already registered its metrics with the same [`Registry`]:
    /// see [`SourceTaskOffsetCommitter::new`].
    pub fn new(config: WorkerConfig, config_service: Arc<S>, metrics: Arc<Registry>) -> Self {
        let committer = offset_committer::init(&config, metrics);

        Self {
            config,
            config_service,
            committer,
        }
    }

    pub fn config_service(&self) -> &Arc<S> {
        &self.config_service
    }

    /// Recompute (and persist) the Task configurations of a Connector, stamped with the current time.
    pub async fn reconfigure_connector<C>(
        &self,
        connector_name: &str,
        connector: &C,
        configs: &ConnectKeyValue,
    ) -> WorkerResult<()>
    where
        C: Connector + ?Sized,
    {
        let now_ms = Utc::now().timestamp_millis();
        self.config_service
            .recompute_task_configs(connector_name, connector, now_ms, configs)
            .await?;

        info!("Reconfigured connector '{connector_name}'");
        Ok(())
    }

    /// Start committing the offsets of a source Task that has started running.
    pub async fn start_source_task(
        &self,
        id: ConnectorTaskId,
        task: Arc<dyn SourceTask>,
    ) -> WorkerResult<()> {
        self.committer.schedule(id, task).await?;
        Ok(())
    }

    /// Stop committing the offsets of a source Task that is stopping.
    ///
    /// Returns only once no offset commit of the Task is in-flight.
    pub async fn stop_source_task(&self, id: &ConnectorTaskId) -> WorkerResult<()> {
        self.committer.remove(id).await?;
        Ok(())
    }

    /// Source Tasks whose offsets are currently committed periodically.
    pub async fn running_source_tasks(&self) -> usize {
        self.committer.scheduled_count().await
    }

    /// Stop committing offsets of all source Tasks, waiting at most the configured shutdown timeout.
    pub async fn shutdown(self) {
        info!("Shutting down");
        self.committer.close(self.config.shutdown_timeout()).await;
    }
}
