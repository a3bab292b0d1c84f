//! Core of a connector runtime Worker.
//!
//! * [`SourceTaskOffsetCommitter`] periodically commits the offsets of every running source task,
//!   containing any failure of a commit to that single commit.
//! * [`ConfigManagementService::recompute_task_configs`] expands the configuration of a Connector
//!   into the configurations of its Tasks, the same way on every Worker of the cluster.
//! * [`Worker`] ties the two together.

#[macro_use]
extern crate log;

mod config;
pub mod connect_types;
pub mod constants;
mod internals;
pub mod logging;
pub mod offset_committer;
pub mod prometheus_metrics;
pub mod task_configs;
mod worker;

#[cfg(test)]
mod test_util;

pub use config::WorkerConfig;
pub use connect_types::{ConnectKeyValue, ConnectorTaskId, TaskConfigBatch, TaskType};
pub use internals::{BoxError, Connector, SourceTask};
pub use offset_committer::{CommitterError, SourceTaskOffsetCommitter};
pub use task_configs::{
    generate_task_configs, ConfigError, ConfigManagementService, MemoryConfigManagementService,
};
pub use worker::{Worker, WorkerError, WorkerResult};
