use std::collections::HashMap;
use std::sync::Arc;

use prometheus::{
    register_int_counter_vec_with_registry, register_int_gauge_with_registry, IntCounter, IntGauge,
    Registry,
};
use tokio::{
    sync::{RwLock, Semaphore},
    task::JoinHandle,
    time::{sleep, timeout, Duration},
};
use tokio_util::{sync::CancellationToken, task::TaskTracker};

use super::errors::{CommitterError, CommitterResult};
use crate::connect_types::ConnectorTaskId;
use crate::internals::SourceTask;
use crate::prometheus_metrics::LABEL_OUTCOME;

const MET_COMMITS_NAME: &str = "source_task_offset_commits_total";
const MET_COMMITS_HELP: &str = "Source task offset commits, by outcome (success, failure, error)";
const MET_COMMITTERS_NAME: &str = "source_task_offset_committers";
const MET_COMMITTERS_HELP: &str = "Source tasks that currently have periodic offset commits scheduled";

/// Periodic offset commits of a single task: cancel via `cancel`, then wait on `join`.
struct CommitHandle {
    cancel: CancellationToken,
    join: JoinHandle<()>,
}

#[derive(Clone)]
struct CommitMetrics {
    success: IntCounter,
    failure: IntCounter,
    error: IntCounter,
    committers: IntGauge,
}

impl CommitMetrics {
    fn new(metrics: &Registry) -> Self {
        let commits = register_int_counter_vec_with_registry!(
            MET_COMMITS_NAME,
            MET_COMMITS_HELP,
            &[LABEL_OUTCOME],
            metrics
        )
        .unwrap_or_else(|e| panic!("Failed to create metric '{MET_COMMITS_NAME}': {e}"));

        Self {
            success: commits.with_label_values(&["success"]),
            failure: commits.with_label_values(&["failure"]),
            error: commits.with_label_values(&["error"]),
            committers: register_int_gauge_with_registry!(
                MET_COMMITTERS_NAME,
                MET_COMMITTERS_HELP,
                metrics
            )
            .unwrap_or_else(|e| panic!("Failed to create metric '{MET_COMMITTERS_NAME}': {e}")),
        }
    }
}

/// Periodically commits the offsets of every registered [`SourceTask`].
///
/// Each task gets its own job, that calls [`SourceTask::commit_offsets`] with a fixed delay
/// between the end of a commit and the beginning of the next: commits of the same task never
/// overlap. All jobs share a commit context that allows up to `parallelism` commits
/// in-flight at the same time.
///
/// Whatever happens inside a commit (failure, error or panic) is logged and does not
/// stop the schedule of that task, nor of any other.
pub struct SourceTaskOffsetCommitter {
    commit_interval: Duration,
    committers: RwLock<HashMap<ConnectorTaskId, CommitHandle>>,
    commit_permits: Arc<Semaphore>,
    shutdown_token: CancellationToken,
    tracker: TaskTracker,
    metrics: CommitMetrics,
}

impl SourceTaskOffsetCommitter {
    /// Create a new [`SourceTaskOffsetCommitter`].
    ///
    /// # Arguments
    ///
    /// * `commit_interval` - Default delay between commits, used by [`Self::schedule`]
    /// * `parallelism` - Maximum number of commits in-flight at the same time, across all tasks
    /// * `metrics` - Registry the committer metrics are registered with
    ///
    /// # Panics
    ///
    /// If the committer metrics are already registered with `metrics`: each committer
    /// needs its own [`Registry`].
    pub fn new(commit_interval: Duration, parallelism: usize, metrics: Arc<Registry>) -> Self {
        Self {
            commit_interval,
            committers: RwLock::new(HashMap::new()),
            commit_permits: Arc::new(Semaphore::new(parallelism.max(1))),
            shutdown_token: CancellationToken::new(),
            tracker: TaskTracker::new(),
            metrics: CommitMetrics::new(&metrics),
        }
    }

    /// Schedule periodic offset commits for the task, at the default commit interval.
    pub async fn schedule(
        &self,
        id: ConnectorTaskId,
        task: Arc<dyn SourceTask>,
    ) -> CommitterResult<()> {
        self.schedule_with_interval(id, task, self.commit_interval).await
    }

    /// Schedule periodic offset commits for the task: the first after `interval`,
    /// and then `interval` after the previous one completed.
    ///
    /// If the task already had commits scheduled, those are cancelled and replaced:
    /// the new schedule starts only once a commit in-flight for the previous one is complete.
    pub async fn schedule_with_interval(
        &self,
        id: ConnectorTaskId,
        task: Arc<dyn SourceTask>,
        interval: Duration,
    ) -> CommitterResult<()> {
        let mut w_guard = self.committers.write().await;

        // Checked under the lock, so this can't race with `close()`
        if self.tracker.is_closed() {
            return Err(CommitterError::Closed(id));
        }

        // The new job waits for the one it replaces, so commits of the same task never overlap
        let predecessor = w_guard.remove(&id).map(|previous| {
            warn!("Offset commits for task {id} were already scheduled: cancelling previous schedule");
            previous.cancel.cancel();
            previous.join
        });

        let cancel = self.shutdown_token.child_token();
        let join = self.tracker.spawn(run_periodic_commits(
            id.clone(),
            task,
            interval,
            predecessor,
            cancel.clone(),
            self.commit_permits.clone(),
            self.metrics.clone(),
        ));

        w_guard.insert(id.clone(), CommitHandle { cancel, join });
        self.metrics.committers.set(w_guard.len() as i64);

        debug!("Scheduled offset commits for task {id} every {interval:?}");
        Ok(())
    }

    /// Stop the periodic offset commits of the task.
    ///
    /// A commit in-flight is not interrupted: this waits for it to complete.
    /// Does nothing if the task has no commits scheduled.
    pub async fn remove(&self, id: &ConnectorTaskId) -> CommitterResult<()> {
        let removed = {
            let mut w_guard = self.committers.write().await;
            let removed = w_guard.remove(id);
            self.metrics.committers.set(w_guard.len() as i64);
            removed
        };

        let Some(handle) = removed else {
            return Ok(());
        };

        handle.cancel.cancel();
        match handle.join.await {
            Ok(()) => {
                debug!("Removed offset commits for task {id}");
                Ok(())
            },
            Err(e) if e.is_cancelled() => {
                trace!("Offset commits were cancelled by another thread while removing task {id}");
                Ok(())
            },
            Err(e) => Err(CommitterError::Interrupted {
                id: id.clone(),
                source: e,
            }),
        }
    }

    /// Stop all periodic offset commits, and refuse any new one.
    ///
    /// Commits in-flight are allowed to complete, waiting up to `shutdown_timeout`.
    /// If that's not enough, it gives up waiting and logs an error.
    pub async fn close(&self, shutdown_timeout: Duration) {
        let drained = {
            let mut w_guard = self.committers.write().await;
            self.tracker.close();
            self.shutdown_token.cancel();
            self.metrics.committers.set(0);
            w_guard.drain().count()
        };
        info!("Shutting down offset commits of {drained} tasks");

        if timeout(shutdown_timeout, self.tracker.wait()).await.is_err() {
            error!("Graceful shutdown of offset commits timed out after {shutdown_timeout:?}");
        }
    }

    /// `true` if the task currently has periodic offset commits scheduled.
    pub async fn is_scheduled(&self, id: &ConnectorTaskId) -> bool {
        self.committers.read().await.contains_key(id)
    }

    /// How many tasks currently have periodic offset commits scheduled.
    pub async fn scheduled_count(&self) -> usize {
        self.committers.read().await.len()
    }
}

async fn run_periodic_commits(
    id: ConnectorTaskId,
    task: Arc<dyn SourceTask>,
    interval: Duration,
    predecessor: Option<JoinHandle<()>>,
    cancel: CancellationToken,
    commit_permits: Arc<Semaphore>,
    metrics: CommitMetrics,
) {
    if let Some(previous) = predecessor {
        if let Err(e) = previous.await {
            if !e.is_cancelled() {
                error!("Previous offset commits for task {id} did not stop cleanly: {e}");
            }
        }
    }

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = sleep(interval) => {},
        }

        // Cancellation is still honoured while waiting for a turn in the commit context;
        // once the commit starts, it's awaited to completion.
        let permit = tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            res = commit_permits.clone().acquire_owned() => match res {
                Ok(permit) => permit,
                Err(e) => {
                    error!("Commit context unavailable for task {id}: {e}");
                    break;
                },
            },
        };

        commit(&id, task.clone(), &metrics).await;
        drop(permit);
    }

    trace!("Stopped offset commits for task {id}");
}

async fn commit(id: &ConnectorTaskId, task: Arc<dyn SourceTask>, metrics: &CommitMetrics) {
    debug!("{id} Committing offsets");

    match tokio::task::spawn_blocking(move || task.commit_offsets()).await {
        Ok(Ok(true)) => {
            metrics.success.inc();
        },
        Ok(Ok(false)) => {
            metrics.failure.inc();
            error!("{id} Failed to commit offsets");
        },
        Ok(Err(e)) => {
            metrics.error.inc();
            error!("{id} Unhandled error when committing offsets: {e}");
        },
        Err(e) => {
            metrics.error.inc();
            error!("{id} Unhandled panic when committing offsets: {e}");
        },
    }
}
