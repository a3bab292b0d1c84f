use std::time::Duration;

use clap::{ArgGroup, Parser};

use crate::constants::{
    DEFAULT_COMMIT_PARALLELISM, DEFAULT_OFFSET_COMMIT_INTERVAL_MS, DEFAULT_SHUTDOWN_TIMEOUT_MS,
};

/// Configuration of a Worker, defined via the declarative, `derive` based functionality
/// of the `clap` crate.
///
/// Binaries embedding a Worker can either parse it directly, or `#[command(flatten)]` it
/// into their own command line interface.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(group(
    ArgGroup::new("logging_flags")
        .required(false)
        .multiple(false)
        .args(["verbose", "quiet"]),
))]
pub struct WorkerConfig {
    /// Identifier of this Worker in the cluster.
    ///
    /// When set, it's added as a label to all the metrics of the Worker.
    #[arg(long = "worker-id", value_name = "WORKER_ID", env = "KONNEKTOR_WORKER_ID")]
    pub worker_id: Option<String>,

    /// Interval (ms) between the end of a source task offset commit, and the beginning of the next.
    #[arg(
        long = "offset-commit-interval-ms",
        value_name = "MILLISECONDS",
        env = "KONNEKTOR_OFFSET_COMMIT_INTERVAL_MS",
        default_value = DEFAULT_OFFSET_COMMIT_INTERVAL_MS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub offset_commit_interval_ms: u64,

    /// How many source task offset commits can be in-flight at the same time.
    ///
    /// With the default of 1, commits of different tasks never overlap.
    #[arg(
        long = "commit-parallelism",
        value_name = "COMMITS",
        env = "KONNEKTOR_COMMIT_PARALLELISM",
        default_value = DEFAULT_COMMIT_PARALLELISM,
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    pub commit_parallelism: u16,

    /// How long (ms) to wait for in-flight offset commits to finish, when shutting down.
    #[arg(
        long = "shutdown-timeout-ms",
        value_name = "MILLISECONDS",
        env = "KONNEKTOR_SHUTDOWN_TIMEOUT_MS",
        default_value = DEFAULT_SHUTDOWN_TIMEOUT_MS
    )]
    pub shutdown_timeout_ms: u64,

    /// Verbose logging.
    ///
    /// * none    = 'WARN'
    /// * '-v'    = 'INFO'
    /// * '-vv'   = 'DEBUG'
    /// * '-vvv'  = 'TRACE'
    ///
    /// Alternatively, set environment variable 'KONNEKTOR_LOG=(ERROR|WARN|INFO|DEBUG|TRACE|OFF)'.
    #[arg(short, long, action = clap::ArgAction::Count, verbatim_doc_comment)]
    pub verbose: u8,

    /// Quiet logging.
    ///
    /// * none    = 'WARN'
    /// * '-q'    = 'ERROR'
    /// * '-qq'   = 'OFF'
    ///
    /// Alternatively, set environment variable 'KONNEKTOR_LOG=(ERROR|WARN|INFO|DEBUG|TRACE|OFF)'.
    #[arg(short, long, action = clap::ArgAction::Count, verbatim_doc_comment)]
    pub quiet: u8,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            worker_id: None,
            offset_commit_interval_ms: 30_000,
            commit_parallelism: 1,
            shutdown_timeout_ms: 5_000,
            verbose: 0,
            quiet: 0,
        }
    }
}

impl WorkerConfig {
    pub fn verbosity_level(&self) -> i8 {
        self.verbose as i8 - self.quiet as i8
    }

    pub fn offset_commit_interval(&self) -> Duration {
        Duration::from_millis(self.offset_commit_interval_ms)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_millis(self.shutdown_timeout_ms)
    }
}
