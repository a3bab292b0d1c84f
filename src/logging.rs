use env_logger::{Builder, Env};
use log::{LevelFilter, SetLoggerError};

/// Environment variable that, when set, overrides the verbosity level given to [`init`].
pub const LOG_ENV_VAR: &str = "KONNEKTOR_LOG";

/// Initialize the global logger, based on the given verbosity level.
///
/// See [`crate::WorkerConfig::verbosity_level`].
pub fn init(verbosity_level: i8) -> Result<(), SetLoggerError> {
    Builder::new()
        .filter_level(level_filter(verbosity_level))
        .parse_env(Env::new().filter(LOG_ENV_VAR))
        .try_init()
}

fn level_filter(verbosity_level: i8) -> LevelFilter {
    match verbosity_level {
        i8::MIN..=-2 => LevelFilter::Off,
        -1 => LevelFilter::Error,
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        3..=i8::MAX => LevelFilter::Trace,
    }
}
