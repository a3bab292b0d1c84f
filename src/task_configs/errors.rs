use thiserror::Error;

/// Possible errors from the [`super::ConfigManagementService`].
#[derive(Error, Debug, Eq, PartialEq)]
pub enum ConfigError {
    /// There is no persisted configuration for the Connector.
    #[error("Configuration of connector '{0}' not found")]
    ConnectorConfigNotFound(String),

    /// Task configurations of the Connector could not be persisted.
    #[error("Failed to persist task configurations of connector '{connector}': {reason}")]
    Persistence {
        connector: String,
        reason: String,
    },
}

pub type ConfigResult<T> = Result<T, ConfigError>;
