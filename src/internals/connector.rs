use crate::connect_types::ConnectKeyValue;

/// A Connector, as far as the Worker is concerned: something that knows how to split its work
/// into Task configurations, and which Task implementation runs them.
pub trait Connector {
    /// Partial configuration of each Task the Connector wants to run.
    ///
    /// The returned list is ordered: the configuration at position `N` becomes Task `N`.
    /// It should contain at most `max_tasks` entries.
    fn task_configs(&self, max_tasks: i32) -> Vec<ConnectKeyValue>;

    /// Identifier of the Task implementation that runs the configurations returned by
    /// [`Self::task_configs`].
    fn task_class(&self) -> &str;
}
