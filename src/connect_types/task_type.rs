use std::fmt;

/// Kind of Task a Worker runs, when it's not simply the Task declared by the Connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskType {
    /// Runs a pre-existing source Task and sink Task pair, named in the Connector configuration,
    /// instead of the Task declared by the Connector.
    Direct,
}

impl TaskType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::Direct => "DIRECT",
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
