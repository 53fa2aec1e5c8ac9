use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle state of the content store.
///
/// The store starts in `Created`, moves to `Running` once the known-id sets
/// have been loaded, and ends in `Stopped` after a successful shutdown save.
/// A persistence failure during shutdown leaves it in `Failed` instead —
/// the error is surfaced, never swallowed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceState {
    /// Constructed but not yet started.
    Created,
    /// Started; known-id sets are loaded.
    Running,
    /// Stopped after a successful shutdown save.
    Stopped,
    /// Shutdown persistence failed.
    Failed,
}

impl fmt::Display for ServiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ServiceState::Created => "created",
            ServiceState::Running => "running",
            ServiceState::Stopped => "stopped",
            ServiceState::Failed => "failed",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names() {
        assert_eq!(ServiceState::Created.to_string(), "created");
        assert_eq!(ServiceState::Running.to_string(), "running");
        assert_eq!(ServiceState::Stopped.to_string(), "stopped");
        assert_eq!(ServiceState::Failed.to_string(), "failed");
    }
}
