/// Run status definitions for the crawl state machine
///
/// A run moves `Idle -> Running -> Completed | Stopped` and never goes back.
use std::fmt;

/// Represents the lifecycle state of one crawl run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunStatus {
    /// Created and seeded, not started yet
    Idle,

    /// Batches are being dispatched
    Running,

    /// Frontier exhausted or page budget reached
    Completed,

    /// A stop was requested and honoured between batches
    Stopped,
}

impl RunStatus {
    /// Returns true if this is a terminal state (no further batches)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Stopped)
    }

    /// Returns true if the state machine allows moving to `next`
    pub fn can_transition_to(&self, next: RunStatus) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Running)
                | (Self::Running, Self::Completed)
                | (Self::Running, Self::Stopped)
        )
    }

    /// Returns the lowercase label used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Stopped => "stopped",
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
