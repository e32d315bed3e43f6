use crate::output::ProgressSnapshot;
use crate::state::RunStatus;

/// One-way notification from the coordinator to the presentation layer
///
/// Events carry copies of the crawl state, never references into it.
#[derive(Debug, Clone, PartialEq)]
pub enum CrawlEvent {
    /// A batch of URLs was drawn and is about to be fetched
    BatchStarted {
        urls: Vec<String>,
        progress: ProgressSnapshot,
    },

    /// A merged page contributed emails the run had not seen before
    EmailsFound {
        source_url: String,
        emails: Vec<String>,
        progress: ProgressSnapshot,
    },

    /// The run reached a terminal state
    Finished {
        status: RunStatus,
        progress: ProgressSnapshot,
    },
}

impl CrawlEvent {
    /// The progress counters attached to any event
    pub fn progress(&self) -> &ProgressSnapshot {
        match self {
            Self::BatchStarted { progress, .. }
            | Self::EmailsFound { progress, .. }
            | Self::Finished { progress, .. } => progress,
        }
    }
}
