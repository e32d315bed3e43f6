//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlState`: frontier, visited set, email set and stop flag of one run
//! - `RunStatus`: the run's `Idle -> Running -> Completed | Stopped` lifecycle
//! - `PageResult` / `DiscoveredLinks`: what a single page contributes
//! - `StopHandle`: cooperative stop flag shared with the presentation layer

mod crawl_state;
mod page_result;
mod run_status;
mod stop;

// Re-export main types
pub use crawl_state::CrawlState;
pub use page_result::{DiscoveredLinks, PageResult};
pub use run_status::RunStatus;
pub use stop::StopHandle;
