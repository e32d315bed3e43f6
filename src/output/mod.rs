//! Output module for progress reporting and the final report
//!
//! This module handles:
//! - Progress snapshots and one-way crawl events for the presentation layer
//! - Printing the end-of-run summary
//! - Writing the plain text email report

mod events;
mod report;
pub mod stats;

pub use events::CrawlEvent;
pub use report::{default_report_filename, format_report, write_report, CrawlReport};
pub use stats::{print_summary, ProgressSnapshot};
