//! Progress statistics for a running or finished crawl
//!
//! Snapshots are plain values copied out of the crawl state, so the
//! presentation layer can keep them without holding on to the state itself.

use crate::output::CrawlReport;
use crate::state::RunStatus;

/// Crawl progress counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProgressSnapshot {
    /// Number of URLs dispatched so far
    pub pages_crawled: usize,

    /// Number of unique valid emails found so far
    pub emails_found: usize,

    /// Number of URLs waiting in the frontier
    pub frontier_size: usize,

    /// Page budget of the run
    pub max_pages: usize,
}

impl ProgressSnapshot {
    /// Fraction of the page budget used, in percent
    pub fn percent_complete(&self) -> f64 {
        if self.max_pages == 0 {
            return 0.0;
        }
        (self.pages_crawled as f64 / self.max_pages as f64) * 100.0
    }

    /// One-line progress text, e.g. `Pages: 3/50 | Emails: 2`
    pub fn status_line(&self) -> String {
        format!(
            "Pages: {}/{} | Emails: {}",
            self.pages_crawled, self.max_pages, self.emails_found
        )
    }
}

/// Prints the end-of-run summary to stdout
///
/// # Arguments
///
/// * `report` - The finished run's report
pub fn print_summary(report: &CrawlReport) {
    println!("\n=== Final Summary ===");
    println!("Pages crawled: {}", report.pages_crawled);
    println!("Total unique emails found: {}", report.emails.len());

    if report.status == RunStatus::Stopped {
        println!("Extraction was stopped by user");
    }
}
