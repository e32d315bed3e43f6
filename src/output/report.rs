//! Plain text email report
//!
//! The report format is fixed:
//!
//! ```text
//! Email Extraction Results
//! Date: 2024-05-01 14:03:59
//! Total emails found: 2
//! Pages crawled: 17
//!
//! Emails:
//! a@b.com
//! z@a.com
//! ```

use crate::state::{CrawlState, RunStatus};
use chrono::{DateTime, Local};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Final snapshot of a run, ready to be written out
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// When the report was generated
    pub generated_at: DateTime<Local>,

    /// How the run ended
    pub status: RunStatus,

    /// Number of URLs dispatched
    pub pages_crawled: usize,

    /// Every validated email, sorted
    pub emails: BTreeSet<String>,
}

impl CrawlReport {
    /// Builds a report from the state of a finished (or stopped) run
    pub fn from_state(state: &CrawlState, status: RunStatus) -> Self {
        Self {
            generated_at: Local::now(),
            status,
            pages_crawled: state.pages_crawled(),
            emails: state.emails().clone(),
        }
    }
}

/// Formats a report as text
///
/// Emails are listed in ascending lexicographic order, one per line, and
/// nothing follows the list.
pub fn format_report(report: &CrawlReport) -> String {
    let mut text = String::new();

    text.push_str("Email Extraction Results\n");
    text.push_str(&format!(
        "Date: {}\n",
        report.generated_at.format("%Y-%m-%d %H:%M:%S")
    ));
    text.push_str(&format!("Total emails found: {}\n", report.emails.len()));
    text.push_str(&format!("Pages crawled: {}\n", report.pages_crawled));
    text.push_str("\nEmails:\n");

    for email in &report.emails {
        text.push_str(email);
        text.push('\n');
    }

    text
}

/// Writes a report to `output_path`, replacing any existing file
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the report
/// * `Err(HarvestError::Io)` - Failed to create or write the file
pub fn write_report(report: &CrawlReport, output_path: &Path) -> crate::Result<()> {
    let mut file = File::create(output_path)?;
    file.write_all(format_report(report).as_bytes())?;
    file.flush()?;

    tracing::info!(
        "Wrote {} emails to {}",
        report.emails.len(),
        output_path.display()
    );

    Ok(())
}

/// Default report file name, e.g. `emails_20240501_140359.txt`
pub fn default_report_filename(now: DateTime<Local>) -> String {
    format!("emails_{}.txt", now.format("%Y%m%d_%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 5, 1, 14, 3, 59).unwrap()
    }

    fn report(emails: &[&str], pages: usize) -> CrawlReport {
        CrawlReport {
            generated_at: fixed_time(),
            status: RunStatus::Completed,
            pages_crawled: pages,
            emails: emails.iter().map(|e| e.to_string()).collect(),
        }
    }

    #[test]
    fn test_format_report_layout() {
        let text = format_report(&report(&["z@a.com", "a@b.com"], 17));
        assert_eq!(
            text,
            "Email Extraction Results\n\
             Date: 2024-05-01 14:03:59\n\
             Total emails found: 2\n\
             Pages crawled: 17\n\
             \n\
             Emails:\n\
             a@b.com\n\
             z@a.com\n"
        );
    }

    #[test]
    fn test_emails_sorted() {
        let text = format_report(&report(&["z@a.com", "a@b.com"], 1));
        let a = text.find("a@b.com").unwrap();
        let z = text.find("z@a.com").unwrap();
        assert!(a < z);
    }

    #[test]
    fn test_empty_report() {
        let text = format_report(&report(&[], 3));
        assert!(text.contains("Total emails found: 0\n"));
        assert!(text.ends_with("Emails:\n"));
    }

    #[test]
    fn test_write_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("emails.txt");

        write_report(&report(&["info@example.com"], 2), &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("Email Extraction Results\n"));
        assert!(written.ends_with("Emails:\ninfo@example.com\n"));
    }

    #[test]
    fn test_write_report_to_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("emails.txt");

        let result = write_report(&report(&["info@example.com"], 2), &path);
        assert!(matches!(result, Err(crate::HarvestError::Io(_))));
    }

    #[test]
    fn test_default_report_filename() {
        assert_eq!(
            default_report_filename(fixed_time()),
            "emails_20240501_140359.txt"
        );
    }
}
