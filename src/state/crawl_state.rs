//! Mutable state of one crawl run
//!
//! `CrawlState` owns the frontier, the visited set, the email set and the stop
//! flag. Only the coordinator mutates it, and only between batches; everything
//! else sees snapshots.

use crate::crawler::Frontier;
use crate::output::ProgressSnapshot;
use crate::state::{PageResult, RunStatus, StopHandle};
use crate::url::is_url_in_scope;
use std::collections::{BTreeSet, HashSet};
use url::Url;

/// State owned by the coordinator for the lifetime of a run
#[derive(Debug)]
pub struct CrawlState {
    base_url: Url,
    frontier: Frontier,
    visited: HashSet<String>,
    /// Visited URLs in dispatch order
    visit_order: Vec<String>,
    emails: BTreeSet<String>,
    stop: StopHandle,
}

impl CrawlState {
    /// Creates a fresh state with the frontier seeded by `base_url`
    pub fn new(base_url: Url) -> Self {
        Self {
            frontier: Frontier::seeded(base_url.clone()),
            base_url,
            visited: HashSet::new(),
            visit_order: Vec::new(),
            emails: BTreeSet::new(),
            stop: StopHandle::new(),
        }
    }

    /// Number of URLs dispatched so far
    pub fn pages_crawled(&self) -> usize {
        self.visited.len()
    }

    /// URLs dispatched so far, in dispatch order
    pub fn visited(&self) -> &[String] {
        &self.visit_order
    }

    pub fn has_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    pub fn emails(&self) -> &BTreeSet<String> {
        &self.emails
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// A handle that can request a cooperative stop
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Decides whether the run should end before the next batch
    ///
    /// A raised stop flag wins over the other conditions so a user stop is
    /// always reported as such.
    pub fn termination(&self, max_pages: usize) -> Option<RunStatus> {
        if self.stop.is_stopped() {
            Some(RunStatus::Stopped)
        } else if self.frontier.is_empty() || self.visited.len() >= max_pages {
            Some(RunStatus::Completed)
        } else {
            None
        }
    }

    /// Draws the next batch and marks every drawn URL visited
    ///
    /// At most `concurrency` URLs are drawn, and never more than the remaining
    /// page budget. Queued URLs that were already visited are discarded.
    pub fn draw_batch(&mut self, concurrency: usize, max_pages: usize) -> Vec<Url> {
        let budget = max_pages.saturating_sub(self.visited.len());
        let limit = concurrency.min(budget);
        let mut batch = Vec::new();

        while batch.len() < limit {
            let Some(url) = self.frontier.pop() else {
                break;
            };

            if self.visited.insert(url.as_str().to_string()) {
                self.visit_order.push(url.as_str().to_string());
                batch.push(url);
            }
        }

        batch
    }

    /// Merges one page's result, returning the emails that were new to the run
    pub fn merge(&mut self, result: PageResult) -> Vec<String> {
        let PageResult { emails, links } = result;

        let mut new_emails = Vec::new();
        for email in emails {
            if self.emails.insert(email.clone()) {
                new_emails.push(email);
            }
        }

        let lanes = links
            .priority
            .into_iter()
            .map(|url| (url, true))
            .chain(links.ordinary.into_iter().map(|url| (url, false)));

        for (url, priority) in lanes {
            if !is_url_in_scope(&url, &self.base_url) || self.visited.contains(url.as_str()) {
                continue;
            }
            self.frontier.push(url, priority);
        }

        new_emails
    }

    /// Progress counters for the presentation layer
    pub fn snapshot(&self, max_pages: usize) -> ProgressSnapshot {
        ProgressSnapshot {
            pages_crawled: self.visited.len(),
            emails_found: self.emails.len(),
            frontier_size: self.frontier.len(),
            max_pages,
        }
    }
}
