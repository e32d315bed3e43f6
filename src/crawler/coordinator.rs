//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the main crawl loop, including:
//! - Seeding and owning the crawl state
//! - Drawing bounded batches from the frontier
//! - Fetching and extracting a batch concurrently
//! - Merging batch results and notifying the presentation layer
//! - Honouring cooperative stop requests between batches

use crate::config::CrawlConfig;
use crate::crawler::fetcher::{Fetcher, HttpFetcher};
use crate::crawler::parser::extract_links;
use crate::email::extract_emails;
use crate::output::{CrawlEvent, CrawlReport};
use crate::state::{CrawlState, PageResult, RunStatus, StopHandle};
use crate::HarvestError;
use futures::future::join_all;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::UnboundedSender;
use url::Url;

/// Main crawler coordinator structure
pub struct Coordinator {
    config: Arc<CrawlConfig>,
    fetcher: Arc<dyn Fetcher>,
    state: CrawlState,
    status: RunStatus,
    events: Option<UnboundedSender<CrawlEvent>>,
}

impl Coordinator {
    /// Creates a new coordinator in the `Idle` state
    ///
    /// # Arguments
    ///
    /// * `config` - A validated crawl configuration
    /// * `fetcher` - The page source to dispatch to
    pub fn new(config: CrawlConfig, fetcher: Arc<dyn Fetcher>) -> Self {
        let state = CrawlState::new(config.base_url.clone());

        Self {
            config: Arc::new(config),
            fetcher,
            state,
            status: RunStatus::Idle,
            events: None,
        }
    }

    /// Sends progress events to `events` while the run is going
    pub fn with_events(mut self, events: UnboundedSender<CrawlEvent>) -> Self {
        self.events = Some(events);
        self
    }

    /// A handle that stops the run after the batch in flight
    pub fn stop_handle(&self) -> StopHandle {
        self.state.stop_handle()
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    pub fn state(&self) -> &CrawlState {
        &self.state
    }

    /// Runs the main crawl loop
    ///
    /// Batches are strictly sequential: the next batch is drawn only after
    /// every page of the current one has been fetched, extracted and merged.
    /// Page failures are logged and merged as empty results.
    ///
    /// # Returns
    ///
    /// * `Ok(RunStatus)` - `Completed` or `Stopped`
    /// * `Err(HarvestError)` - The coordinator was not `Idle`
    pub async fn run(&mut self) -> crate::Result<RunStatus> {
        self.transition(RunStatus::Running)?;

        let max_pages = self.config.max_pages;
        let start_time = Instant::now();
        tracing::info!(
            "Starting crawl of {} (max pages: {}, concurrency: {})",
            self.config.base_url,
            max_pages,
            self.config.concurrency
        );

        let final_status = loop {
            if let Some(status) = self.state.termination(max_pages) {
                break status;
            }

            let batch = self.state.draw_batch(self.config.concurrency, max_pages);
            if batch.is_empty() {
                tracing::debug!("Frontier held only visited URLs, crawl complete");
                break RunStatus::Completed;
            }

            self.notify(CrawlEvent::BatchStarted {
                urls: batch.iter().map(|u| u.to_string()).collect(),
                progress: self.state.snapshot(max_pages),
            });

            let results = self.process_batch(batch).await;

            for (url, result) in results {
                let new_emails = self.state.merge(result);
                if !new_emails.is_empty() {
                    tracing::info!("Found {} new email(s) on {}", new_emails.len(), url);
                    self.notify(CrawlEvent::EmailsFound {
                        source_url: url.to_string(),
                        emails: new_emails,
                        progress: self.state.snapshot(max_pages),
                    });
                }
            }

            let snapshot = self.state.snapshot(max_pages);
            tracing::info!(
                "Progress: {} pages crawled, {} emails, {} in frontier",
                snapshot.pages_crawled,
                snapshot.emails_found,
                snapshot.frontier_size
            );
        };

        self.transition(final_status)?;
        self.notify(CrawlEvent::Finished {
            status: final_status,
            progress: self.state.snapshot(max_pages),
        });

        tracing::info!(
            "Crawl {}: {} pages crawled, {} emails found in {:?}",
            final_status,
            self.state.pages_crawled(),
            self.state.emails().len(),
            start_time.elapsed()
        );

        Ok(final_status)
    }

    /// Builds the report for the current state
    pub fn report(&self) -> CrawlReport {
        CrawlReport::from_state(&self.state, self.status)
    }

    /// Fetches and extracts every URL of a batch concurrently
    ///
    /// Results come back in dispatch order. A task that panics yields an empty
    /// result without affecting its siblings.
    async fn process_batch(&self, batch: Vec<Url>) -> Vec<(Url, PageResult)> {
        let handles: Vec<_> = batch
            .iter()
            .map(|url| {
                let fetcher = Arc::clone(&self.fetcher);
                let url = url.clone();
                let base_url = self.config.base_url.clone();
                let timeout = self.config.page_timeout;
                tokio::spawn(async move {
                    process_page(fetcher.as_ref(), &url, &base_url, timeout).await
                })
            })
            .collect();

        let outcomes = join_all(handles).await;

        batch
            .into_iter()
            .zip(outcomes)
            .map(|(url, outcome)| {
                let result = outcome.unwrap_or_else(|e| {
                    tracing::error!("Page task for {} failed: {}", url, e);
                    PageResult::empty()
                });
                (url, result)
            })
            .collect()
    }

    fn transition(&mut self, next: RunStatus) -> crate::Result<()> {
        if !self.status.can_transition_to(next) {
            return Err(HarvestError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }

    fn notify(&self, event: CrawlEvent) {
        if let Some(events) = &self.events {
            // A closed receiver only means nobody is watching
            let _ = events.send(event);
        }
    }
}

/// Fetches one page and extracts its emails and in-scope links
///
/// Never fails: fetch errors are logged and produce an empty result.
pub async fn process_page(
    fetcher: &dyn Fetcher,
    url: &Url,
    base_url: &Url,
    timeout: Duration,
) -> PageResult {
    tracing::debug!("Fetching {}", url);

    let page = match fetcher.fetch(url, timeout).await {
        Ok(page) => page,
        Err(e) => {
            tracing::warn!("Failed to fetch {}: {}", url, e);
            return PageResult::empty();
        }
    };
    if page.final_url != *url {
        tracing::debug!("{} redirected to {}", url, page.final_url);
    }

    // Relative links are relative to where the content actually came from
    let emails = extract_emails(&page.body);
    let links = extract_links(&page.body, &page.final_url, base_url);
    tracing::debug!(
        "{}: {} emails, {} priority links, {} other links",
        url,
        emails.len(),
        links.priority.len(),
        links.ordinary.len()
    );

    PageResult { emails, links }
}

/// Runs a complete crawl with the default HTTP fetcher
///
/// This function orchestrates the entire crawl process:
///
/// 1. Build the HTTP client
/// 2. Seed the frontier with the base URL
/// 3. Fetch, extract and merge batches until the frontier is empty, the page
///    budget is spent, or a stop is requested
/// 4. Return the report of everything merged
///
/// # Arguments
///
/// * `config` - The crawl configuration
///
/// # Example
///
/// ```no_run
/// use email_harvester::config::CrawlConfig;
/// use email_harvester::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = CrawlConfig::new("https://example.com/", 50, 5)?;
/// let report = run_crawl(config).await?;
/// println!("{} emails", report.emails.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: CrawlConfig) -> crate::Result<CrawlReport> {
    let fetcher = HttpFetcher::new(&config.user_agent)?;
    let mut coordinator = Coordinator::new(config, Arc::new(fetcher));
    coordinator.run().await?;
    Ok(coordinator.report())
}
