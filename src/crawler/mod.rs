//! Crawler module for page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - The two-lane URL frontier
//! - Page fetching behind the `Fetcher` trait
//! - Anchor extraction and link prioritisation
//! - Batch coordination and termination

mod coordinator;
mod fetcher;
mod frontier;
mod parser;

pub use coordinator::{process_page, run_crawl, Coordinator};
pub use fetcher::{build_http_client, fetch_url, FetchedPage, Fetcher, HttpFetcher};
pub use frontier::Frontier;
pub use parser::{extract_anchor_hrefs, extract_links, is_priority_url};
