//! Frontier of URLs waiting to be fetched
//!
//! The frontier is two FIFO lanes. Contact-like pages go into the priority lane
//! and are handed out before anything in the ordinary lane, so a small page
//! budget is spent where addresses are most likely. Within a lane the order is
//! breadth-first.

use std::collections::{HashSet, VecDeque};
use url::Url;

/// Pending URLs, priority lane first
#[derive(Debug, Default)]
pub struct Frontier {
    /// Contact/about/team/staff pages
    priority: VecDeque<Url>,

    /// Everything else
    ordinary: VecDeque<Url>,

    /// Keys of every URL currently in either lane
    queued: HashSet<String>,
}

impl Frontier {
    /// Creates an empty frontier
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a frontier holding just the seed URL
    pub fn seeded(seed: Url) -> Self {
        let mut frontier = Self::new();
        frontier.push(seed, false);
        frontier
    }

    /// Adds a URL to the back of its lane
    ///
    /// Returns false and leaves the frontier untouched if the URL is already
    /// queued.
    pub fn push(&mut self, url: Url, priority: bool) -> bool {
        if !self.queued.insert(url.as_str().to_string()) {
            return false;
        }

        if priority {
            self.priority.push_back(url);
        } else {
            self.ordinary.push_back(url);
        }
        true
    }

    /// Removes and returns the next URL to fetch
    pub fn pop(&mut self) -> Option<Url> {
        let url = self
            .priority
            .pop_front()
            .or_else(|| self.ordinary.pop_front())?;
        self.queued.remove(url.as_str());
        Some(url)
    }

    /// Returns true if the URL is waiting in either lane
    pub fn contains(&self, url: &str) -> bool {
        self.queued.contains(url)
    }

    /// Number of queued URLs
    pub fn len(&self) -> usize {
        self.priority.len() + self.ordinary.len()
    }

    /// Returns true if nothing is queued
    pub fn is_empty(&self) -> bool {
        self.priority.is_empty() && self.ordinary.is_empty()
    }
}
