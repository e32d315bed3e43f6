use std::collections::BTreeSet;
use url::Url;

/// In-scope links found on one page, split by contact likelihood
///
/// Both lists are de-duplicated and keep document order. Their union is the
/// page's discovered URL set; the split only decides which frontier lane a URL
/// joins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveredLinks {
    /// Links that look like contact/about/team/staff pages
    pub priority: Vec<Url>,

    /// Every other in-scope link
    pub ordinary: Vec<Url>,
}

impl DiscoveredLinks {
    /// Total number of links
    pub fn len(&self) -> usize {
        self.priority.len() + self.ordinary.len()
    }

    /// Returns true if no links were found
    pub fn is_empty(&self) -> bool {
        self.priority.is_empty() && self.ordinary.is_empty()
    }

    /// Iterates over the union, priority links first
    pub fn iter(&self) -> impl Iterator<Item = &Url> {
        self.priority.iter().chain(self.ordinary.iter())
    }
}

/// Outcome of fetching and extracting a single page
#[derive(Debug, Clone, Default)]
pub struct PageResult {
    /// Validated, normalized emails found on the page
    pub emails: BTreeSet<String>,

    /// In-scope links found on the page
    pub links: DiscoveredLinks,
}

impl PageResult {
    /// The result of a page that failed to fetch or parse
    pub fn empty() -> Self {
        Self::default()
    }
}
