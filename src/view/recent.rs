//! The recent-sites list.

use sitescope_types::RecentSite;

/// Recently analyzed sites plus the list cursor.
///
/// The list is only ever replaced wholesale; entries are never merged.
#[derive(Debug, Clone, Default)]
pub struct RecentSites {
    sites: Vec<RecentSite>,
    cursor: usize,
}

impl RecentSites {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sites(&self) -> &[RecentSite] {
        &self.sites
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    /// Replace the whole list, clamping the cursor to the new length.
    pub fn replace(&mut self, sites: Vec<RecentSite>) {
        self.sites = sites;
        if self.cursor >= self.sites.len() {
            self.cursor = self.sites.len().saturating_sub(1);
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// URL under the cursor, if the list is not empty.
    pub fn selected_url(&self) -> Option<&str> {
        self.sites.get(self.cursor).map(|s| s.url.as_str())
    }

    pub fn select_next(&mut self) {
        let max = self.sites.len().saturating_sub(1);
        self.cursor = (self.cursor + 1).min(max);
    }

    pub fn select_prev(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.cursor = 0;
    }

    pub fn select_last(&mut self) {
        self.cursor = self.sites.len().saturating_sub(1);
    }
}
