use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// What a finished crawl tree reports about itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrawlSummary {
    pub url: String,
    pub depth: usize,
    pub direct_children: usize,
    pub distinct_urls: usize,
    pub fetches: usize,
    pub started_at: DateTime<Utc>,
    pub elapsed: Duration,
}

impl fmt::Display for CrawlSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: depth={}, first_nodes={}, power={} | {:.3?}",
            self.url, self.depth, self.direct_children, self.distinct_urls, self.elapsed
        )
    }
}
