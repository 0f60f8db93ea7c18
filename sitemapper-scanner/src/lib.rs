pub mod crawler;
pub mod error;
pub mod extract;
pub mod fetcher;
pub mod resolver;
pub mod result;
pub mod seed;
pub mod tree;

pub use crawler::{Crawler, ProgressCallback};
pub use error::ScanError;
pub use fetcher::{HttpFetcher, LinkSource};
pub use result::CrawlSummary;
pub use seed::{DEFAULT_DEPTH, Seed};
pub use tree::{Attach, CrawlTree, Node, NodeId};
