// Include handlers module directly from handlers.rs
#[path = "handlers.rs"]
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{load_seeds_from_file, load_seeds_from_source, parse_seed_line, parse_url_line};

// Re-export crawl functionality from sitemapper-core
pub use sitemapper_core::crawl::{
    CrawlOptions, CrawlProgressCallback, SiteMaps, execute_crawl, extract_url_path, map_sites,
};
pub use sitemapper_core::report::{ReportFormat, generate_crawl_report, render_report};
