use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use sitemapper_scanner::error::ScanError;
use sitemapper_scanner::fetcher::DEFAULT_TIMEOUT_SECS;
use sitemapper_scanner::{Crawler, CrawlTree, LinkSource, Seed};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::info;
use url::Url;

/// Finished crawl trees keyed by their seed URL.
pub type SiteMaps = BTreeMap<String, CrawlTree>;

/// Options for configuring a crawl operation
pub struct CrawlOptions {
    pub seeds: Vec<Seed>,
    pub timeout_secs: u64,
    /// Ceiling on concurrent fetches, shared by all seeds. `None` = unbounded.
    pub max_in_flight: Option<usize>,
    pub show_progress_bars: bool,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            seeds: Vec::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_in_flight: None,
            show_progress_bars: false,
        }
    }
}

/// Callback for reporting crawl progress
pub type CrawlProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Extract the path component from a URL
pub fn extract_url_path(url: &str) -> String {
    Url::parse(url)
        .ok()
        .map(|u| {
            let path = u.path().to_string();
            if path.is_empty() || path == "/" {
                "/".to_string()
            } else {
                path
            }
        })
        .unwrap_or_else(|| url.to_string())
}

/// Crawl every seed concurrently, each into its own independent tree.
///
/// When the same seed URL is given twice, the later tree wins.
pub async fn map_sites<S: LinkSource>(crawler: &Crawler<S>, seeds: &[Seed]) -> SiteMaps {
    let trees = join_all(seeds.iter().map(|seed| crawler.crawl(seed))).await;

    trees
        .into_iter()
        .map(|tree| (tree.url().to_string(), tree))
        .collect()
}

/// Execute a crawl with the given options over HTTP
pub async fn execute_crawl(
    options: CrawlOptions,
    progress_callback: Option<CrawlProgressCallback>,
) -> Result<SiteMaps, ScanError> {
    let CrawlOptions {
        seeds,
        timeout_secs,
        max_in_flight,
        show_progress_bars,
    } = options;

    let progress_bar = if show_progress_bars {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            pb.set_style(style);
        }
        pb.set_message("Starting crawl...");
        Some(Arc::new(pb))
    } else {
        None
    };

    let processed_count = Arc::new(AtomicUsize::new(0));
    let count_clone = processed_count.clone();
    let pb_clone = progress_bar.clone();

    let mut crawler = Crawler::with_timeout(timeout_secs)?.with_progress_callback(Arc::new(
        move |url: String| {
            let count = count_clone.fetch_add(1, Ordering::Relaxed) + 1;
            if let Some(ref pb) = pb_clone {
                pb.set_message(format!("Crawling... {} URLs fetched ({})", count, url));
                pb.tick();
            }
        },
    ));
    if let Some(max) = max_in_flight {
        crawler = crawler.with_max_in_flight(max);
    }

    if let Some(ref callback) = progress_callback {
        callback(format!("Crawling {} seed(s)", seeds.len()));
    }

    let maps = map_sites(&crawler, &seeds).await;

    if let Some(ref callback) = progress_callback {
        for tree in maps.values() {
            callback(tree.summary().to_string());
        }
    }

    let total = processed_count.load(Ordering::Relaxed);
    info!("Crawled {} seed(s), {} URLs fetched", maps.len(), total);
    if let Some(ref pb) = progress_bar {
        pb.finish_with_message(format!("Crawl complete! {} URLs fetched", total));
    }

    Ok(maps)
}
