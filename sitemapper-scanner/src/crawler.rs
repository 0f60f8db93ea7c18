use crate::error::Result;
use crate::fetcher::{HttpFetcher, LinkSource};
use crate::seed::Seed;
use crate::tree::{Attach, CrawlTree, NodeId};
use futures::FutureExt;
use futures::future::{BoxFuture, join_all};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, Semaphore};
use tracing::{debug, info};

pub type ProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Depth-bounded crawler building one [`CrawlTree`] per seed.
///
/// Every discovered link is followed concurrently on the calling task; a
/// page's expansion completes only once all of its children have.
pub struct Crawler<S = HttpFetcher> {
    source: S,
    in_flight: Option<Arc<Semaphore>>,
    progress_callback: Option<ProgressCallback>,
}

impl Crawler<HttpFetcher> {
    pub fn new() -> Result<Self> {
        Ok(Self::with_source(HttpFetcher::new()?))
    }

    pub fn with_timeout(timeout_secs: u64) -> Result<Self> {
        let fetcher = HttpFetcher::with_timeout(Duration::from_secs(timeout_secs))?;
        Ok(Self::with_source(fetcher))
    }
}

impl<S: LinkSource> Crawler<S> {
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            in_flight: None,
            progress_callback: None,
        }
    }

    /// Cap the number of fetches outstanding at once. Unbounded by default.
    pub fn with_max_in_flight(mut self, max: usize) -> Self {
        self.in_flight = Some(Arc::new(Semaphore::new(max.max(1))));
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Crawl `seed` to its depth and return the finished tree.
    ///
    /// Never fails: unreachable pages simply contribute no links.
    pub async fn crawl(&self, seed: &Seed) -> CrawlTree {
        info!("Starting crawl of {} to depth {}", seed.url, seed.depth);
        let start = Instant::now();

        let tree = Mutex::new(CrawlTree::new(seed.url.clone(), seed.depth));
        self.expand(&tree, NodeId::ROOT, seed.depth).await;

        let mut tree = tree.into_inner();
        tree.finish(start.elapsed());
        debug!("{}", tree.summary());
        tree
    }

    fn expand<'a>(
        &'a self,
        tree: &'a Mutex<CrawlTree>,
        id: NodeId,
        remaining: usize,
    ) -> BoxFuture<'a, ()> {
        async move {
            if remaining == 0 {
                return;
            }

            let url = tree.lock().await.node(id).url.clone();
            let links = self.fetch(&url).await;
            tree.lock().await.mark_fetched(id);

            join_all(
                links
                    .into_iter()
                    .map(|href| self.visit(tree, id, href, remaining - 1)),
            )
            .await;
        }
        .boxed()
    }

    async fn visit(&self, tree: &Mutex<CrawlTree>, parent: NodeId, href: String, remaining: usize) {
        let attached = tree.lock().await.attach(parent, &href);

        match attached {
            Attach::New(child) => self.expand(tree, child, remaining).await,
            Attach::Existing(child) => debug!("Already mapped: {} ({:?})", href, child),
        }
    }

    async fn fetch(&self, url: &str) -> Vec<String> {
        // Held until the fetch completes
        let _permit = match &self.in_flight {
            Some(semaphore) => semaphore.clone().acquire_owned().await.ok(),
            None => None,
        };

        if let Some(ref callback) = self.progress_callback {
            callback(url.to_string());
        }

        self.source.fetch_links(url).await
    }
}
