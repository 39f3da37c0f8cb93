// src/crawl/engine.rs
// =============================================================================
// This module implements the parallel crawl itself.
//
// How it works:
// 1. crawl() fixes ONE deadline (now + timeout) for the whole crawl
// 2. It spawns one traversal task per starting URL onto the worker pool
// 3. Each task visits its URL, merges the page's words into the shared
//    counts, then spawns a child task per link with one less depth
// 4. Every task waits for all of its children before it finishes, so when
//    the root tasks are done the whole crawl is done
// 5. The accumulated counts are ranked into the final CrawlResult
//
// The worker pool is a dedicated multi-threaded tokio runtime with a fixed
// number of worker threads. Children are spawned first and joined after,
// never submitted-and-awaited from inside the pool one by one, so a wide
// or deep link graph just queues more tasks; it cannot deadlock the pool.
//
// Deadline handling is cooperative: a task checks the deadline before it
// starts a fetch, but a fetch already in flight is allowed to finish. A
// crawl can therefore overrun its timeout by up to one fetch.
// =============================================================================

use super::rank::rank;
use super::state::CrawlState;
use super::{CrawlResult, PatternSet};
use crate::config::{ConfigError, CrawlSettings};
use crate::parser::PageParser;
use futures::future::{BoxFuture, FutureExt};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::runtime::Runtime;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum CrawlError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to start worker pool: {0}")]
    Runtime(#[source] std::io::Error),
}

pub struct Crawler {
    parser: Arc<dyn PageParser>,
    ignored_urls: Arc<PatternSet>,
    timeout: Duration,
    max_depth: usize,
    popular_word_count: usize,
    parallelism: usize,
    pool: Runtime,
}

impl Crawler {
    /// Builds a crawler and its worker pool
    ///
    /// `host_parallelism` is how many threads the machine can usefully run;
    /// the pool is sized to the smaller of that and `settings.parallelism`.
    pub fn new(
        settings: CrawlSettings,
        parser: Arc<dyn PageParser>,
        host_parallelism: usize,
    ) -> Result<Self, CrawlError> {
        if settings.parallelism == 0 {
            return Err(ConfigError::ZeroParallelism.into());
        }
        let parallelism = settings.parallelism.min(host_parallelism).max(1);

        let pool = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(parallelism)
            .thread_name("crawl-worker")
            .enable_all()
            .build()
            .map_err(CrawlError::Runtime)?;

        Ok(Self {
            parser,
            ignored_urls: Arc::new(settings.ignored_urls),
            timeout: settings.timeout,
            max_depth: settings.max_depth,
            popular_word_count: settings.popular_word_count,
            parallelism,
            pool,
        })
    }

    /// Number of worker threads actually in the pool
    pub fn parallelism(&self) -> usize {
        self.parallelism
    }

    /// Crawls from `starting_urls` and blocks until the crawl is finished
    ///
    /// Page failures and deadline expiry only make the result smaller; they
    /// are never returned as errors.
    pub fn crawl(&self, starting_urls: &[String]) -> CrawlResult {
        if starting_urls.is_empty() {
            warn!("no starting URLs given");
            return CrawlResult::empty();
        }

        let started = Instant::now();
        let task = Arc::new(Traversal {
            parser: Arc::clone(&self.parser),
            ignored_urls: Arc::clone(&self.ignored_urls),
            state: CrawlState::default(),
            // A timeout too large to add to the clock means no deadline
            deadline: started.checked_add(self.timeout),
        });

        info!(
            start_urls = starting_urls.len(),
            max_depth = self.max_depth,
            parallelism = self.parallelism,
            url_exclusions = !self.ignored_urls.is_empty(),
            timeout_ms = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
            "starting crawl"
        );

        self.pool.block_on(async {
            let mut roots = JoinSet::new();
            for url in starting_urls {
                roots.spawn(Arc::clone(&task).visit(url.clone(), self.max_depth));
            }
            join_all(&mut roots).await;
        });

        let counts = task.state.words.snapshot();
        let urls_visited = task.state.visited.len();

        if task.state.visited.is_empty() {
            warn!("crawl finished without visiting any page");
        }
        info!(
            urls_visited,
            distinct_words = counts.len(),
            total_words = task.state.words.total(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "crawl finished"
        );

        CrawlResult {
            word_counts: rank(&counts, self.popular_word_count),
            urls_visited,
        }
    }
}

// Everything one traversal task needs; shared by every task of one crawl
struct Traversal {
    parser: Arc<dyn PageParser>,
    ignored_urls: Arc<PatternSet>,
    state: CrawlState,
    deadline: Option<Instant>,
}

impl Traversal {
    // Visits one URL and, recursively, everything it links to
    //
    // Returns a boxed future because an async fn cannot call itself
    // directly (its future type would contain itself).
    fn visit(self: Arc<Self>, url: String, remaining_depth: usize) -> BoxFuture<'static, ()> {
        async move {
            if remaining_depth == 0 {
                return;
            }
            if self.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                debug!(%url, "deadline reached, not visiting");
                return;
            }
            if self.ignored_urls.matches(&url) {
                debug!(%url, "ignored by pattern");
                return;
            }
            if !self.state.visited.claim(&url) {
                return;
            }

            debug!(%url, remaining_depth, "visiting");
            let page = match self.parser.parse(&url).await {
                Ok(page) => page,
                Err(e) => {
                    warn!(%url, error = %e, "failed to fetch page");
                    return;
                }
            };

            self.state.words.merge(&page.word_counts);

            let mut children = JoinSet::new();
            for link in page.links {
                children.spawn(Arc::clone(&self).visit(link, remaining_depth - 1));
            }
            join_all(&mut children).await;
        }
        .boxed()
    }
}

// Waits for every task in the set; a panicked task is logged, not propagated
async fn join_all(tasks: &mut JoinSet<()>) {
    while let Some(joined) = tasks.join_next().await {
        if let Err(e) = joined {
            warn!(error = %e, "crawl task failed");
        }
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why does visit() return BoxFuture instead of being an async fn?
//    - An async fn compiles to a state machine that stores the futures it
//      awaits; a recursive one would have to store itself, an infinite size
//    - Boxing puts the child future on the heap, so its size is known
//    - .boxed() (from futures::FutureExt) also requires Send, which
//      tokio::spawn needs anyway
//
// 2. Why JoinSet and not tokio::spawn + Vec<JoinHandle>?
//    - A JoinSet owns its tasks: dropping it aborts them, so no task can
//      outlive the visit that started it
//    - join_next() hands back results as children finish, in any order
//
// 3. Why does waiting on children not block a worker thread?
//    - .await suspends the parent task and frees its worker for other tasks
//    - So even a one-thread pool can run a parent and all its children
//
// 4. Why is the deadline an Option?
//    - Instant + Duration panics if the sum does not fit the clock
//    - checked_add returns None instead, meaning the crawl has no time limit
// -----------------------------------------------------------------------------
