//! Card aggregation: turns independently fetched, related records into
//! denormalized cards.
//!
//! ```text
//! Aggregator ─┬─ per item task ── Composer ─┬─ body
//!             │                             ├─ author
//!             │                             └─ category
//!             └─ reorder by input index → visibility filter
//! ```
//!
//! Every composition level joins on all of its branches. A branch that
//! fails falls back to a sentinel; an item whose task dies is replaced by
//! a degraded card. Only a failed root fetch is reported as an error.

mod comments;
mod composer;
mod fallback;
mod list;
mod session;

pub use composer::Composer;
pub use session::FeedSession;

pub use crate::fetcher::PostFilter;

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::fetcher::EntityFetcher;

pub const DEFAULT_CONCURRENCY: usize = 16;

pub struct Aggregator {
    fetcher: Arc<dyn EntityFetcher + Send + Sync>,
    composer: Composer,
    semaphore: Arc<Semaphore>,
}

impl Aggregator {
    pub fn new(fetcher: Arc<dyn EntityFetcher + Send + Sync>) -> Self {
        Self::with_concurrency(fetcher, DEFAULT_CONCURRENCY)
    }

    /// `max_concurrency` bounds how many items are composed at once; each
    /// item still fetches its own branches in parallel.
    pub fn with_concurrency(fetcher: Arc<dyn EntityFetcher + Send + Sync>, max_concurrency: usize) -> Self {
        Self {
            composer: Composer::new(fetcher.clone()),
            fetcher,
            semaphore: Arc::new(Semaphore::new(max_concurrency.max(1))),
        }
    }

    pub fn fetcher(&self) -> &Arc<dyn EntityFetcher + Send + Sync> {
        &self.fetcher
    }

    /// Compose every root in its own task and return the results in input
    /// order.
    ///
    /// Tasks live in a [`JoinSet`], so dropping the returned future aborts
    /// whatever is still in flight. A task that panics leaves its slot empty
    /// and the root is replaced by `degrade(root)`.
    async fn scatter<R, C, F, Fut>(&self, roots: Vec<R>, compose: F, degrade: impl Fn(R) -> C) -> Vec<C>
    where
        R: Clone,
        C: Send + 'static,
        F: Fn(Composer, R) -> Fut,
        Fut: Future<Output = C> + Send + 'static,
    {
        let mut tasks = JoinSet::new();

        for (index, root) in roots.iter().cloned().enumerate() {
            let semaphore = self.semaphore.clone();
            let work = compose(self.composer.clone(), root);

            tasks.spawn(async move {
                let _permit = semaphore.acquire().await;
                (index, work.await)
            });
        }

        let mut slots: Vec<Option<C>> = roots.iter().map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, card)) => slots[index] = Some(card),
                Err(e) => {
                    tracing::error!("Card composition task failed: {}", e);
                }
            }
        }

        roots
            .into_iter()
            .zip(slots)
            .enumerate()
            .map(|(index, (root, slot))| match slot {
                Some(card) => card,
                None => {
                    tracing::warn!("Item {} degraded after failed composition", index);
                    degrade(root)
                }
            })
            .collect()
    }
}
