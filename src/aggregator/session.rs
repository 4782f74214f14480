use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use crate::aggregator::{Aggregator, PostFilter};
use crate::app::Result;
use crate::domain::{PostCard, PostMeta};

/// One "load more" feed: remembers which posts were already delivered and
/// asks the API to leave them out of the next page.
///
/// Methods take `&mut self`, so at most one page request per session can
/// be in flight. Session state only changes once a page request has
/// succeeded; a failed or cancelled request leaves it untouched.
pub struct FeedSession {
    aggregator: Arc<Aggregator>,
    filter: PostFilter,
    page_size: usize,
    excluded: BTreeSet<i64>,
    cards: Vec<PostCard>,
    exhausted: bool,
}

struct Page {
    ids: Vec<i64>,
    cards: Vec<PostCard>,
}

impl FeedSession {
    pub fn new(aggregator: Arc<Aggregator>, filter: PostFilter, page_size: usize) -> Self {
        Self {
            aggregator,
            filter,
            page_size: page_size.max(1),
            excluded: BTreeSet::new(),
            cards: Vec::new(),
            exhausted: false,
        }
    }

    pub fn filter(&self) -> &PostFilter {
        &self.filter
    }

    /// Every card delivered since the last refresh, in delivery order.
    pub fn cards(&self) -> &[PostCard] {
        &self.cards
    }

    pub fn excluded(&self) -> &BTreeSet<i64> {
        &self.excluded
    }

    /// True once a page came back without new posts. Cleared by
    /// [`refresh`](Self::refresh).
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Fetch and compose the next page, returning only the new cards.
    pub async fn next_page(&mut self) -> Result<&[PostCard]> {
        if self.exhausted {
            tracing::debug!("Feed {:?} exhausted, not fetching", self.filter);
            return Ok(&[]);
        }

        let page = self.fetch_page(&self.excluded).await?;
        Ok(self.append(page))
    }

    /// Start over: forget delivered posts and load the first page.
    ///
    /// The reset is applied together with the first page, so a failed
    /// refresh keeps the previous session intact.
    pub async fn refresh(&mut self) -> Result<&[PostCard]> {
        let page = self.fetch_page(&BTreeSet::new()).await?;

        self.excluded.clear();
        self.cards.clear();
        self.exhausted = false;

        Ok(self.append(page))
    }

    async fn fetch_page(&self, exclude: &BTreeSet<i64>) -> Result<Page> {
        let posts = self
            .aggregator
            .fetcher()
            .list_posts(&self.filter, exclude, self.page_size)
            .await?
            .or_empty();

        let posts = dedup_page(posts, exclude);
        let ids = posts.iter().map(|post| post.id).collect();
        let cards = self.aggregator.aggregate(posts).await;

        Ok(Page { ids, cards })
    }

    fn append(&mut self, page: Page) -> &[PostCard] {
        if page.ids.is_empty() {
            tracing::debug!("Feed {:?} has no more posts", self.filter);
            self.exhausted = true;
            return &[];
        }

        self.excluded.extend(page.ids);
        tracing::debug!(
            "Feed {:?}: {} new cards, {} posts excluded",
            self.filter,
            page.cards.len(),
            self.excluded.len()
        );

        let start = self.cards.len();
        self.cards.extend(page.cards);
        &self.cards[start..]
    }
}

/// Drop posts that were already delivered or repeat within the page.
fn dedup_page(posts: Vec<PostMeta>, exclude: &BTreeSet<i64>) -> Vec<PostMeta> {
    let received = posts.len();
    let mut seen = HashSet::new();
    let posts: Vec<PostMeta> = posts
        .into_iter()
        .filter(|post| !exclude.contains(&post.id) && seen.insert(post.id))
        .collect();

    if posts.len() < received {
        tracing::warn!("Dropped {} repeated posts from page", received - posts.len());
    }
    posts
}
