use crate::aggregator::Aggregator;
use crate::domain::{PostCard, PostMeta};

impl Aggregator {
    /// Compose a card for every post, in input order, dropping invisible
    /// posts afterwards.
    ///
    /// Never fails: a post whose composition does not complete is kept as a
    /// degraded card.
    pub async fn aggregate(&self, posts: Vec<PostMeta>) -> Vec<PostCard> {
        if posts.is_empty() {
            return Vec::new();
        }

        let total = posts.len();
        let cards = self
            .scatter(
                posts,
                |composer, post| async move { composer.compose_post(post).await },
                PostCard::degraded,
            )
            .await;

        let degraded = cards.iter().filter(|card| card.is_degraded()).count();
        let visible: Vec<PostCard> = cards.into_iter().filter(PostCard::is_visible).collect();
        tracing::debug!(
            "Aggregated {} posts: {} visible, {} degraded",
            total,
            visible.len(),
            degraded
        );

        visible
    }
}
