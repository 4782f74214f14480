use std::collections::HashMap;

use crate::aggregator::Aggregator;
use crate::app::Result;
use crate::domain::{Comment, CommentCard, PostDetail, Resolved};

impl Aggregator {
    /// Build the comment tree for a post: root comments newest first, each
    /// with its replies oldest first.
    ///
    /// A post without comments (including a not-found listing) yields an
    /// empty tree. Only a failed comment listing is an error.
    pub async fn assemble_comments(&self, post_id: i64) -> Result<Vec<CommentCard>> {
        let comments = self.fetcher.list_comments(post_id).await?.or_empty();
        if comments.is_empty() {
            return Ok(Vec::new());
        }

        let (roots, mut replies) = partition(comments);
        let orphans: usize = replies
            .iter()
            .filter(|(parent, _)| !roots.iter().any(|root| root.id == **parent))
            .map(|(_, group)| group.len())
            .sum();
        if orphans > 0 {
            tracing::debug!("Ignoring {} replies without a root comment on post {}", orphans, post_id);
        }

        let roots: Vec<(Comment, Vec<Comment>)> = roots
            .into_iter()
            .map(|root| {
                let known = replies.remove(&root.id).unwrap_or_default();
                (root, known)
            })
            .collect();

        let mut cards = self
            .scatter(
                roots,
                |composer, (root, known)| async move { composer.compose_comment_with(root, known).await },
                |(root, known)| CommentCard::degraded(root, known),
            )
            .await;

        cards.sort_by(|a, b| {
            b.comment
                .created_at
                .cmp(&a.comment.created_at)
                .then(b.id().cmp(&a.id()))
        });

        Ok(cards)
    }

    /// Post detail view: the post card and its comment tree, loaded
    /// concurrently. A failed comment listing leaves the detail usable with
    /// an empty tree.
    pub async fn post_detail(&self, post_id: i64) -> Result<PostDetail> {
        let (post, comments) = tokio::join!(
            self.composer.compose_post_by_id(post_id),
            self.assemble_comments(post_id),
        );

        let comments = match comments {
            Ok(comments) => Resolved::Fetched(comments),
            Err(e) => {
                tracing::warn!("Failed to load comments for post {}: {}", post_id, e);
                Resolved::Fallback(Vec::new())
            }
        };

        Ok(PostDetail { post: post?, comments })
    }
}

/// Split a post's comments into roots and replies grouped by parent id.
fn partition(comments: Vec<Comment>) -> (Vec<Comment>, HashMap<i64, Vec<Comment>>) {
    let mut roots = Vec::new();
    let mut replies: HashMap<i64, Vec<Comment>> = HashMap::new();

    for comment in comments {
        if comment.is_reply() {
            replies.entry(comment.parent_id).or_default().push(comment);
        } else {
            roots.push(comment);
        }
    }

    (roots, replies)
}
