use std::sync::Arc;

use futures::future::join_all;

use crate::aggregator::fallback::{normalize_body, resolve};
use crate::app::{FeedloomError, Result};
use crate::domain::{
    sort_oldest_first, Category, Comment, CommentCard, PostBody, PostCard, PostMeta, ReplyCard, Resolved, User,
};
use crate::fetcher::{EntityFetcher, Fetched};

/// Enriches a single root entity with its related records.
///
/// Cheap to clone; every composition task gets its own copy.
#[derive(Clone)]
pub struct Composer {
    fetcher: Arc<dyn EntityFetcher + Send + Sync>,
}

impl Composer {
    pub fn new(fetcher: Arc<dyn EntityFetcher + Send + Sync>) -> Self {
        Self { fetcher }
    }

    /// Fetch body, author and category concurrently and merge them.
    pub async fn compose_post(&self, post: PostMeta) -> PostCard {
        let (body, author, category) = tokio::join!(
            self.fetcher.get_post_body(post.id),
            self.fetcher.get_user(post.user_id),
            self.fetcher.get_category(post.category_id),
        );

        self.merge_post(post, body, author, category)
    }

    /// Post detail: the composer also owns the root fetch.
    ///
    /// The body only needs the post id, so it is fetched alongside the
    /// metadata. Fails only when the post itself cannot be obtained.
    pub async fn compose_post_by_id(&self, id: i64) -> Result<PostCard> {
        let (post, body) = tokio::join!(self.fetcher.get_post(id), self.fetcher.get_post_body(id));

        let post = match post? {
            Fetched::Found(post) => post,
            Fetched::NotFound => return Err(FeedloomError::PostNotFound(id)),
        };

        let (author, category) = tokio::join!(
            self.fetcher.get_user(post.user_id),
            self.fetcher.get_category(post.category_id),
        );

        Ok(self.merge_post(post, body, author, category))
    }

    fn merge_post(
        &self,
        post: PostMeta,
        body: Result<Fetched<PostBody>>,
        author: Result<Fetched<User>>,
        category: Result<Fetched<Category>>,
    ) -> PostCard {
        let post_id = post.id;
        let owner = format!("post {}", post_id);
        let body = resolve("body", &owner, body, || PostBody::failed(post_id)).map(normalize_body);
        let author = resolve("author", &owner, author, || User::unknown(post.user_id));
        let category = resolve("category", &owner, category, || {
            Category::uncategorized(post.category_id)
        });

        PostCard::new(post, body, author, category)
    }

    /// Compose a root comment: its author and its replies, concurrently.
    pub async fn compose_comment(&self, comment: Comment) -> CommentCard {
        self.compose_comment_with(comment, Vec::new()).await
    }

    /// `known_replies` are the replies to this comment already seen in the
    /// post-wide listing. They stand in for the reply fetch if it fails.
    pub(crate) async fn compose_comment_with(&self, comment: Comment, known_replies: Vec<Comment>) -> CommentCard {
        let (author, replies) = tokio::join!(
            self.resolve_author(comment.user_id),
            self.compose_replies(comment.id, known_replies),
        );

        CommentCard::new(comment, author, replies)
    }

    /// Replies for one root comment, oldest first.
    async fn compose_replies(&self, comment_id: i64, known_replies: Vec<Comment>) -> Vec<ReplyCard> {
        let replies = match self.fetcher.list_replies(comment_id).await {
            Ok(replies) => replies.or_empty(),
            Err(e) => {
                tracing::warn!(
                    "Failed to fetch replies for comment {}: {}, keeping {} known",
                    comment_id,
                    e,
                    known_replies.len()
                );
                known_replies
            }
        };

        let mut cards = join_all(replies.into_iter().map(|reply| self.compose_reply(reply))).await;
        sort_oldest_first(&mut cards);
        cards
    }

    async fn compose_reply(&self, reply: Comment) -> ReplyCard {
        let author = self.resolve_author(reply.user_id).await;
        ReplyCard::new(reply, author)
    }

    async fn resolve_author(&self, user_id: i64) -> Resolved<User> {
        let result = self.fetcher.get_user(user_id).await;
        resolve("author", format!("user {}", user_id), result, || User::unknown(user_id))
    }
}
