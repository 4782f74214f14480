//! Denormalized, read-only views composed from fetched entities.

use std::ops::Deref;

use serde::{Serialize, Serializer};

use super::comment::Comment;
use super::post::{PostBody, PostMeta, MAX_POST_IMAGES};
use super::user::{Category, User};

/// Outcome of one branch fetch: the real entity, or the sentinel that
/// replaced it.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved<T> {
    Fetched(T),
    Fallback(T),
}

impl<T> Resolved<T> {
    pub fn value(&self) -> &T {
        match self {
            Resolved::Fetched(value) | Resolved::Fallback(value) => value,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Resolved::Fallback(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Resolved<U> {
        match self {
            Resolved::Fetched(value) => Resolved::Fetched(f(value)),
            Resolved::Fallback(value) => Resolved::Fallback(f(value)),
        }
    }
}

impl<T> Deref for Resolved<T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.value()
    }
}

impl<T: Serialize> Serialize for Resolved<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value().serialize(serializer)
    }
}

/// Interaction counters. The aggregation layer never fetches these.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Engagement {
    pub likes: u32,
    pub comments: u32,
    pub shares: u32,
}

/// Per-viewer state shown on a card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ViewerFlags {
    pub liked: bool,
    pub bookmarked: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostCard {
    pub post: PostMeta,
    pub body: Resolved<PostBody>,
    pub author: Resolved<User>,
    pub category: Resolved<Category>,
    pub engagement: Engagement,
    pub viewer: ViewerFlags,
}

impl PostCard {
    pub fn new(
        post: PostMeta,
        body: Resolved<PostBody>,
        author: Resolved<User>,
        category: Resolved<Category>,
    ) -> Self {
        Self {
            post,
            body,
            author,
            category,
            engagement: Engagement::default(),
            viewer: ViewerFlags::default(),
        }
    }

    /// Minimal card for a post whose composition did not complete.
    ///
    /// Keeps everything known from the post itself; every branch is a
    /// sentinel.
    pub fn degraded(post: PostMeta) -> Self {
        let body = Resolved::Fallback(PostBody::failed(post.id));
        let author = Resolved::Fallback(User::failed(post.user_id));
        let category = Resolved::Fallback(Category::uncategorized(post.category_id));
        Self::new(post, body, author, category)
    }

    pub fn id(&self) -> i64 {
        self.post.id
    }

    pub fn is_visible(&self) -> bool {
        self.post.visible
    }

    pub fn is_degraded(&self) -> bool {
        self.body.is_fallback() || self.author.is_fallback() || self.category.is_fallback()
    }

    /// Images to display: the body's when it has any, the listing's otherwise.
    pub fn images(&self) -> &[String] {
        let images = if self.body.images.is_empty() {
            &self.post.images
        } else {
            &self.body.images
        };
        &images[..images.len().min(MAX_POST_IMAGES)]
    }

    pub fn has_image(&self) -> bool {
        !self.images().is_empty()
    }
}

/// A reply under a root comment. Replies never own further replies.
#[derive(Debug, Clone, Serialize)]
pub struct ReplyCard {
    pub comment: Comment,
    pub author: Resolved<User>,
    pub engagement: Engagement,
    pub viewer: ViewerFlags,
}

impl ReplyCard {
    pub fn new(comment: Comment, author: Resolved<User>) -> Self {
        Self {
            comment,
            author,
            engagement: Engagement::default(),
            viewer: ViewerFlags::default(),
        }
    }

    pub fn id(&self) -> i64 {
        self.comment.id
    }
}

/// A root comment with its replies, oldest first.
#[derive(Debug, Clone, Serialize)]
pub struct CommentCard {
    pub comment: Comment,
    pub author: Resolved<User>,
    pub replies: Vec<ReplyCard>,
    pub engagement: Engagement,
    pub viewer: ViewerFlags,
}

impl CommentCard {
    pub fn new(comment: Comment, author: Resolved<User>, replies: Vec<ReplyCard>) -> Self {
        Self {
            comment,
            author,
            replies,
            engagement: Engagement::default(),
            viewer: ViewerFlags::default(),
        }
    }

    /// Card for a root comment whose composition did not complete.
    ///
    /// `known_replies` are kept, oldest first, with placeholder authors.
    pub fn degraded(comment: Comment, known_replies: Vec<Comment>) -> Self {
        let author = Resolved::Fallback(User::failed(comment.user_id));
        let mut replies: Vec<ReplyCard> = known_replies
            .into_iter()
            .map(|reply| {
                let author = Resolved::Fallback(User::failed(reply.user_id));
                ReplyCard::new(reply, author)
            })
            .collect();
        sort_oldest_first(&mut replies);
        Self::new(comment, author, replies)
    }

    pub fn id(&self) -> i64 {
        self.comment.id
    }

    pub fn is_degraded(&self) -> bool {
        self.author.is_fallback()
    }

    /// Reply pagination is not implemented; every reply for a root comment
    /// is fetched in one request, so this is always `false`.
    pub fn has_more_replies(&self) -> bool {
        false
    }
}

/// Order replies by timestamp, then id.
pub fn sort_oldest_first(replies: &mut [ReplyCard]) {
    replies.sort_by(|a, b| {
        a.comment
            .created_at
            .cmp(&b.comment.created_at)
            .then(a.id().cmp(&b.id()))
    });
}

/// A post card together with its comment tree.
#[derive(Debug, Clone, Serialize)]
pub struct PostDetail {
    pub post: PostCard,
    pub comments: Resolved<Vec<CommentCard>>,
}
