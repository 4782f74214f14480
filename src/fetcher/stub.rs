//! In-memory [`EntityFetcher`] for exercising the aggregation layer.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use crate::app::{FeedloomError, Result};
use crate::domain::{Category, Comment, PostBody, PostMeta, User};
use crate::fetcher::{EntityFetcher, Fetched, PostFilter};

pub(crate) fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
}

pub(crate) fn post(id: i64, user_id: i64, category_id: i64) -> PostMeta {
    PostMeta::new(id, user_id, category_id, at(id))
}

pub(crate) fn comment(id: i64, post_id: i64, parent_id: i64, user_id: i64, secs: i64) -> Comment {
    let mut comment = Comment::new(id, post_id, user_id, at(secs));
    comment.parent_id = parent_id;
    comment.text = format!("comment {}", id);
    comment
}

fn failure(what: &str, id: i64) -> FeedloomError {
    FeedloomError::Other(format!("stub failure: {} {}", what, id))
}

#[derive(Default)]
pub(crate) struct StubFetcher {
    /// Posts in listing order
    pub feed: Vec<PostMeta>,
    pub bodies: HashMap<i64, PostBody>,
    pub users: HashMap<i64, User>,
    pub categories: HashMap<i64, Category>,
    /// Comments by post id; a missing entry is reported as not found
    pub comments: HashMap<i64, Vec<Comment>>,
    /// Replies by parent comment id; a missing entry is reported as not found
    pub replies: HashMap<i64, Vec<Comment>>,

    pub failing_posts: HashSet<i64>,
    pub failing_bodies: HashSet<i64>,
    pub failing_users: HashSet<i64>,
    pub failing_categories: HashSet<i64>,
    pub failing_comments: HashSet<i64>,
    pub failing_replies: HashSet<i64>,
    pub panicking_users: HashSet<i64>,
    pub body_delays: HashMap<i64, Duration>,
    pub fail_listing: AtomicBool,

    /// Exclusion sets received by `list_posts`, in call order
    pub exclusions: Mutex<Vec<BTreeSet<i64>>>,
    pub user_calls: AtomicUsize,
    /// `start <id>` / `finish <id>` entries for body fetches, in event order
    pub body_log: Mutex<Vec<String>>,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a post together with a body, an author and a category.
    pub fn add_post(&mut self, post: PostMeta) {
        self.bodies
            .insert(post.id, PostBody::new(post.id, format!("body of {}", post.id)));
        self.add_user(post.user_id);
        self.categories.entry(post.category_id).or_insert_with(|| Category {
            id: post.category_id,
            name: format!("category {}", post.category_id),
            description: String::new(),
        });
        self.feed.push(post);
    }

    pub fn add_user(&mut self, id: i64) {
        self.users.entry(id).or_insert_with(|| User {
            id,
            name: format!("user {}", id),
            avatar: format!("avatars/{}.png", id),
            bio: String::new(),
        });
    }

    pub fn recorded_exclusions(&self) -> Vec<BTreeSet<i64>> {
        self.exclusions.lock().unwrap().clone()
    }

    pub fn recorded_body_log(&self) -> Vec<String> {
        self.body_log.lock().unwrap().clone()
    }
}

#[async_trait]
impl EntityFetcher for StubFetcher {
    async fn get_post(&self, id: i64) -> Result<Fetched<PostMeta>> {
        if self.failing_posts.contains(&id) {
            return Err(failure("post", id));
        }
        Ok(match self.feed.iter().find(|post| post.id == id) {
            Some(post) => Fetched::Found(post.clone()),
            None => Fetched::NotFound,
        })
    }

    async fn get_post_body(&self, post_id: i64) -> Result<Fetched<PostBody>> {
        self.body_log.lock().unwrap().push(format!("start {}", post_id));
        if let Some(delay) = self.body_delays.get(&post_id) {
            tokio::time::sleep(*delay).await;
        }
        self.body_log.lock().unwrap().push(format!("finish {}", post_id));
        if self.failing_bodies.contains(&post_id) {
            return Err(failure("body", post_id));
        }
        Ok(match self.bodies.get(&post_id) {
            Some(body) => Fetched::Found(body.clone()),
            None => Fetched::NotFound,
        })
    }

    async fn get_user(&self, id: i64) -> Result<Fetched<User>> {
        self.user_calls.fetch_add(1, Ordering::SeqCst);
        if self.panicking_users.contains(&id) {
            panic!("stub panic for user {}", id);
        }
        if self.failing_users.contains(&id) {
            return Err(failure("user", id));
        }
        Ok(match self.users.get(&id) {
            Some(user) => Fetched::Found(user.clone()),
            None => Fetched::NotFound,
        })
    }

    async fn get_category(&self, id: i64) -> Result<Fetched<Category>> {
        if self.failing_categories.contains(&id) {
            return Err(failure("category", id));
        }
        Ok(match self.categories.get(&id) {
            Some(category) => Fetched::Found(category.clone()),
            None => Fetched::NotFound,
        })
    }

    async fn list_posts(
        &self,
        filter: &PostFilter,
        exclude: &BTreeSet<i64>,
        limit: usize,
    ) -> Result<Fetched<Vec<PostMeta>>> {
        self.exclusions.lock().unwrap().push(exclude.clone());
        if self.fail_listing.load(Ordering::SeqCst) {
            return Err(FeedloomError::Other("stub failure: listing".into()));
        }

        let posts = self
            .feed
            .iter()
            .filter(|post| !exclude.contains(&post.id))
            .filter(|post| filter.category.is_none_or(|c| post.category_id == c))
            .filter(|post| filter.user.is_none_or(|u| post.user_id == u))
            .take(limit)
            .cloned()
            .collect();
        Ok(Fetched::Found(posts))
    }

    async fn list_comments(&self, post_id: i64) -> Result<Fetched<Vec<Comment>>> {
        if self.failing_comments.contains(&post_id) {
            return Err(failure("comments", post_id));
        }
        Ok(match self.comments.get(&post_id) {
            Some(comments) => Fetched::Found(comments.clone()),
            None => Fetched::NotFound,
        })
    }

    async fn list_replies(&self, comment_id: i64) -> Result<Fetched<Vec<Comment>>> {
        if self.failing_replies.contains(&comment_id) {
            return Err(failure("replies", comment_id));
        }
        Ok(match self.replies.get(&comment_id) {
            Some(replies) => Fetched::Found(replies.clone()),
            None => Fetched::NotFound,
        })
    }
}
