pub mod http_fetcher;
#[cfg(test)]
pub(crate) mod stub;

use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::app::Result;
use crate::domain::{Category, Comment, PostBody, PostMeta, User};

#[derive(Debug, Clone, PartialEq)]
pub enum Fetched<T> {
    /// The entity exists and was returned
    Found(T),
    /// The API reported that nothing exists (HTTP 404)
    NotFound,
}

impl<T> Fetched<T> {
    pub fn found(self) -> Option<T> {
        match self {
            Fetched::Found(value) => Some(value),
            Fetched::NotFound => None,
        }
    }
}

impl<T> Fetched<Vec<T>> {
    /// Listings that report "not found" simply have no entries.
    pub fn or_empty(self) -> Vec<T> {
        self.found().unwrap_or_default()
    }
}

/// Which posts a listing request should select from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub section: Option<i64>,
    pub category: Option<i64>,
    pub user: Option<i64>,
}

impl PostFilter {
    pub fn section(id: i64) -> Self {
        Self {
            section: Some(id),
            ..Self::default()
        }
    }

    pub fn category(id: i64) -> Self {
        Self {
            category: Some(id),
            ..Self::default()
        }
    }

    pub fn user(id: i64) -> Self {
        Self {
            user: Some(id),
            ..Self::default()
        }
    }
}

/// Single-entity access to the remote content API.
///
/// A missing entity is [`Fetched::NotFound`], never an error. Errors are
/// reserved for transport failures, timeouts and malformed responses.
#[async_trait]
pub trait EntityFetcher {
    async fn get_post(&self, id: i64) -> Result<Fetched<PostMeta>>;

    async fn get_post_body(&self, post_id: i64) -> Result<Fetched<PostBody>>;

    async fn get_user(&self, id: i64) -> Result<Fetched<User>>;

    async fn get_category(&self, id: i64) -> Result<Fetched<Category>>;

    /// Up to `limit` posts matching `filter` whose ids are not in `exclude`.
    async fn list_posts(
        &self,
        filter: &PostFilter,
        exclude: &BTreeSet<i64>,
        limit: usize,
    ) -> Result<Fetched<Vec<PostMeta>>>;

    /// Every comment on a post, roots and replies alike.
    async fn list_comments(&self, post_id: i64) -> Result<Fetched<Vec<Comment>>>;

    /// Replies whose parent is `comment_id`.
    async fn list_replies(&self, comment_id: i64) -> Result<Fetched<Vec<Comment>>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_listing_is_empty() {
        let listing: Fetched<Vec<i64>> = Fetched::NotFound;
        assert!(listing.or_empty().is_empty());

        let listing = Fetched::Found(vec![1, 2]);
        assert_eq!(listing.or_empty(), vec![1, 2]);
    }

    #[test]
    fn test_filter_constructors() {
        assert_eq!(PostFilter::category(4).category, Some(4));
        assert_eq!(PostFilter::section(2).section, Some(2));
        assert_eq!(PostFilter::user(9).user, Some(9));
        assert_eq!(PostFilter::user(9).section, None);
    }
}
