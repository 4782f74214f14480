//! # Feedloom
//!
//! A client-side aggregation layer over a remote content API of posts,
//! comments, users and categories.
//!
//! ## Architecture
//!
//! ```text
//! EntityFetcher → Composer → Aggregator → FeedSession → CLI
//! ```
//!
//! - [`fetcher`]: single-entity access to the API, with "not found" as an outcome
//! - [`aggregator`]: concurrent composition of cards, comment trees and feed paging
//! - [`domain`]: entities and the cards composed from them
//!
//! ## Quick Start
//!
//! ```bash
//! # First page of the feed
//! feedloom feed
//!
//! # Three pages of one category
//! feedloom feed --category 4 --pages 3
//!
//! # A post with its comments, as JSON
//! feedloom --json post 1024
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together the config,
/// the HTTP fetcher and the aggregator.
pub mod app;

/// Card composition over the entity fetcher.
///
/// - [`Aggregator`](aggregator::Aggregator): feed listings, comment trees, post detail
/// - [`Composer`](aggregator::Composer): enrichment of one post or comment
/// - [`FeedSession`](aggregator::FeedSession): exclusion-list pagination
pub mod aggregator;

/// Command-line interface using clap.
///
/// - `feed` - Show the feed page by page
/// - `post <id>` - Show a post with its comments
/// - `comments <post_id>` - Show a post's comment tree
pub mod cli;

/// Configuration loaded from `~/.config/feedloom/config.toml`.
pub mod config;

/// Core domain models.
///
/// - Entities: [`PostMeta`](domain::PostMeta), [`PostBody`](domain::PostBody),
///   [`User`](domain::User), [`Category`](domain::Category), [`Comment`](domain::Comment)
/// - Cards: [`PostCard`](domain::PostCard), [`CommentCard`](domain::CommentCard),
///   [`ReplyCard`](domain::ReplyCard)
pub mod domain;

/// Entity fetching.
///
/// - [`EntityFetcher`](fetcher::EntityFetcher): async trait over the content API
/// - [`HttpFetcher`](fetcher::http_fetcher::HttpFetcher): reqwest-based implementation
pub mod fetcher;
