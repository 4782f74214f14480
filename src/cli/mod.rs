pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::aggregator::PostFilter;
use crate::config::Config;

#[derive(Parser)]
#[command(name = "feedloom")]
#[command(about = "Browse posts and comments from a content API", long_about = None)]
pub struct Cli {
    /// Base URL of the content API (overrides the config file)
    #[arg(long, global = true)]
    pub api: Option<String>,

    /// Maximum number of cards composed concurrently
    #[arg(short, long, global = true)]
    pub concurrency: Option<usize>,

    /// Path to the config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print cards as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the post feed, page by page
    Feed {
        /// Only posts from this section
        #[arg(long)]
        section: Option<i64>,

        /// Only posts in this category
        #[arg(long)]
        category: Option<i64>,

        /// Only posts by this user
        #[arg(long)]
        user: Option<i64>,

        /// Number of pages to load
        #[arg(short, long, default_value_t = 1)]
        pages: usize,

        /// Posts per page
        #[arg(long)]
        page_size: Option<usize>,
    },
    /// Show a post together with its comments
    Post {
        /// Post id
        id: i64,
    },
    /// Show the comment tree of a post
    Comments {
        /// Post id
        post_id: i64,
    },
}

impl Cli {
    /// Apply command-line overrides on top of the loaded config.
    pub fn apply(&self, config: &mut Config) {
        if let Some(api) = &self.api {
            config.api.base_url = api.clone();
        }
        if let Some(concurrency) = self.concurrency {
            config.aggregation.max_concurrency = concurrency;
        }
        if let Commands::Feed {
            page_size: Some(page_size),
            ..
        } = self.command
        {
            config.aggregation.page_size = page_size;
        }
    }
}

impl Commands {
    pub fn post_filter(&self) -> PostFilter {
        match self {
            Commands::Feed {
                section,
                category,
                user,
                ..
            } => PostFilter {
                section: *section,
                category: *category,
                user: *user,
            },
            _ => PostFilter::default(),
        }
    }
}
