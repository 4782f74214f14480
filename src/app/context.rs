use std::sync::Arc;

use crate::aggregator::{Aggregator, FeedSession, PostFilter};
use crate::app::error::Result;
use crate::config::Config;
use crate::fetcher::http_fetcher::HttpFetcher;
use crate::fetcher::EntityFetcher;

pub struct AppContext {
    pub config: Config,
    pub aggregator: Arc<Aggregator>,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let fetcher: Arc<dyn EntityFetcher + Send + Sync> = Arc::new(HttpFetcher::new(&config.api)?);
        Ok(Self::with_fetcher(config, fetcher))
    }

    pub fn with_fetcher(config: Config, fetcher: Arc<dyn EntityFetcher + Send + Sync>) -> Self {
        let aggregator = Arc::new(Aggregator::with_concurrency(
            fetcher,
            config.aggregation.max_concurrency,
        ));

        Self { config, aggregator }
    }

    /// Start a new feed session using the configured page size.
    pub fn feed_session(&self, filter: PostFilter) -> FeedSession {
        FeedSession::new(
            self.aggregator.clone(),
            filter,
            self.config.aggregation.page_size,
        )
    }
}
