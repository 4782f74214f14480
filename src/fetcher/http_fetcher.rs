use std::collections::BTreeSet;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::app::Result;
use crate::config::ApiConfig;
use crate::domain::{Category, Comment, PostBody, PostMeta, User};
use crate::fetcher::{EntityFetcher, Fetched, PostFilter};

pub struct HttpFetcher {
    client: Client,
    base_url: Url,
}

impl HttpFetcher {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .brotli(true)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            base_url: Self::parse_base_url(&config.base_url)?,
        })
    }

    /// Endpoint paths are joined relative to the base, so it must end in `/`.
    fn parse_base_url(raw: &str) -> Result<Url> {
        let mut raw = raw.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        Ok(Url::parse(&raw)?)
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    fn list_posts_url(&self, filter: &PostFilter, exclude: &BTreeSet<i64>, limit: usize) -> Result<Url> {
        let mut url = self.endpoint("posts")?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("limit", &limit.to_string());
            if let Some(section) = filter.section {
                query.append_pair("section", &section.to_string());
            }
            if let Some(category) = filter.category {
                query.append_pair("category", &category.to_string());
            }
            if let Some(user) = filter.user {
                query.append_pair("user", &user.to_string());
            }
            if !exclude.is_empty() {
                let ids: Vec<String> = exclude.iter().map(i64::to_string).collect();
                query.append_pair("exclude", &ids.join(","));
            }
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<Fetched<T>> {
        let response = self.client.get(url.clone()).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            tracing::debug!("{} not found", url);
            return Ok(Fetched::NotFound);
        }

        response.error_for_status_ref()?;

        Ok(Fetched::Found(response.json().await?))
    }
}

#[async_trait]
impl EntityFetcher for HttpFetcher {
    async fn get_post(&self, id: i64) -> Result<Fetched<PostMeta>> {
        self.get_json(self.endpoint(&format!("posts/{}", id))?).await
    }

    async fn get_post_body(&self, post_id: i64) -> Result<Fetched<PostBody>> {
        self.get_json(self.endpoint(&format!("posts/{}/content", post_id))?)
            .await
    }

    async fn get_user(&self, id: i64) -> Result<Fetched<User>> {
        self.get_json(self.endpoint(&format!("users/{}", id))?).await
    }

    async fn get_category(&self, id: i64) -> Result<Fetched<Category>> {
        self.get_json(self.endpoint(&format!("categories/{}", id))?)
            .await
    }

    async fn list_posts(
        &self,
        filter: &PostFilter,
        exclude: &BTreeSet<i64>,
        limit: usize,
    ) -> Result<Fetched<Vec<PostMeta>>> {
        self.get_json(self.list_posts_url(filter, exclude, limit)?)
            .await
    }

    async fn list_comments(&self, post_id: i64) -> Result<Fetched<Vec<Comment>>> {
        self.get_json(self.endpoint(&format!("posts/{}/comments", post_id))?)
            .await
    }

    async fn list_replies(&self, comment_id: i64) -> Result<Fetched<Vec<Comment>>> {
        self.get_json(self.endpoint(&format!("comments/{}/replies", comment_id))?)
            .await
    }
}
