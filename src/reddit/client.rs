//! Reddit API HTTP client.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use tokio::sync::RwLock;
use url::Url;

use crate::config::{RedditConfig, TimeWindow};
use crate::error::{Error, Result};
use crate::reddit::types::{Listing, Post, TokenResponse};

/// Reddit OAuth token endpoint.
const AUTH_URL: &str = "https://www.reddit.com/api/v1/access_token";

/// Base URL for authenticated API requests.
const API_BASE: &str = "https://oauth.reddit.com";

/// Maximum listing page size reddit will serve.
const PAGE_SIZE: usize = 100;

/// Source of candidate posts.
#[async_trait]
pub trait PostFeed: Send + Sync {
    /// Fetch candidate posts, most popular first within `window`.
    async fn fetch_candidate_posts(&self, window: TimeWindow) -> Result<Vec<Post>>;
}

/// Application-only reddit client reading the top listing of one multireddit.
pub struct RedditClient {
    client: Client,
    auth_url: String,
    api_base: String,
    app_id: String,
    secret: String,
    multireddit_owner: String,
    multireddit_name: String,
    post_limit: usize,
    token: RwLock<Option<String>>,
}

impl RedditClient {
    /// Create a client for the configured multireddit.
    pub fn new(config: &RedditConfig) -> Result<Self> {
        Self::with_endpoints(config, AUTH_URL, API_BASE)
    }

    /// Create a client against alternative endpoints.
    pub fn with_endpoints(config: &RedditConfig, auth_url: &str, api_base: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| Error::Api(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            auth_url: auth_url.to_string(),
            api_base: api_base.trim_end_matches('/').to_string(),
            app_id: config.app_id.clone(),
            secret: config.secret.clone(),
            multireddit_owner: config.multireddit_owner.clone(),
            multireddit_name: config.multireddit_name.clone(),
            post_limit: config.post_limit,
            token: RwLock::new(None),
        })
    }

    /// Get a bearer token, requesting one on first use.
    async fn access_token(&self) -> Result<String> {
        if let Some(token) = self.token.read().await.as_ref() {
            return Ok(token.clone());
        }

        let response = self
            .client
            .post(&self.auth_url)
            .basic_auth(&self.app_id, Some(&self.secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(Error::Authentication(format!(
                "Reddit rejected the application credentials (HTTP {})",
                status
            )));
        }
        if !status.is_success() {
            return Err(Error::Api(format!("Reddit token request failed: HTTP {}", status)));
        }

        let token: TokenResponse = response.json().await?;
        tracing::debug!(
            "Obtained reddit {} token valid for {}s",
            token.token_type,
            token.expires_in
        );

        *self.token.write().await = Some(token.access_token.clone());
        Ok(token.access_token)
    }

    /// Make an authenticated GET request.
    async fn get(&self, url: Url) -> Result<Response> {
        let token = self.access_token().await?;

        tracing::debug!("GET {}", url);
        let response = self.client.get(url).bearer_auth(token).send().await?;

        let status = response.status();
        tracing::debug!("Response status: {}", status);

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(Error::Api("Reddit rate limit exceeded".into()));
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(Error::Authentication(format!("Reddit returned HTTP {}", status)));
        }

        if !status.is_success() {
            return Err(Error::Api(format!("Reddit returned HTTP {}", status)));
        }

        Ok(response)
    }

    /// URL of one page of the multireddit's top listing.
    fn top_listing_url(&self, window: TimeWindow, limit: usize, after: Option<&str>) -> Result<Url> {
        let mut url = Url::parse(&format!(
            "{}/user/{}/m/{}/top",
            self.api_base, self.multireddit_owner, self.multireddit_name
        ))?;

        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("t", window.as_query())
                .append_pair("limit", &limit.to_string())
                .append_pair("raw_json", "1");
            if let Some(after) = after {
                query.append_pair("after", after);
            }
        }

        Ok(url)
    }
}

#[async_trait]
impl PostFeed for RedditClient {
    async fn fetch_candidate_posts(&self, window: TimeWindow) -> Result<Vec<Post>> {
        tracing::info!(
            "Fetching top posts of {}/{} ({})...",
            self.multireddit_owner,
            self.multireddit_name,
            window
        );

        let mut posts: Vec<Post> = Vec::new();
        let mut after: Option<String> = None;

        while posts.len() < self.post_limit {
            let page_size = (self.post_limit - posts.len()).min(PAGE_SIZE);
            let url = self.top_listing_url(window, page_size, after.as_deref())?;

            let text = self.get(url).await?.text().await?;
            let listing: Listing = serde_json::from_str(&text).map_err(|e| {
                Error::Api(format!(
                    "Failed to parse listing: {} - Response: {}",
                    e,
                    text.chars().take(500).collect::<String>()
                ))
            })?;

            let page_len = listing.data.children.len();
            posts.extend(
                listing
                    .data
                    .children
                    .into_iter()
                    .filter(|thing| thing.kind == "t3")
                    .map(|thing| Post::from(thing.data)),
            );

            match listing.data.after {
                Some(next) if page_len > 0 => after = Some(next),
                _ => break,
            }
        }

        posts.truncate(self.post_limit);
        tracing::info!("Fetched {} candidate posts", posts.len());
        Ok(posts)
    }
}
