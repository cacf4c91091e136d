//! Imgur API HTTP client.

use reqwest::{header, Client};
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::imgur::types::{AlbumData, ApiResponse, Credits, ErrorData, ImageData};

/// Imgur API base URL.
const API_BASE: &str = "https://api.imgur.com/3";

/// Anonymous (Client-ID) imgur API client.
#[derive(Clone)]
pub struct ImgurClient {
    client: Client,
    api_base: String,
    client_id: String,
}

impl ImgurClient {
    /// Create a client for the given application id.
    pub fn new(client_id: &str) -> Result<Self> {
        Self::with_base_url(client_id, API_BASE)
    }

    /// Create a client against an alternative API base URL.
    pub fn with_base_url(client_id: &str, api_base: &str) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| Error::Api(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            client_id: client_id.to_string(),
        })
    }

    /// Make an authenticated GET request and unwrap the `data` payload.
    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.api_base, path);
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header(header::AUTHORIZATION, format!("Client-ID {}", self.client_id))
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Response status: {}", status);
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiResponse<ErrorData>>(&text)
                .map(|body| body.data.message())
                .unwrap_or_else(|_| status.canonical_reason().unwrap_or("request failed").to_string());
            return Err(Error::Imgur {
                status: status.as_u16(),
                message,
            });
        }

        let api_response: ApiResponse<T> = serde_json::from_str(&text).map_err(|e| {
            Error::Api(format!(
                "Failed to parse imgur response: {} - Response: {}",
                e,
                text.chars().take(500).collect::<String>()
            ))
        })?;

        if !api_response.success {
            return Err(Error::Imgur {
                status: api_response.status,
                message: format!("Request to {} was not successful", path),
            });
        }

        Ok(api_response.data)
    }

    /// Get an album with its images.
    pub async fn get_album(&self, album_id: &str) -> Result<AlbumData> {
        self.get(&format!("/album/{}", album_id)).await
    }

    /// Get a single image.
    pub async fn get_image(&self, image_id: &str) -> Result<ImageData> {
        self.get(&format!("/image/{}", image_id)).await
    }

    /// Get the current rate-limit credits.
    pub async fn credits(&self) -> Result<Credits> {
        self.get("/credits").await
    }
}
