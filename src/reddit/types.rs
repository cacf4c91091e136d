//! Reddit API response type definitions.

use serde::Deserialize;

/// OAuth token response.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: u64,
}

/// A listing page.
#[derive(Debug, Deserialize)]
pub struct Listing {
    pub data: ListingData,
}

#[derive(Debug, Deserialize)]
pub struct ListingData {
    #[serde(default)]
    pub children: Vec<Thing>,
    /// Cursor for the next page.
    pub after: Option<String>,
}

/// A listing entry. Link listings only ever hold `t3` (link) things.
#[derive(Debug, Deserialize)]
pub struct Thing {
    pub kind: String,
    pub data: LinkData,
}

/// The fields of a link we care about.
#[derive(Debug, Clone, Deserialize)]
pub struct LinkData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub is_self: bool,
    #[serde(default)]
    pub link_flair_text: Option<String>,
}

/// A feed post, as consumed by the filter and the download loop.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Post {
    pub url: String,
    pub title: String,
    pub is_self_post: bool,
    pub flair_text: Option<String>,
}

impl Post {
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            ..Default::default()
        }
    }
}

impl From<LinkData> for Post {
    fn from(link: LinkData) -> Self {
        Self {
            url: link.url,
            title: link.title,
            is_self_post: link.is_self,
            flair_text: link.link_flair_text,
        }
    }
}
