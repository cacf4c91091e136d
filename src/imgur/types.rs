//! Imgur API response type definitions.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Generic API response wrapper.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub status: u16,
}

/// Payload of a failed request.
#[derive(Debug, Deserialize)]
pub struct ErrorData {
    /// Usually a string, occasionally an object with a `message` field.
    #[serde(default)]
    pub error: Value,
}

impl ErrorData {
    pub fn message(&self) -> String {
        match &self.error {
            Value::String(s) => s.clone(),
            Value::Object(map) => map
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown error")
                .to_string(),
            Value::Null => "unknown error".to_string(),
            other => other.to_string(),
        }
    }
}

/// Album endpoint payload.
///
/// Images are left as raw maps; [`ImgurImage::from_keyed`] turns them into records.
#[derive(Debug, Deserialize)]
pub struct AlbumData {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub images_count: usize,
    #[serde(default)]
    pub images: Vec<Map<String, Value>>,
}

/// Image endpoint payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageData {
    pub id: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub link: String,
}

/// Rate-limit credits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Credits {
    pub user_limit: i64,
    pub user_remaining: i64,
    /// Unix timestamp at which the user budget resets.
    pub user_reset: i64,
    pub client_limit: i64,
    pub client_remaining: i64,
}

/// An image to download, whichever endpoint described it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImgurImage {
    pub id: String,
    pub mime_type: String,
    pub link: String,
}

impl ImgurImage {
    /// Build a record from an album's raw image map.
    pub fn from_keyed(map: &Map<String, Value>) -> Result<Self> {
        let field = |key: &str| -> Result<String> {
            map.get(key)
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| Error::Api(format!("Album image is missing '{}'", key)))
        };

        Ok(Self {
            id: field("id")?,
            mime_type: field("type")?,
            link: field("link")?,
        })
    }
}

impl From<ImageData> for ImgurImage {
    fn from(image: ImageData) -> Self {
        Self {
            id: image.id,
            mime_type: image.mime_type,
            link: image.link,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_both_forms_normalize_alike() {
        let raw = json!({
            "id": "AbC12",
            "type": "image/jpeg",
            "link": "https://i.imgur.com/AbC12.jpg",
            "width": 1920
        });

        let keyed = ImgurImage::from_keyed(raw.as_object().unwrap()).unwrap();
        let typed: ImageData = serde_json::from_value(raw).unwrap();

        assert_eq!(keyed, ImgurImage::from(typed));
        assert_eq!(keyed.mime_type, "image/jpeg");
    }

    #[test]
    fn test_keyed_missing_field() {
        let raw = json!({ "id": "x", "type": "image/png" });
        assert!(ImgurImage::from_keyed(raw.as_object().unwrap()).is_err());
    }

    #[test]
    fn test_error_message() {
        let data: ErrorData = serde_json::from_value(json!({ "error": "Album not found" })).unwrap();
        assert_eq!(data.message(), "Album not found");

        let data: ErrorData =
            serde_json::from_value(json!({ "error": { "message": "Too many requests" } })).unwrap();
        assert_eq!(data.message(), "Too many requests");
    }

    #[test]
    fn test_credits() {
        let credits: Credits = serde_json::from_value(json!({
            "UserLimit": 2000,
            "UserRemaining": 1990,
            "UserReset": 1700000000,
            "ClientLimit": 12500,
            "ClientRemaining": 12000
        }))
        .unwrap();
        assert_eq!(credits.user_remaining, 1990);
    }
}
