use log::debug;
use serde::Deserialize;

use crate::error::VisagistError;

/// YouTube Data API v3 search endpoint.
const SEARCH_URL: &str = "https://www.googleapis.com/youtube/v3/search";

/// One video search hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Video {
    /// Provider video id.
    pub id: String,
    /// Video title.
    pub title: String,
}

impl Video {
    /// Embeddable player URL for the video.
    pub fn embed_url(&self) -> String {
        format!("https://www.youtube.com/embed/{}", self.id)
    }
}

/// Video search collaborator with a single call capability.
///
/// Returns at most one video per query; `None` when nothing matched.
pub trait VideoSearch {
    /// Search for the best-matching video.
    fn search(&self, query: &str) -> Result<Option<Video>, VisagistError>;
}

#[derive(Deserialize)]
struct WireSearchResponse {
    #[serde(default)]
    items: Vec<WireItem>,
}

#[derive(Deserialize)]
struct WireItem {
    id: WireId,
    snippet: WireSnippet,
}

#[derive(Deserialize)]
struct WireId {
    #[serde(rename = "videoId")]
    video_id: String,
}

#[derive(Deserialize)]
struct WireSnippet {
    title: String,
}

/// [`VideoSearch`] backed by the YouTube Data API.
pub struct YouTubeClient {
    api_key: String,
    http: reqwest::blocking::Client,
}

impl YouTubeClient {
    /// Create a client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            http: reqwest::blocking::Client::new(),
        }
    }
}

impl VideoSearch for YouTubeClient {
    fn search(&self, query: &str) -> Result<Option<Video>, VisagistError> {
        debug!("video search: {query}");
        let response = self
            .http
            .get(SEARCH_URL)
            .query(&[
                ("part", "id,snippet"),
                ("type", "video"),
                ("maxResults", "1"),
                ("q", query),
                ("key", self.api_key.as_str()),
            ])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(VisagistError::Api {
                status: status.as_u16(),
            });
        }

        let parsed: WireSearchResponse = response.json()?;
        Ok(parsed.items.into_iter().next().map(|item| Video {
            id: item.id.video_id,
            title: item.snippet.title,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embed_url() {
        let video = Video {
            id: "dQw4w9WgXcQ".into(),
            title: "tutorial".into(),
        };
        assert_eq!(
            video.embed_url(),
            "https://www.youtube.com/embed/dQw4w9WgXcQ"
        );
    }

    #[test]
    fn wire_response_with_one_item() {
        let parsed: WireSearchResponse = serde_json::from_str(
            r#"{"items":[{"id":{"kind":"youtube#video","videoId":"abc123"},
                "snippet":{"title":"Everyday makeup for warm undertones"}}]}"#,
        )
        .unwrap();
        let item = &parsed.items[0];
        assert_eq!(item.id.video_id, "abc123");
        assert_eq!(item.snippet.title, "Everyday makeup for warm undertones");
    }

    #[test]
    fn wire_response_without_items() {
        let parsed: WireSearchResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.items.is_empty());
    }
}
