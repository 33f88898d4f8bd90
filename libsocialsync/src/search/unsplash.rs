//! Unsplash image search provider

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use super::ImageSearch;
use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::types::{ImageRef, ImageUrls};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Search client for the Unsplash photo API
pub struct UnsplashSearch {
    client: reqwest::Client,
    base_url: String,
    access_key: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    // Error payloads omit `results`; treat them as an empty page
    #[serde(default)]
    results: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    id: String,
    urls: PhotoUrls,
    #[serde(default)]
    alt_description: Option<String>,
    user: PhotoUser,
}

#[derive(Debug, Deserialize)]
struct PhotoUrls {
    small: String,
    regular: String,
    thumb: String,
}

#[derive(Debug, Deserialize)]
struct PhotoUser {
    name: String,
}

impl From<Photo> for ImageRef {
    fn from(photo: Photo) -> Self {
        ImageRef {
            id: photo.id,
            urls: ImageUrls {
                small: photo.urls.small,
                thumb: photo.urls.thumb,
                full: photo.urls.regular,
            },
            alt_text: photo.alt_description.unwrap_or_default(),
            attribution_name: photo.user.name,
        }
    }
}

impl UnsplashSearch {
    pub fn new(
        base_url: impl Into<String>,
        access_key: impl Into<String>,
    ) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| SearchError::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_key: access_key.into(),
        })
    }

    /// Build a client from `[search]` settings
    ///
    /// # Errors
    ///
    /// Returns `SearchError::MissingCredentials` when neither the config
    /// file nor `SOCIALSYNC_UNSPLASH_KEY` provides an access key.
    pub fn from_config(config: &SearchConfig) -> Result<Self, SearchError> {
        let key = config
            .resolved_access_key()
            .ok_or(SearchError::MissingCredentials)?;
        Self::new(config.base_url.clone(), key)
    }

    fn endpoint(&self) -> String {
        format!("{}/search/photos", self.base_url)
    }
}

/// Decode a `/search/photos` response body
pub(crate) fn parse_results(body: &str) -> Result<Vec<ImageRef>, SearchError> {
    let response: SearchResponse =
        serde_json::from_str(body).map_err(|e| SearchError::Parse(e.to_string()))?;
    Ok(response.results.into_iter().map(ImageRef::from).collect())
}

#[async_trait]
impl ImageSearch for UnsplashSearch {
    async fn search(&self, query: &str, page_size: usize) -> Result<Vec<ImageRef>, SearchError> {
        let per_page = page_size.to_string();
        tracing::debug!(query, page_size, "searching unsplash");

        let response = self
            .client
            .get(self.endpoint())
            .query(&[
                ("query", query),
                ("per_page", per_page.as_str()),
                ("client_id", self.access_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| SearchError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SearchError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(SearchError::Network(format!("HTTP {}", status)));
        }

        parse_results(&body)
    }

    fn name(&self) -> &str {
        "unsplash"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SEARCH_KEY_ENV;
    use serial_test::serial;

    const SAMPLE: &str = r#"{
        "total": 2,
        "results": [
            {
                "id": "abc",
                "urls": {
                    "small": "https://img/abc-s",
                    "regular": "https://img/abc-r",
                    "thumb": "https://img/abc-t"
                },
                "alt_description": "orange sunset over the sea",
                "user": {"name": "Ann Photog"}
            },
            {
                "id": "def",
                "urls": {
                    "small": "https://img/def-s",
                    "regular": "https://img/def-r",
                    "thumb": "https://img/def-t"
                },
                "alt_description": null,
                "user": {"name": "Bo"}
            }
        ]
    }"#;

    #[test]
    fn test_parse_results_maps_fields() {
        let images = parse_results(SAMPLE).unwrap();
        assert_eq!(images.len(), 2);

        assert_eq!(images[0].id, "abc");
        assert_eq!(images[0].urls.full, "https://img/abc-r");
        assert_eq!(images[0].urls.thumb, "https://img/abc-t");
        assert_eq!(images[0].attribution_name, "Ann Photog");

        // null alt text becomes empty
        assert_eq!(images[1].alt_text, "");
    }

    #[test]
    fn test_parse_results_without_results_field() {
        let images = parse_results(r#"{"errors": ["OAuth error"]}"#).unwrap();
        assert!(images.is_empty());
    }

    #[test]
    fn test_parse_results_rejects_garbage() {
        let err = parse_results("<html>").unwrap_err();
        assert!(matches!(err, SearchError::Parse(_)));
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let provider = UnsplashSearch::new("http://localhost:8080/", "key").unwrap();
        assert_eq!(provider.endpoint(), "http://localhost:8080/search/photos");
    }

    #[test]
    #[serial]
    fn test_from_config_requires_key() {
        let config = SearchConfig {
            access_key: None,
            ..SearchConfig::default()
        };
        std::env::remove_var(SEARCH_KEY_ENV);

        assert!(matches!(
            UnsplashSearch::from_config(&config),
            Err(SearchError::MissingCredentials)
        ));
    }

    #[test]
    #[serial]
    fn test_from_config_accepts_env_key() {
        let config = SearchConfig {
            access_key: None,
            ..SearchConfig::default()
        };
        std::env::set_var(SEARCH_KEY_ENV, "env-key");

        let provider = UnsplashSearch::from_config(&config);
        std::env::remove_var(SEARCH_KEY_ENV);

        assert_eq!(provider.unwrap().access_key, "env-key");
    }
}
