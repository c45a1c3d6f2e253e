use std::time::Duration;

use color_eyre::Result;
use serde::Deserialize;

use super::{http_client, UpstreamError};

#[cfg_attr(test, mockall::automock)]
pub trait ImageSearch: Send + Sync {
    /// URL of the best matching photo, `None` when the search finds nothing.
    fn find_image(
        &self,
        query: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>, UpstreamError>> + Send;
}

#[derive(Deserialize)]
struct SearchResponse {
    results: Vec<Photo>,
}

#[derive(Deserialize)]
struct Photo {
    urls: PhotoUrls,
}

#[derive(Deserialize)]
struct PhotoUrls {
    regular: String,
}

impl SearchResponse {
    fn first_image(self) -> Option<String> {
        self.results.into_iter().next().map(|p| p.urls.regular)
    }
}

/// Client for the Unsplash photo search API.
#[derive(Clone)]
pub struct UnsplashClient {
    http: reqwest::Client,
    base_url: String,
    access_key: String,
}

impl UnsplashClient {
    pub fn new(base_url: String, access_key: String, timeout: Duration) -> Result<Self> {
        Ok(Self {
            http: http_client(timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_key,
        })
    }
}

impl ImageSearch for UnsplashClient {
    async fn find_image(&self, query: &str) -> Result<Option<String>, UpstreamError> {
        let resp = self
            .http
            .get(format!("{}/search/photos", self.base_url))
            .header("Accept-Version", "v1")
            .header("Authorization", format!("Client-ID {}", self.access_key))
            .query(&[("query", query), ("per_page", "1")])
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(UpstreamError::Status(resp.status()));
        }

        Ok(resp.json::<SearchResponse>().await?.first_image())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn takes_regular_url_of_first_result() {
        let body = r#"{
            "total": 2,
            "results": [
                {"id": "a", "urls": {"raw": "r1", "regular": "https://images.example/a"}},
                {"id": "b", "urls": {"raw": "r2", "regular": "https://images.example/b"}}
            ]
        }"#;
        let resp: SearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            resp.first_image().as_deref(),
            Some("https://images.example/a")
        );
    }

    #[test]
    fn empty_search_is_none() {
        let resp: SearchResponse = serde_json::from_str(r#"{"total": 0, "results": []}"#).unwrap();
        assert!(resp.first_image().is_none());
    }
}
