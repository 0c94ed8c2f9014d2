//! Activity API client implementation

use async_trait::async_trait;
use reqwest::Client;
use urlencoding::encode;

use crate::domain::ports::ActivityClient;
use crate::error::FetchError;

/// Implementation of the activity API client
pub struct ActivityClientImpl {
    http: Client,
    base_url: String,
    api_key: String,
}

impl ActivityClientImpl {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn activities_url(&self, feed_id: &str) -> String {
        format!(
            "{}/people/{}/activities/public?key={}",
            self.base_url,
            encode(feed_id),
            encode(&self.api_key)
        )
    }

    async fn handle_response(&self, response: reqwest::Response) -> Result<Vec<u8>, FetchError> {
        let status = response.status();

        if status.is_success() {
            Ok(response.bytes().await?.to_vec())
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(FetchError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[async_trait]
impl ActivityClient for ActivityClientImpl {
    async fn fetch_activities(&self, feed_id: &str) -> Result<Vec<u8>, FetchError> {
        let url = self.activities_url(feed_id);
        tracing::debug!(feed_id, "Fetching activities");

        let response = self.http.get(&url).send().await?;
        self.handle_response(response).await
    }
}
