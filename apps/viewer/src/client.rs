use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Deserialize};
use tracing::{debug, warn};

use crate::error::ClientError;
use crate::models::{CollectionDetail, CollectionStats, ListPage, ListQuery};

/// Read side of the collection API, as the browser consumes it.
#[async_trait]
pub trait CollectionSource: Send + Sync {
    async fn list(&self, query: &ListQuery) -> Result<ListPage, ClientError>;
    async fn detail(&self, id: i64) -> Result<CollectionDetail, ClientError>;
    async fn stats(&self) -> Result<CollectionStats, ClientError>;
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// HTTP client for the collection API. One call per method, no retries.
#[derive(Clone)]
pub struct CollectionClient {
    client: Client,
    base_url: String,
}

impl CollectionClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Ok(Self {
            client: Client::builder().build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            warn!("Collection API returned {}: {}", status, message);
            return Err(ClientError::from_status(status.as_u16(), message));
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl CollectionSource for CollectionClient {
    async fn list(&self, query: &ListQuery) -> Result<ListPage, ClientError> {
        debug!(
            "Listing collection q={:?} shiny={:?} ot={:?} offset={}",
            query.q, query.shiny, query.ot, query.offset
        );
        let response = self
            .client
            .get(self.url("/api/pokemon"))
            .query(query)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn detail(&self, id: i64) -> Result<CollectionDetail, ClientError> {
        let response = self
            .client
            .get(self.url(&format!("/api/pokemon/{id}")))
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn stats(&self) -> Result<CollectionStats, ClientError> {
        let response = self.client.get(self.url("/api/stats")).send().await?;
        Self::decode(response).await
    }
}
