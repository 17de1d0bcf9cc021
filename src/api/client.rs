use super::types::*;
use crate::{Error, Result, config::ApiConfig};
use async_trait::async_trait;
use reqwest::{StatusCode, header::CONTENT_TYPE};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

/// Shown when a failed response carries neither a detail nor a reason phrase.
pub const UNKNOWN_ERROR: &str = "알 수 없는 오류";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApiClient: Send + Sync {
    async fn request_analysis(&self, request: AnalysisRequest) -> Result<ReplyResponse>;

    async fn send_chat(&self, request: ChatRequest) -> Result<ReplyResponse>;
}

pub struct HttpApiClient {
    client: reqwest::Client,
    base_url: String,
    analysis_path: String,
    chat_path: String,
}

impl HttpApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(client: reqwest::Client, config: ApiConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            analysis_path: config.analysis_path,
            chat_path: config.chat_path,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POSTs `body` as JSON and decodes the JSON response.
    ///
    /// Non-success statuses become [`Error::Request`] carrying the backend's
    /// `detail`, the status reason phrase, or [`UNKNOWN_ERROR`].
    pub async fn post_json<B, R>(&self, url: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        debug!("POST {}", url);

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            let message = error_detail(&body).unwrap_or_else(|| reason_phrase(status));
            warn!("POST {} failed with {}: {}", url, status, message);
            return Err(Error::request(status.as_u16(), message));
        }

        let body = response.bytes().await?;
        debug!("POST {} returned {} bytes", url, body.len());

        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl ApiClient for HttpApiClient {
    async fn request_analysis(&self, request: AnalysisRequest) -> Result<ReplyResponse> {
        debug!("Requesting analysis for {}", request.birth_iso);
        self.post_json(&self.url(&self.analysis_path), &request).await
    }

    async fn send_chat(&self, request: ChatRequest) -> Result<ReplyResponse> {
        debug!("Sending chat with {} messages", request.messages.len());
        self.post_json(&self.url(&self.chat_path), &request).await
    }
}

fn reason_phrase(status: StatusCode) -> String {
    status
        .canonical_reason()
        .filter(|reason| !reason.is_empty())
        .unwrap_or(UNKNOWN_ERROR)
        .to_string()
}
