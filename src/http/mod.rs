use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use thiserror::Error;
use tracing::info;

use crate::{
    config::ClientConfig,
    search::model::{ResultRecord, SearchResponse},
};

const SEARCH_PATH: &str = "search";
const QUERY_PARAM: &str = "query";

/// Why a search request failed. Only ever logged; the UI shows one fixed message.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Backend responded with HTTP {status}")]
    Http { status: u16 },

    #[error("Decoding error: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Http { status } => StatusCode::from_u16(*status).ok(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            ApiError::Http {
                status: status.as_u16(),
            }
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<ResultRecord>, ApiError>;
}

pub struct ApiService {
    client: reqwest::Client,
    base_url: Url,
}

impl ApiService {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.api_url.clone(),
        })
    }

    pub fn search_url(&self, query: &str) -> Result<Url, ApiError> {
        let mut url = self
            .base_url
            .join(SEARCH_PATH)
            .map_err(|e| ApiError::Network(e.to_string()))?;
        url.query_pairs_mut().clear().append_pair(QUERY_PARAM, query);
        Ok(url)
    }
}

#[async_trait]
impl SearchBackend for ApiService {
    async fn search(&self, query: &str) -> Result<Vec<ResultRecord>, ApiError> {
        let url = self.search_url(query)?;
        info!(url = url.as_str(), "search_request");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let parsed: SearchResponse =
            serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))?;
        let results = parsed.into_results();

        info!(
            status = status.as_u16(),
            count = results.len(),
            "search_response"
        );
        Ok(results)
    }
}
