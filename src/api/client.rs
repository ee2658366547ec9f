//! # Auction API Client
//!
//! The network boundary. Three operations against the auction backend:
//! fetch the catalog, fetch one lot's detail, submit an order. All are
//! plain request/response; failures are classified by [`ApiError`] and
//! surfaced to the caller — no retries, no cancellation.

use std::fmt;

use async_trait::async_trait;
use log::{debug, info, warn};

use crate::api::types::{LotDetail, LotListResponse, OrderRequest, OrderResult};
use crate::core::lot::LotItem;

/// Errors from the auction backend boundary.
/// Variants carry enough info to determine retryability (future use).
#[derive(Debug)]
pub enum ApiError {
    /// Network-level failure (timeout, DNS, connection refused). Retryable.
    Network(String),
    /// Backend returned an error response. Retryable if status >= 500.
    Api { status: u16, message: String },
    /// Failed to parse the backend's response. Not retryable.
    Parse(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ApiError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// The auction backend seam. Object-safe so the event loop can run against
/// a fake in tests.
#[async_trait]
pub trait AuctionApi: Send + Sync {
    /// Fetch the full catalog.
    async fn get_lot_list(&self) -> Result<Vec<LotItem>, ApiError>;

    /// Fetch the lazily loaded detail (description, fresh bid history) of
    /// one lot.
    async fn get_lot_item(&self, id: &str) -> Result<LotDetail, ApiError>;

    /// Submit the basket as an order.
    async fn order_lots(&self, order: &OrderRequest) -> Result<OrderResult, ApiError>;
}

/// reqwest-backed implementation against the real backend.
pub struct HttpAuctionApi {
    base_url: String,
    cdn_url: String,
    client: reqwest::Client,
}

impl HttpAuctionApi {
    pub fn new(base_url: impl Into<String>, cdn_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            cdn_url: cdn_url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Map a non-success status to `ApiError::Api` with the body text.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "unknown error".to_string());
        warn!("Backend error: {} - {}", status, message);
        Err(ApiError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl AuctionApi for HttpAuctionApi {
    async fn get_lot_list(&self) -> Result<Vec<LotItem>, ApiError> {
        let url = format!("{}/lot", self.base_url);
        debug!("GET {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let response = Self::check(response).await?;

        let list: LotListResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;
        info!("Catalog fetched: {} of {} lot(s)", list.items.len(), list.total);

        Ok(list
            .items
            .into_iter()
            .map(|dto| dto.into_lot(&self.cdn_url))
            .collect())
    }

    async fn get_lot_item(&self, id: &str) -> Result<LotDetail, ApiError> {
        let url = format!("{}/lot/{}", self.base_url, id);
        debug!("GET {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let response = Self::check(response).await?;

        response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    async fn order_lots(&self, order: &OrderRequest) -> Result<OrderResult, ApiError> {
        let url = format!("{}/order", self.base_url);
        info!("POST {url}: {} item(s)", order.items.len());

        let response = self
            .client
            .post(&url)
            .json(order)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let response = Self::check(response).await?;

        let result: OrderResult = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;
        info!("Order confirmed: id={}, total={}", result.id, result.total);
        Ok(result)
    }
}
