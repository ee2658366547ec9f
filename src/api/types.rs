//! Wire types for the auction backend.
//!
//! The backend speaks camelCase JSON; these DTOs are the translation layer
//! between that schema and the domain types in `core::lot`. Lot images come
//! back as CDN-relative paths and are absolutized during conversion.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::lot::{LotId, LotItem, LotStatus};
use crate::core::state::OrderDraft;

/// Envelope of `GET /lot`.
#[derive(Debug, Deserialize)]
pub struct LotListResponse {
    pub total: u64,
    pub items: Vec<LotDto>,
}

/// One lot as the server sends it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LotDto {
    pub id: String,
    pub title: String,
    pub about: String,
    #[serde(default)]
    pub description: Option<String>,
    pub image: String,
    pub status: LotStatus,
    pub datetime: DateTime<Utc>,
    pub price: u64,
    pub min_price: u64,
    #[serde(default)]
    pub history: Vec<u64>,
}

impl LotDto {
    /// Convert into the domain lot, prefixing relative image paths with the
    /// CDN base URL.
    pub fn into_lot(self, cdn_url: &str) -> LotItem {
        let image = if self.image.starts_with("http://") || self.image.starts_with("https://") {
            self.image
        } else {
            format!("{}{}", cdn_url.trim_end_matches('/'), self.image)
        };
        let mut lot = LotItem::new(
            self.id,
            self.title,
            self.about,
            image,
            self.status,
            self.datetime,
            self.price,
            self.min_price,
            self.history,
        );
        lot.description = self.description;
        lot
    }
}

/// Detail slice of `GET /lot/{id}`. The server returns the full lot; only
/// the lazily loaded fields matter here, the rest is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct LotDetail {
    pub description: String,
    pub history: Vec<u64>,
}

/// Body of `POST /order`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderRequest {
    pub email: String,
    pub phone: String,
    pub items: Vec<LotId>,
}

impl From<&OrderDraft> for OrderRequest {
    fn from(draft: &OrderDraft) -> Self {
        Self {
            email: draft.email.clone(),
            phone: draft.phone.clone(),
            items: draft.items.clone(),
        }
    }
}

/// Confirmation returned by `POST /order`.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderResult {
    pub id: String,
    pub total: u64,
}
