pub mod client;
pub mod types;

pub use client::{ApiError, AuctionApi, HttpAuctionApi};
pub use types::{LotDetail, LotDto, LotListResponse, OrderRequest, OrderResult};
