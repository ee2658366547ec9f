//! Shared fixtures for unit tests: a deterministic lot and a small catalog
//! covering all three statuses.

use chrono::{TimeZone, Utc};

use crate::core::lot::{LotItem, LotStatus};

/// One lot with fixed timestamps. `min_price` equals `price`, so a bid
/// above ten times the starting price closes the lot.
pub fn sample_lot(id: &str, status: LotStatus, price: u64) -> LotItem {
    let datetime = Utc
        .with_ymd_and_hms(2026, 9, 5, 14, 0, 0)
        .single()
        .unwrap_or_default();
    LotItem::new(
        id,
        format!("Лот {id}"),
        "Краткое описание лота",
        format!("http://localhost:8081/content/{id}.jpg"),
        status,
        datetime,
        price,
        price,
        vec![price / 2, price],
    )
}

/// A catalog with one waiting, one active and two closed lots.
pub fn sample_catalog() -> Vec<LotItem> {
    vec![
        sample_lot("wait-1", LotStatus::Wait, 500),
        sample_lot("active-1", LotStatus::Active, 1_000),
        sample_lot("closed-1", LotStatus::Closed, 2_000),
        sample_lot("closed-2", LotStatus::Closed, 3_000),
    ]
}
