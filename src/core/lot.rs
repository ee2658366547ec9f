//! # Lot
//!
//! A single auction item with its bidding lifecycle (`wait` → `active` →
//! `closed`, never backward) and the derived human-readable labels the
//! views render. The bid history is a fixed-size sliding window: placing a
//! bid drops the oldest entry, so the window length never grows past what
//! the server originally sent.
//!
//! `place_bid` deliberately does not validate the amount against the
//! current price or the `next_bid` suggestion. The UI pre-fills `next_bid`
//! and the server re-validates; the client trusts its input.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::events::{topics, Changes, EventData};

pub type LotId = String;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LotStatus {
    #[default]
    Wait,
    Active,
    Closed,
}

/// One catalog entry. Created when the catalog is fetched, replaced
/// wholesale by the next fetch. `description` and a fresh `history` arrive
/// lazily with the lot detail request.
#[derive(Debug, Clone, PartialEq)]
pub struct LotItem {
    pub id: LotId,
    pub title: String,
    /// Short blurb shown on the catalog card.
    pub about: String,
    /// Full text shown in the detail view, fetched on demand.
    pub description: Option<String>,
    pub image: String,
    pub status: LotStatus,
    /// Opening time for `wait`, closing time for `active`/`closed`.
    pub datetime: DateTime<Utc>,
    pub price: u64,
    pub min_price: u64,
    pub history: Vec<u64>,
    /// Last amount this client bid on the lot; 0 = not participating.
    my_last_bid: u64,
}

impl LotItem {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<LotId>,
        title: impl Into<String>,
        about: impl Into<String>,
        image: impl Into<String>,
        status: LotStatus,
        datetime: DateTime<Utc>,
        price: u64,
        min_price: u64,
        history: Vec<u64>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            about: about.into(),
            description: None,
            image: image.into(),
            status,
            datetime,
            price,
            min_price,
            history,
            my_last_bid: 0,
        }
    }

    /// Record a bid. Slides the history window, takes the new price as
    /// current, marks the bid as ours and, when the price exceeds ten times
    /// the minimum, closes the lot and stamps the closing time.
    ///
    /// Queues `auction:changed {id, price}` followed by `items:changed`.
    pub fn place_bid(&mut self, price: u64, changes: &mut Changes) {
        self.price = price;
        if !self.history.is_empty() {
            self.history.remove(0);
        }
        self.history.push(price);
        self.my_last_bid = price;

        if price > self.min_price * 10 {
            self.status = LotStatus::Closed;
            self.datetime = Utc::now();
        }

        changes.emit(
            topics::AUCTION_CHANGED,
            EventData::Bid {
                id: self.id.clone(),
                price,
            },
        );
        changes.emit(topics::ITEMS_CHANGED, EventData::None);
    }

    /// Forget the locally tracked bid (used when the basket is cleared).
    pub fn clear_bid(&mut self) {
        self.my_last_bid = 0;
    }

    /// True while our bid is still the leading one.
    pub fn is_my_bid(&self) -> bool {
        self.my_last_bid == self.price
    }

    /// True once we have bid on this lot at all.
    pub fn is_participate(&self) -> bool {
        self.my_last_bid != 0
    }

    /// Catalog-card status line, e.g. "Открыто до 5 September в 14:00".
    pub fn status_label(&self) -> String {
        let when = self.datetime.format("%-d %B в %H:%M");
        match self.status {
            LotStatus::Active => format!("Открыто до {when}"),
            LotStatus::Closed => format!("Закрыто {when}"),
            LotStatus::Wait => format!("Откроется {when}"),
        }
    }

    /// Countdown until the lot opens/closes, or a terminal label.
    pub fn time_status(&self) -> String {
        self.time_status_at(Utc::now())
    }

    fn time_status_at(&self, now: DateTime<Utc>) -> String {
        if self.status == LotStatus::Closed {
            return "Аукцион завершен".to_string();
        }
        let left = (self.datetime - now).num_seconds().max(0);
        let days = left / 86_400;
        let hours = left % 86_400 / 3_600;
        let minutes = left % 3_600 / 60;
        let seconds = left % 60;
        format!("{days}д {hours}ч {minutes} мин {seconds} сек")
    }

    /// Caption above the countdown in the detail view.
    pub fn auction_status(&self) -> String {
        match self.status {
            LotStatus::Closed => format!("Продано за {}₽", format_number(self.price)),
            LotStatus::Wait => "До начала аукциона".to_string(),
            LotStatus::Active => "До закрытия лота".to_string(),
        }
    }

    /// Suggested next bid: floor(price * 1.1).
    pub fn next_bid(&self) -> u64 {
        self.price + self.price / 10
    }
}

/// Group digits by thousands with spaces: 1234567 → "1 234 567".
pub fn format_number(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}
