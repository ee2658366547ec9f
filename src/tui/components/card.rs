//! # Card render configs
//!
//! One explicit record per card variant, enumerating exactly what each
//! render shows. The wiring builds these from `AppState` lots; the views
//! that own them (Page, Basket, the preview modal) only draw.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::core::lot::{format_number, LotId, LotItem, LotStatus};

pub(crate) fn status_style(status: LotStatus) -> Style {
    match status {
        LotStatus::Wait => Style::default().fg(Color::Yellow),
        LotStatus::Active => Style::default().fg(Color::Cyan),
        LotStatus::Closed => Style::default().fg(Color::Green),
    }
}

/// Catalog-page card: title, blurb and the status line.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogCard {
    pub id: LotId,
    pub title: String,
    pub image: String,
    pub about: String,
    pub status: LotStatus,
    pub status_label: String,
}

/// Rendered height of one catalog card, borders included.
pub const CATALOG_CARD_HEIGHT: u16 = 4;

impl CatalogCard {
    pub fn from_lot(lot: &LotItem) -> Self {
        Self {
            id: lot.id.clone(),
            title: lot.title.clone(),
            image: lot.image.clone(),
            about: lot.about.clone(),
            status: lot.status,
            status_label: lot.status_label(),
        }
    }

    pub(crate) fn paragraph(&self, selected: bool) -> Paragraph<'_> {
        let base = status_style(self.status);
        let border = if selected {
            base.add_modifier(Modifier::BOLD)
        } else {
            base.add_modifier(Modifier::DIM)
        };
        let body = vec![
            Line::raw(self.about.as_str()),
            Line::styled(self.status_label.as_str(), base),
        ];
        Paragraph::new(body).block(
            Block::bordered()
                .title(self.title.as_str())
                .border_style(border)
                .title_style(border),
        )
    }
}

/// Row in the bids/basket lists: price plus the "is it my bid" marker.
#[derive(Debug, Clone, PartialEq)]
pub struct BidCard {
    pub id: LotId,
    pub title: String,
    pub image: String,
    pub amount: u64,
    pub is_my_bid: bool,
}

impl BidCard {
    pub fn from_lot(lot: &LotItem) -> Self {
        Self {
            id: lot.id.clone(),
            title: lot.title.clone(),
            image: lot.image.clone(),
            amount: lot.price,
            is_my_bid: lot.is_my_bid(),
        }
    }

    /// One list row; `checkbox` is None for the bids list, Some(checked)
    /// for the basket.
    pub(crate) fn line(&self, checkbox: Option<bool>) -> Line<'static> {
        let mut spans = Vec::new();
        match checkbox {
            Some(true) => spans.push(Span::raw("[x] ")),
            Some(false) => spans.push(Span::raw("[ ] ")),
            None => {}
        }
        spans.push(Span::raw(self.title.clone()));
        spans.push(Span::styled(
            format!("  {}₽", format_number(self.amount)),
            Style::default().fg(Color::Green),
        ));
        if self.is_my_bid {
            spans.push(Span::styled(
                "  моя ставка",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
            ));
        }
        Line::from(spans)
    }
}

/// Detail-view card: full description, one paragraph per line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuctionCard {
    pub title: String,
    pub image: String,
    pub description: Vec<String>,
}

impl AuctionCard {
    pub fn from_lot(lot: &LotItem) -> Self {
        Self {
            title: lot.title.clone(),
            image: lot.image.clone(),
            description: lot
                .description
                .as_deref()
                .unwrap_or(&lot.about)
                .split('\n')
                .map(str::to_string)
                .collect(),
        }
    }
}
