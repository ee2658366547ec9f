//! # Auction Panel Component
//!
//! The bidding block inside the lot preview: status line with countdown,
//! recent bid history and the bid input. Bidding is only possible while
//! the lot is open; an empty input submits the suggested next bid.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::core::lot::{format_number, LotItem, LotStatus};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::card::status_style;
use crate::tui::event::UiEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuctionEvent {
    PlaceBid(u64),
}

#[derive(Default)]
pub struct AuctionPanel {
    // Props
    pub status: LotStatus,
    pub time: String,
    pub label: String,
    pub next_bid: u64,
    pub history: Vec<u64>,
    // Presentation state
    pub input: String,
}

impl AuctionPanel {
    pub fn update(&mut self, lot: &LotItem) {
        self.status = lot.status;
        self.time = lot.time_status();
        self.label = lot.auction_status();
        self.next_bid = lot.next_bid();
        self.history = lot.history.clone();
        if lot.status != LotStatus::Active {
            self.input.clear();
        }
    }
}

impl EventHandler for AuctionPanel {
    type Event = AuctionEvent;

    fn handle_event(&mut self, event: &UiEvent) -> Option<AuctionEvent> {
        if self.status != LotStatus::Active {
            return None;
        }
        match event {
            UiEvent::InputChar(c) if c.is_ascii_digit() => {
                self.input.push(*c);
                None
            }
            UiEvent::Backspace => {
                self.input.pop();
                None
            }
            UiEvent::Submit => {
                let price = self.input.parse().unwrap_or(self.next_bid);
                self.input.clear();
                Some(AuctionEvent::PlaceBid(price))
            }
            _ => None,
        }
    }
}

impl Component for AuctionPanel {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        use Constraint::{Length, Min};
        let [status_area, history_area, input_area] =
            Layout::vertical([Length(2), Min(1), Length(2)]).areas(area);

        let status = Line::from(vec![
            Span::styled(self.label.clone(), status_style(self.status)),
            Span::raw("  "),
            Span::styled(self.time.clone(), Style::default().add_modifier(Modifier::DIM)),
        ]);
        frame.render_widget(status, status_area);

        let mut lines: Vec<Line> = vec![Line::styled(
            "Последние ставки:",
            Style::default().add_modifier(Modifier::DIM),
        )];
        for price in self.history.iter().rev() {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::raw(format_number(*price)),
                Span::styled("₽", Style::default().fg(Color::Green)),
            ]));
        }
        frame.render_widget(ratatui::widgets::Paragraph::new(lines), history_area);

        if self.status == LotStatus::Active {
            let input = Line::from(vec![
                Span::styled("Ставка: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(self.input.clone()),
                Span::styled(
                    format!(
                        "  (Enter — {}₽)",
                        format_number(if self.input.is_empty() {
                            self.next_bid
                        } else {
                            self.input.parse().unwrap_or(self.next_bid)
                        })
                    ),
                    Style::default().add_modifier(Modifier::DIM),
                ),
            ]);
            frame.render_widget(input, input_area);
        }
    }
}
