//! # Basket Component
//!
//! The list under the tabs. Two instances exist: one for active lots
//! ("ставки", read-only rows that open a preview) and one for won lots
//! (checkbox rows that build the order, a running total and the
//! submit-order shortcut).

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{List, ListItem, ListState};

use crate::core::lot::{format_number, LotId};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::card::BidCard;
use crate::tui::event::UiEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BasketEvent {
    /// Checkbox toggled on a won lot.
    Toggle { id: LotId, checked: bool },
    /// Row activated — open the lot's detail view.
    OpenPreview(LotId),
    /// Proceed to the order form ('o', won-lot mode only).
    OpenOrder,
}

pub struct Basket {
    // Props
    pub items: Vec<BidCard>,
    pub total: u64,
    pub selected_ids: Vec<LotId>,
    /// Won-lot mode: checkboxes, total and the order shortcut.
    checkboxes: bool,
    // Presentation state
    pub cursor: usize,
}

impl Basket {
    /// The active-lots list ("ставки").
    pub fn bids() -> Self {
        Self::new(false)
    }

    /// The won-lots list with order controls.
    pub fn won() -> Self {
        Self::new(true)
    }

    fn new(checkboxes: bool) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            selected_ids: Vec::new(),
            checkboxes,
            cursor: 0,
        }
    }

    fn is_checked(&self, id: &str) -> bool {
        self.selected_ids.iter().any(|i| i == id)
    }

    fn cursor_card(&self) -> Option<&BidCard> {
        self.items.get(self.cursor.min(self.items.len().saturating_sub(1)))
    }
}

impl EventHandler for Basket {
    type Event = BasketEvent;

    fn handle_event(&mut self, event: &UiEvent) -> Option<BasketEvent> {
        match event {
            UiEvent::Up => {
                self.cursor = self.cursor.saturating_sub(1);
                None
            }
            UiEvent::Down => {
                if self.cursor + 1 < self.items.len() {
                    self.cursor += 1;
                }
                None
            }
            UiEvent::InputChar(' ') if self.checkboxes => {
                let card = self.cursor_card()?;
                Some(BasketEvent::Toggle {
                    id: card.id.clone(),
                    checked: !self.is_checked(&card.id),
                })
            }
            UiEvent::InputChar('o') if self.checkboxes => Some(BasketEvent::OpenOrder),
            UiEvent::Submit => self
                .cursor_card()
                .map(|card| BasketEvent::OpenPreview(card.id.clone())),
            _ => None,
        }
    }
}

impl Component for Basket {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        use Constraint::{Length, Min};
        let [list_area, footer_area] = Layout::vertical([Min(0), Length(2)]).areas(area);

        if self.cursor >= self.items.len() {
            self.cursor = self.items.len().saturating_sub(1);
        }

        let rows: Vec<ListItem> = self
            .items
            .iter()
            .map(|card| {
                let checkbox = self.checkboxes.then(|| self.is_checked(&card.id));
                ListItem::new(card.line(checkbox))
            })
            .collect();
        let list = List::new(rows)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        let mut list_state = ListState::default();
        if !self.items.is_empty() {
            list_state.select(Some(self.cursor));
        }
        frame.render_stateful_widget(list, list_area, &mut list_state);

        if self.checkboxes {
            let total = Line::styled(
                format!("Итого: {}₽", format_number(self.total)),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            );
            frame.render_widget(total, Rect { height: 1, ..footer_area });
            let hint = Line::styled(
                "Space отметить · o оформить · Enter лот · Esc закрыть",
                Style::default().add_modifier(Modifier::DIM),
            );
            frame.render_widget(
                hint,
                Rect {
                    y: footer_area.y + 1,
                    height: 1,
                    ..footer_area
                },
            );
        } else {
            let hint = Line::styled(
                "Enter лот · Tab закрытые · Esc закрыть",
                Style::default().add_modifier(Modifier::DIM),
            );
            frame.render_widget(hint, Rect { height: 1, ..footer_area });
        }
    }
}
