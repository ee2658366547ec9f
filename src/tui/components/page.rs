//! # Page Component
//!
//! The main catalog screen: a scrollable list of lot cards, the won-lot
//! counter in the header and a key-hint footer. While a modal is open the
//! page is "locked": it dims and stops taking input, so the dialog above
//! it has exclusive focus.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::lot::LotId;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::card::{CatalogCard, CATALOG_CARD_HEIGHT};
use crate::tui::event::UiEvent;

/// High-level events emitted by the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    /// A catalog card was activated (Enter on the selection).
    CardActivated(LotId),
    /// Open the active-lots modal ('b').
    OpenBids,
    /// Open the won-lots basket modal ('w').
    OpenBasket,
    /// Leave the application ('q').
    Quit,
}

pub struct Page {
    // Props (set by the wiring)
    pub catalog: Vec<CatalogCard>,
    pub counter: usize,
    pub locked: bool,
    pub status: Option<String>,
    // Presentation state
    pub selected: usize,
    scroll: ScrollViewState,
}

impl Page {
    pub fn new() -> Self {
        Self {
            catalog: Vec::new(),
            counter: 0,
            locked: false,
            status: None,
            selected: 0,
            scroll: ScrollViewState::new(),
        }
    }

    /// Keep the selection inside the catalog after a re-render shrank it.
    pub fn clamp_selection(&mut self) {
        if self.selected >= self.catalog.len() {
            self.selected = self.catalog.len().saturating_sub(1);
        }
    }

    fn scroll_to_selected(&mut self, viewport_height: u16) {
        let top = self.selected as u16 * CATALOG_CARD_HEIGHT;
        let bottom = top + CATALOG_CARD_HEIGHT;
        let offset = self.scroll.offset().y;
        if top < offset {
            self.scroll.set_offset(Position::new(0, top));
        } else if bottom > offset + viewport_height {
            self.scroll
                .set_offset(Position::new(0, bottom.saturating_sub(viewport_height)));
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for Page {
    type Event = PageEvent;

    fn handle_event(&mut self, event: &UiEvent) -> Option<PageEvent> {
        match event {
            UiEvent::Up => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            UiEvent::Down => {
                if self.selected + 1 < self.catalog.len() {
                    self.selected += 1;
                }
                None
            }
            UiEvent::Submit => self
                .catalog
                .get(self.selected)
                .map(|card| PageEvent::CardActivated(card.id.clone())),
            UiEvent::InputChar('b') => Some(PageEvent::OpenBids),
            UiEvent::InputChar('w') => Some(PageEvent::OpenBasket),
            UiEvent::InputChar('q') => Some(PageEvent::Quit),
            _ => None,
        }
    }
}

impl Component for Page {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        use Constraint::{Length, Min};
        let [header_area, main_area, footer_area] =
            Layout::vertical([Length(1), Min(0), Length(1)]).areas(area);

        let dim = if self.locked {
            Style::default().add_modifier(Modifier::DIM)
        } else {
            Style::default()
        };

        // Header: title + won-lot counter.
        let header = Line::from(vec![
            Span::styled("Молоток", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" — аукционный каталог | Выиграно: "),
            Span::styled(
                self.counter.to_string(),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
        ])
        .style(dim);
        frame.render_widget(header, header_area);

        // Catalog cards in a scroll view.
        self.clamp_selection();
        self.scroll_to_selected(main_area.height);

        let content_width = main_area.width.saturating_sub(1);
        let total_height = self.catalog.len() as u16 * CATALOG_CARD_HEIGHT;
        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Always)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        for (index, card) in self.catalog.iter().enumerate() {
            let rect = Rect::new(
                0,
                index as u16 * CATALOG_CARD_HEIGHT,
                content_width,
                CATALOG_CARD_HEIGHT,
            );
            let selected = !self.locked && index == self.selected;
            scroll_view.render_widget(card.paragraph(selected).style(dim), rect);
        }
        frame.render_stateful_widget(scroll_view, main_area, &mut self.scroll);

        // Footer: transient status (e.g. a failed request) or key hints.
        let footer = match &self.status {
            Some(status) => Line::styled(status.clone(), Style::default().fg(Color::Red)),
            None => Line::styled(
                "↑/↓ выбор · Enter лот · b ставки · w корзина · q выход",
                Style::default().add_modifier(Modifier::DIM),
            ),
        };
        frame.render_widget(footer, footer_area);
    }
}
