//! # Tabs Component
//!
//! The active/closed switcher shown above the bids and basket lists. The
//! selected tab is highlighted and disabled; activating the other one is
//! forwarded to the wiring, which opens the corresponding modal.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::UiEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Active,
    Closed,
}

impl Tab {
    pub fn other(self) -> Tab {
        match self {
            Tab::Active => Tab::Closed,
            Tab::Closed => Tab::Active,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabsEvent {
    Selected(Tab),
}

pub struct Tabs {
    pub selected: Tab,
}

impl Tabs {
    pub fn new() -> Self {
        Self { selected: Tab::Active }
    }
}

impl Default for Tabs {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for Tabs {
    type Event = TabsEvent;

    fn handle_event(&mut self, event: &UiEvent) -> Option<TabsEvent> {
        match event {
            // The selected tab is disabled; any switch key picks the other.
            UiEvent::Tab | UiEvent::Left | UiEvent::Right => {
                Some(TabsEvent::Selected(self.selected.other()))
            }
            _ => None,
        }
    }
}

impl Component for Tabs {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let tab_span = |label: &str, tab: Tab| {
            if tab == self.selected {
                Span::styled(
                    format!(" {label} "),
                    Style::default()
                        .add_modifier(Modifier::REVERSED | Modifier::BOLD),
                )
            } else {
                Span::styled(format!(" {label} "), Style::default().fg(Color::DarkGray))
            }
        };
        let line = Line::from(vec![
            tab_span("Лоты на торгах", Tab::Active),
            Span::raw(" "),
            tab_span("Закрытые лоты", Tab::Closed),
        ]);
        frame.render_widget(line, area);
    }
}
