//! Placeholder modal body: order confirmation and the empty-basket notice.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::core::lot::format_number;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::UiEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlugEvent {
    Dismiss,
}

#[derive(Default)]
pub struct Plug {
    pub title: String,
    pub description: String,
}

impl Plug {
    pub fn success(total: u64) -> Self {
        Self {
            title: "Заказ оформлен".to_string(),
            description: format!(
                "Лоты на сумму {}₽ ждут вас. Счёт отправлен на почту.",
                format_number(total)
            ),
        }
    }

    pub fn empty_basket() -> Self {
        Self {
            title: "Корзина пуста".to_string(),
            description: "Выберите хотя бы один выигранный лот.".to_string(),
        }
    }
}

impl EventHandler for Plug {
    type Event = PlugEvent;

    fn handle_event(&mut self, event: &UiEvent) -> Option<PlugEvent> {
        matches!(event, UiEvent::Submit).then_some(PlugEvent::Dismiss)
    }
}

impl Component for Plug {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::styled(
                self.title.clone(),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
            Line::raw(""),
            Line::raw(self.description.clone()),
            Line::raw(""),
            Line::styled("Enter продолжить", Style::default().add_modifier(Modifier::DIM)),
        ];
        frame.render_widget(Paragraph::new(lines), area);
    }
}
