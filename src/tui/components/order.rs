//! # Order Form Component
//!
//! Email/phone entry for the selected won lots. Field edits are reported
//! upward per keystroke with the full field value; validation lives in the
//! application state, the form only displays the resulting error string and
//! gates submission on the valid flag it receives back.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::state::OrderField;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::UiEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderFormEvent {
    /// A field's full value after an edit.
    FieldChanged { field: OrderField, value: String },
    Submit,
}

pub struct OrderForm {
    // Props
    pub email: String,
    pub phone: String,
    pub errors: String,
    pub valid: bool,
    // Presentation state
    focus: OrderField,
}

impl Default for OrderForm {
    fn default() -> Self {
        Self {
            email: String::new(),
            phone: String::new(),
            errors: String::new(),
            valid: false,
            focus: OrderField::Email,
        }
    }
}

impl OrderForm {
    /// Back to a blank form with the email field focused.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn focused_value(&self) -> &str {
        match self.focus {
            OrderField::Email => &self.email,
            OrderField::Phone => &self.phone,
        }
    }

    fn changed(&self) -> OrderFormEvent {
        OrderFormEvent::FieldChanged {
            field: self.focus,
            value: self.focused_value().to_string(),
        }
    }

    fn field_line(&self, field: OrderField, label: &str, value: &str) -> Line<'_> {
        let focused = self.focus == field;
        let marker = if focused { "> " } else { "  " };
        let label_style = if focused {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };
        let mut spans = vec![
            Span::raw(marker),
            Span::styled(format!("{label}: "), label_style),
            Span::raw(value.to_string()),
        ];
        if focused {
            spans.push(Span::styled("█", Style::default().add_modifier(Modifier::SLOW_BLINK)));
        }
        Line::from(spans)
    }
}

impl EventHandler for OrderForm {
    type Event = OrderFormEvent;

    fn handle_event(&mut self, event: &UiEvent) -> Option<OrderFormEvent> {
        match event {
            UiEvent::Tab | UiEvent::Up | UiEvent::Down => {
                self.focus = match self.focus {
                    OrderField::Email => OrderField::Phone,
                    OrderField::Phone => OrderField::Email,
                };
                None
            }
            UiEvent::InputChar(c) => {
                match self.focus {
                    OrderField::Email => self.email.push(*c),
                    OrderField::Phone => self.phone.push(*c),
                }
                Some(self.changed())
            }
            UiEvent::Backspace => {
                let popped = match self.focus {
                    OrderField::Email => self.email.pop(),
                    OrderField::Phone => self.phone.pop(),
                };
                popped.map(|_| self.changed())
            }
            UiEvent::Submit if self.valid => Some(OrderFormEvent::Submit),
            _ => None,
        }
    }
}

impl Component for OrderForm {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        use Constraint::{Length, Min};
        let [title_area, email_area, phone_area, errors_area, footer_area] =
            Layout::vertical([Length(2), Length(1), Length(2), Min(1), Length(1)]).areas(area);

        frame.render_widget(
            Paragraph::new("Оформление заказа")
                .style(Style::default().add_modifier(Modifier::BOLD))
                .block(Block::default()),
            title_area,
        );
        frame.render_widget(
            self.field_line(OrderField::Email, "Email", &self.email),
            email_area,
        );
        frame.render_widget(
            self.field_line(OrderField::Phone, "Телефон", &self.phone),
            phone_area,
        );

        if !self.errors.is_empty() {
            frame.render_widget(
                Paragraph::new(self.errors.clone()).style(Style::default().fg(Color::Red)),
                errors_area,
            );
        }

        let footer = if self.valid {
            Line::styled(
                "Enter оформить · Tab поле · Esc закрыть",
                Style::default().add_modifier(Modifier::DIM),
            )
        } else {
            Line::styled(
                "Tab поле · Esc закрыть",
                Style::default().add_modifier(Modifier::DIM),
            )
        };
        frame.render_widget(footer, footer_area);

        // Put the terminal cursor after the focused value.
        let (field_area, value) = match self.focus {
            OrderField::Email => (email_area, self.email.as_str()),
            OrderField::Phone => (phone_area, self.phone.as_str()),
        };
        let prefix = match self.focus {
            OrderField::Email => "> Email: ",
            OrderField::Phone => "> Телефон: ",
        };
        let x = field_area.x + (prefix.width() + value.width()) as u16;
        frame.set_cursor_position((x.min(field_area.right().saturating_sub(1)), field_area.y));
    }
}
