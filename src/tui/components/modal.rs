//! Modal host. Tracks which dialog is open and draws the centered
//! overlay frame; the body is rendered by the wiring into the inner area.

use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Padding};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalContent {
    Preview,
    Bids,
    Basket,
    Order,
    Success,
    Empty,
}

#[derive(Default)]
pub struct Modal {
    pub content: Option<ModalContent>,
}

impl Modal {
    pub fn open(&mut self, content: ModalContent) {
        self.content = Some(content);
    }

    pub fn close(&mut self) {
        self.content = None;
    }

    pub fn is_open(&self) -> bool {
        self.content.is_some()
    }

    /// Clears the area under the dialog, draws the frame and returns the
    /// inner rect the body should render into.
    pub fn frame_area(&self, frame: &mut Frame, screen: Rect, title: &str) -> Rect {
        let width = (screen.width * 4 / 5).clamp(30, 90);
        let height = (screen.height * 4 / 5).clamp(10, 30);
        let [area] = Layout::horizontal([Constraint::Length(width)])
            .flex(Flex::Center)
            .areas(screen);
        let [area] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(area);

        frame.render_widget(Clear, area);
        let block = Block::default()
            .borders(Borders::ALL)
            .padding(Padding::uniform(1))
            .title(format!(" {title} "))
            .title_style(Style::default().add_modifier(Modifier::BOLD));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        inner
    }
}
