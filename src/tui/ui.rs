//! Top-level layout: the catalog page occupies the whole screen, with a
//! single centered modal rendered above it when a dialog is open.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;
use crate::tui::components::ModalContent;
use crate::tui::wiring::Views;

pub fn draw_ui(frame: &mut Frame, views: &mut Views) {
    let screen = frame.area();
    views.page.render(frame, screen);

    let Some(content) = views.modal.content else {
        return;
    };

    match content {
        ModalContent::Preview => {
            let title = views.preview_card.title.clone();
            let area = views.modal.frame_area(frame, screen, &title);
            let [text_area, panel_area] =
                Layout::vertical([Constraint::Percentage(55), Constraint::Percentage(45)])
                    .areas(area);

            let width = text_area.width.max(20) as usize;
            let lines: Vec<Line> = views
                .preview_card
                .description
                .iter()
                .flat_map(|para| {
                    textwrap::wrap(para, width)
                        .into_iter()
                        .map(|s| Line::raw(s.into_owned()))
                        .chain(std::iter::once(Line::raw("")))
                })
                .collect();
            frame.render_widget(Paragraph::new(lines), text_area);
            views.auction.render(frame, panel_area);
        }
        ModalContent::Bids | ModalContent::Basket => {
            let title = if content == ModalContent::Bids {
                "Ставки"
            } else {
                "Корзина"
            };
            let area = views.modal.frame_area(frame, screen, title);
            let [tabs_area, list_area] =
                Layout::vertical([Constraint::Length(2), Constraint::Min(1)]).areas(area);
            views.tabs.render(frame, tabs_area);
            if content == ModalContent::Bids {
                views.bids.render(frame, list_area);
            } else {
                views.basket.render(frame, list_area);
            }
        }
        ModalContent::Order => {
            let area = views.modal.frame_area(frame, screen, "Оформление");
            views.order.render(frame, area);
        }
        ModalContent::Success | ModalContent::Empty => {
            let area = views.modal.frame_area(frame, screen, "Молоток");
            views.plug.render(frame, area);
        }
    }
}
