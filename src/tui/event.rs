use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

/// Low-level terminal input events. Deliberately close to the keyboard:
/// which view a key acts on depends on what is open, so interpretation
/// lives with the focused component, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Ctrl+C — quit regardless of focus.
    ForceQuit,
    Escape,
    /// Enter.
    Submit,
    InputChar(char),
    Backspace,
    Tab,
    Up,
    Down,
    Left,
    Right,
    Resize,
}

/// Poll for an event, blocking up to `timeout`.
pub fn poll_event(timeout: Duration) -> Option<UiEvent> {
    if !event::poll(timeout).ok()? {
        return None;
    }
    match event::read().ok()? {
        Event::Key(key) if key.kind != KeyEventKind::Release => {
            log::debug!("Key event: {:?} with modifiers {:?}", key.code, key.modifiers);
            match (key.modifiers, key.code) {
                (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(UiEvent::ForceQuit),
                (_, KeyCode::Char(c)) => Some(UiEvent::InputChar(c)),
                (_, KeyCode::Backspace) => Some(UiEvent::Backspace),
                (_, KeyCode::Enter) => Some(UiEvent::Submit),
                (_, KeyCode::Esc) => Some(UiEvent::Escape),
                (_, KeyCode::Tab) => Some(UiEvent::Tab),
                (_, KeyCode::Up) => Some(UiEvent::Up),
                (_, KeyCode::Down) => Some(UiEvent::Down),
                (_, KeyCode::Left) => Some(UiEvent::Left),
                (_, KeyCode::Right) => Some(UiEvent::Right),
                _ => None,
            }
        }
        Event::Resize(_, _) => Some(UiEvent::Resize),
        _ => None,
    }
}

/// Poll without blocking (returns immediately if nothing is pending).
pub fn poll_event_immediate() -> Option<UiEvent> {
    poll_event(Duration::ZERO)
}
