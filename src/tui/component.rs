use ratatui::Frame;
use ratatui::layout::Rect;

/// A view component.
///
/// Components receive their data as props (struct fields) set by the
/// wiring layer, and render into a `Frame` within a given `Rect`. The
/// wiring sets props; components never reach into `AppState` themselves.
///
/// `render` takes `&mut self` so components can update presentation state
/// (scroll offsets, cached layouts) during the render pass, aligning with
/// ratatui's `StatefulWidget` pattern.
pub trait Component {
    /// Render the component into the given area.
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that handles terminal input.
///
/// Handlers translate low-level [`UiEvent`](super::event::UiEvent)s into
/// high-level component events (a tab selected, a bid submitted, a field
/// edited). The event loop maps those onto bus emissions — components
/// forward interaction, they never mutate application state.
pub trait EventHandler {
    /// The type of high-level event this component emits.
    type Event;

    /// Handle one input event, optionally emitting a component event.
    fn handle_event(&mut self, event: &super::event::UiEvent) -> Option<Self::Event>;
}
