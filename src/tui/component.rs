use ratatui::Frame;
use ratatui::layout::Rect;

use crate::tui::event::TuiEvent;

/// A renderable panel.
///
/// Props arrive as struct fields; persistent state is borrowed as
/// `&mut State`, so `render` takes `&mut self` and may update caches such
/// as scroll offsets or measured heights while drawing.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A panel that consumes terminal events and may emit a higher-level one.
pub trait EventHandler {
    type Event;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event>;
}
