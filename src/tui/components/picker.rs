//! # Picker Overlay State
//!
//! Shared list navigation for the full-screen pickers (models, templates).
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `PickerState<T>` lives in `TuiState` while the overlay is open
//! - `ModelPicker` / `TemplatePicker` are created each frame with borrowed state

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::widgets::ListState;

use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;

pub struct PickerState<T> {
    pub items: Vec<T>,
    pub selected: usize,
    pub list_state: ListState,
}

/// Events emitted by a picker.
#[derive(Debug, PartialEq)]
pub enum PickerEvent<T> {
    Select(T),
    Dismiss,
}

impl<T: Clone> PickerState<T> {
    /// Open with `initial` highlighted (clamped to the list).
    pub fn new(items: Vec<T>, initial: usize) -> Self {
        let mut list_state = ListState::default();
        let selected = initial.min(items.len().saturating_sub(1));
        if !items.is_empty() {
            list_state.select(Some(selected));
        }
        Self {
            items,
            selected,
            list_state,
        }
    }

    fn move_by(&mut self, delta: isize) {
        if self.items.is_empty() {
            return;
        }
        let last = self.items.len() - 1;
        self.selected = self.selected.saturating_add_signed(delta).min(last);
        self.list_state.select(Some(self.selected));
    }
}

impl<T: Clone> EventHandler for PickerState<T> {
    type Event = PickerEvent<T>;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::Escape => Some(PickerEvent::Dismiss),
            TuiEvent::CursorUp => {
                self.move_by(-1);
                None
            }
            TuiEvent::CursorDown => {
                self.move_by(1);
                None
            }
            TuiEvent::CursorHome => {
                self.move_by(isize::MIN);
                None
            }
            TuiEvent::CursorEnd => {
                self.move_by(isize::MAX);
                None
            }
            TuiEvent::Submit => self
                .items
                .get(self.selected)
                .map(|item| PickerEvent::Select(item.clone())),
            _ => None,
        }
    }
}

/// Truncate a string to fit within `max_width` chars, adding "..." if needed.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else if max_width <= 3 {
        ".".repeat(max_width)
    } else {
        let head: String = s.chars().take(max_width - 3).collect();
        format!("{head}...")
    }
}

/// Compute a centered rect using percentage of the outer rect.
pub fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}
