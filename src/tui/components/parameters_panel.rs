//! # Parameters Panel
//!
//! Four slider rows, one per generation knob. Up/Down picks a knob,
//! Left/Right steps it, Home/End jumps to the bounds.
//!
//! The panel is the only place bounds are enforced: stepping always lands
//! inside the knob's range. A value that arrived from elsewhere and sits
//! outside the range is drawn in the warning color and snaps back inside
//! on the next step.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::params::{GenerationParameters, Knob, ParameterPatch};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::palette::Palette;

/// Rows used by one knob: label/value, bar, description, spacer.
const ROWS_PER_KNOB: u16 = 4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KnobTarget {
    Step(i32),
    Min,
    Max,
}

/// Request to move one knob. Turned into a patch against the current
/// parameters by [`ParameterChange::resolve`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterChange {
    pub knob: Knob,
    pub target: KnobTarget,
}

impl ParameterChange {
    pub fn resolve(&self, params: &GenerationParameters) -> ParameterPatch {
        let spec = self.knob.spec();
        let value = match self.target {
            KnobTarget::Step(steps) => spec.nudge(self.knob.value(params), steps),
            KnobTarget::Min => spec.min,
            KnobTarget::Max => spec.max,
        };
        self.knob.patch(value)
    }
}

#[derive(Debug, Default)]
pub struct ParametersPanelState {
    pub selected: usize,
}

impl ParametersPanelState {
    pub fn selected_knob(&self) -> Knob {
        Knob::ALL[self.selected.min(Knob::ALL.len() - 1)]
    }

    /// Panel height, borders included, that shows every knob.
    pub fn required_height() -> u16 {
        Knob::ALL.len() as u16 * ROWS_PER_KNOB + 3
    }
}

impl EventHandler for ParametersPanelState {
    type Event = ParameterChange;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        let target = match event {
            TuiEvent::CursorUp => {
                self.selected = self.selected.saturating_sub(1);
                return None;
            }
            TuiEvent::CursorDown => {
                self.selected = (self.selected + 1).min(Knob::ALL.len() - 1);
                return None;
            }
            TuiEvent::CursorLeft | TuiEvent::InputChar('-') => KnobTarget::Step(-1),
            TuiEvent::CursorRight | TuiEvent::InputChar('+') => KnobTarget::Step(1),
            TuiEvent::ScrollPageDown => KnobTarget::Step(-5),
            TuiEvent::ScrollPageUp => KnobTarget::Step(5),
            TuiEvent::CursorHome => KnobTarget::Min,
            TuiEvent::CursorEnd => KnobTarget::Max,
            _ => return None,
        };
        Some(ParameterChange {
            knob: self.selected_knob(),
            target,
        })
    }
}

pub struct ParametersPanel<'a> {
    pub state: &'a ParametersPanelState,
    pub parameters: &'a GenerationParameters,
    pub focused: bool,
    pub palette: Palette,
}

impl ParametersPanel<'_> {
    fn knob_lines(&self, knob: Knob, width: usize) -> Vec<Line<'static>> {
        let spec = knob.spec();
        let value = knob.value(self.parameters);
        let is_selected = self.focused && self.state.selected_knob() == knob;
        let in_range = spec.contains(value);

        let label_style = if is_selected {
            Style::default()
                .fg(self.palette.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.palette.foreground)
        };
        let value_style = if in_range {
            Style::default().fg(self.palette.foreground)
        } else {
            Style::default()
                .fg(self.palette.warning)
                .add_modifier(Modifier::BOLD)
        };

        let marker = if is_selected { "▸ " } else { "  " };
        let formatted = knob.format(self.parameters);
        let gap = width.saturating_sub(marker.width() + spec.label.width() + formatted.width());

        let bar_width = width.saturating_sub(2);
        let filled = (spec.ratio(value) * bar_width as f64).round() as usize;
        let bar_color = if is_selected {
            self.palette.accent
        } else {
            self.palette.muted
        };

        vec![
            Line::from(vec![
                Span::styled(marker, label_style),
                Span::styled(spec.label, label_style),
                Span::raw(" ".repeat(gap)),
                Span::styled(formatted, value_style),
            ]),
            Line::from(vec![
                Span::raw("  "),
                Span::styled("━".repeat(filled), Style::default().fg(bar_color)),
                Span::styled(
                    "─".repeat(bar_width.saturating_sub(filled)),
                    self.palette.muted(),
                ),
            ]),
            Line::from(Span::styled(
                format!("  {}", spec.description),
                self.palette.muted(),
            )),
            Line::default(),
        ]
    }
}

impl Component for ParametersPanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut block = Block::bordered()
            .title(" Parameters ")
            .border_style(self.palette.border(self.focused))
            .title_style(self.palette.title());
        if self.focused {
            block = block.title_bottom(Line::from(" ↑↓ knob  ←→ adjust ").centered());
        }

        let inner_width = area.width.saturating_sub(2) as usize;
        let lines: Vec<Line> = Knob::ALL
            .into_iter()
            .flat_map(|knob| self.knob_lines(knob, inner_width))
            .collect();

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}
