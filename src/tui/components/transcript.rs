//! # Transcript Component
//!
//! Scrollable view of the conversation.
//!
//! ## Responsibilities
//!
//! - Render each message as a bubble: user on the right, assistant on the left
//! - Show an empty-state hint before the first message
//! - Show an "AI is thinking..." row while a reply is pending
//! - Keyboard selection of a single message for copying
//!
//! ## Architecture
//!
//! `Transcript` is a transient component (created each frame) that wraps
//! `&'a mut TranscriptState` (persistent state) plus the message slice as props.
//! Heights are measured during render and kept on the state so that
//! selection can scroll the viewport between frames.
//!
//! Only bubbles that intersect the viewport are drawn. Row positions are
//! `u32` running totals, so a conversation may grow far past the height of
//! any terminal buffer.

use std::ops::Range;

use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, BorderType, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
    Widget,
};

use crate::core::message::{ChatMessage, Role};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::spinner;
use crate::tui::event::TuiEvent;
use crate::tui::palette::Palette;

/// Share of the content width a bubble may use.
const BUBBLE_WIDTH_PERCENT: u16 = 70;
/// Blank rows between bubbles.
const BUBBLE_GAP: u32 = 1;
/// Rows reserved for the thinking indicator.
const THINKING_HEIGHT: u32 = 2;

#[derive(Debug, Clone, PartialEq)]
pub enum TranscriptEvent {
    /// Copy the message at this index to the clipboard.
    Copy(usize),
}

pub struct TranscriptState {
    /// First transcript row shown at the top of the viewport.
    pub offset: u32,
    /// When true, follow new content at the bottom.
    pub stick_to_bottom: bool,
    pub selected: Option<usize>,
    /// Row heights of each message including the gap, from the last render.
    pub heights: Vec<u32>,
    /// `prefix_heights[i]` is the row just below message `i` and its gap.
    prefix_heights: Vec<u32>,
    /// Bubble width the cached heights were measured at.
    measured_width: u16,
    /// Rows below the last message, e.g. the thinking indicator.
    trailer: u32,
    pub viewport_height: u16,
}

impl Default for TranscriptState {
    fn default() -> Self {
        Self::new()
    }
}

impl TranscriptState {
    pub fn new() -> Self {
        Self {
            offset: 0,
            stick_to_bottom: true,
            selected: None,
            heights: Vec::new(),
            prefix_heights: Vec::new(),
            measured_width: 0,
            trailer: 0,
            viewport_height: 0,
        }
    }

    /// Forget selection and scroll position, e.g. after the conversation is cleared.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn push_height(&mut self, height: u32) {
        let bottom = self.content_height().saturating_add(height);
        self.heights.push(height);
        self.prefix_heights.push(bottom);
    }

    fn clear_heights(&mut self) {
        self.heights.clear();
        self.prefix_heights.clear();
    }

    /// Measure messages not seen yet. Messages only ever get appended until
    /// the conversation is cleared, so earlier heights stay valid unless the
    /// width changes or the list shrinks.
    fn measure(&mut self, messages: &[ChatMessage], bubble_width: u16) {
        if self.measured_width != bubble_width || messages.len() < self.heights.len() {
            self.clear_heights();
            self.measured_width = bubble_width;
        }
        let start = self.heights.len();
        for message in &messages[start..] {
            self.push_height(bubble_height(message, bubble_width).saturating_add(BUBBLE_GAP));
        }
    }

    fn content_height(&self) -> u32 {
        self.prefix_heights.last().copied().unwrap_or(0)
    }

    fn total_height(&self) -> u32 {
        self.content_height().saturating_add(self.trailer)
    }

    fn row_top(&self, idx: usize) -> u32 {
        match idx {
            0 => 0,
            i => self.prefix_heights[i - 1],
        }
    }

    fn max_offset(&self) -> u32 {
        self.total_height()
            .saturating_sub(u32::from(self.viewport_height))
    }

    fn page(&self) -> u32 {
        u32::from(self.viewport_height).max(1)
    }

    fn scroll_up_by(&mut self, rows: u32) {
        self.offset = self.offset.saturating_sub(rows);
        self.stick_to_bottom = false;
    }

    fn scroll_down_by(&mut self, rows: u32) {
        self.offset = self.offset.saturating_add(rows);
        self.repin_if_at_bottom();
    }

    fn repin_if_at_bottom(&mut self) {
        let max_offset = self.max_offset();
        if self.offset >= max_offset {
            self.stick_to_bottom = true;
            self.offset = max_offset;
        }
    }

    /// Messages overlapping the rows `offset..offset + height`.
    fn visible_range(&self, offset: u32, height: u16) -> Range<usize> {
        let end_row = offset.saturating_add(u32::from(height));
        let start = self.prefix_heights.partition_point(|&end| end <= offset);
        let end = self.prefix_heights.partition_point(|&end| end < end_row);
        start..end.saturating_add(1).min(self.prefix_heights.len())
    }

    /// Scroll so the selected message is fully visible, aligning its top edge
    /// when it is taller than the viewport.
    fn scroll_to_selected(&mut self) {
        let Some(idx) = self.selected else {
            return;
        };
        if idx >= self.prefix_heights.len() {
            return;
        }
        let top = self.row_top(idx);
        let height = self.heights[idx];
        let viewport = u32::from(self.viewport_height);

        if top < self.offset || height > viewport {
            self.offset = top;
            self.stick_to_bottom = false;
        } else if top.saturating_add(height) > self.offset.saturating_add(viewport) {
            self.offset = top.saturating_add(height).saturating_sub(viewport);
            self.stick_to_bottom = self.offset >= self.max_offset();
        }
    }
}

impl EventHandler for TranscriptState {
    type Event = TranscriptEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        let count = self.heights.len();
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_up_by(1);
                None
            }
            TuiEvent::ScrollDown => {
                self.scroll_down_by(1);
                None
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_up_by(self.page());
                None
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_down_by(self.page());
                None
            }
            TuiEvent::CursorUp if count > 0 => {
                self.selected = Some(match self.selected {
                    Some(i) => i.saturating_sub(1),
                    None => count - 1,
                });
                self.scroll_to_selected();
                None
            }
            TuiEvent::CursorDown if count > 0 => {
                self.selected = match self.selected {
                    Some(i) if i + 1 < count => Some(i + 1),
                    Some(i) => Some(i),
                    None => None,
                };
                self.scroll_to_selected();
                None
            }
            TuiEvent::CursorEnd => {
                self.selected = None;
                self.stick_to_bottom = true;
                None
            }
            TuiEvent::InputChar('y') if count > 0 => {
                Some(TranscriptEvent::Copy(self.selected.unwrap_or(count - 1)))
            }
            _ => None,
        }
    }
}

fn wrap_width(bubble_width: u16) -> usize {
    usize::from(bubble_width.saturating_sub(4).max(1))
}

/// Bubble rows for a message: wrapped content (at least one line) plus borders.
fn bubble_height(message: &ChatMessage, bubble_width: u16) -> u32 {
    let lines = textwrap::wrap(&message.content, wrap_width(bubble_width)).len();
    u32::try_from(lines.max(1))
        .unwrap_or(u32::MAX)
        .saturating_add(2)
}

/// One rendered message, possibly clipped to the rows inside the viewport.
struct Bubble<'a> {
    message: &'a ChatMessage,
    /// Wrapped content lines that fall inside `rows`.
    lines: Vec<String>,
    /// Visible bubble rows, counted from the top border.
    rows: Range<u32>,
    /// Full bubble height including both borders.
    height: u32,
    selected: bool,
    palette: Palette,
}

impl<'a> Bubble<'a> {
    fn new(
        message: &'a ChatMessage,
        width: u16,
        rows: Range<u32>,
        height: u32,
        selected: bool,
        palette: Palette,
    ) -> Self {
        // Content occupies rows 1..height - 1; line `n` sits on row `n + 1`.
        let first = rows.start.max(1) - 1;
        let last = rows.end.min(height.saturating_sub(1)).saturating_sub(1);
        let lines = textwrap::wrap(&message.content, wrap_width(width))
            .into_iter()
            .skip(first as usize)
            .take(last.saturating_sub(first) as usize)
            .map(|l| l.into_owned())
            .collect();
        Self {
            message,
            lines,
            rows,
            height,
            selected,
            palette,
        }
    }
}

impl Widget for Bubble<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (label, color, alignment) = match self.message.role {
            Role::User => ("You", self.palette.user, Alignment::Right),
            Role::Assistant => ("Assistant", self.palette.assistant, Alignment::Left),
        };
        let shows_top = self.rows.start == 0;
        let shows_bottom = self.rows.end >= self.height;

        let mut borders = Borders::LEFT | Borders::RIGHT;
        if shows_top {
            borders |= Borders::TOP;
        }
        if shows_bottom {
            borders |= Borders::BOTTOM;
        }

        let mut border_style = Style::default().fg(color);
        if self.selected {
            border_style = border_style.add_modifier(Modifier::BOLD);
        }
        let mut block = Block::default()
            .borders(borders)
            .border_type(if self.selected {
                BorderType::Thick
            } else {
                BorderType::Rounded
            })
            .border_style(border_style);
        if shows_top {
            let time = self
                .message
                .timestamp
                .with_timezone(&chrono::Local)
                .format("%H:%M:%S")
                .to_string();
            block = block
                .title(Span::styled(
                    format!(" {label} "),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ))
                .title(
                    Line::from(Span::styled(format!(" {time} "), self.palette.muted()))
                        .right_aligned(),
                );
        }
        if shows_bottom && self.selected {
            block = block.title_bottom(Line::from(" y Copy ").right_aligned());
        }

        let lines: Vec<Line> = self.lines.into_iter().map(Line::from).collect();
        Paragraph::new(lines)
            .alignment(alignment)
            .style(Style::default().fg(self.palette.foreground))
            .block(block)
            .render(area, buf);
    }
}

pub struct Transcript<'a> {
    pub state: &'a mut TranscriptState,
    pub messages: &'a [ChatMessage],
    pub is_loading: bool,
    pub spinner_frame: usize,
    pub focused: bool,
    pub palette: Palette,
}

impl Transcript<'_> {
    fn render_empty(&self, frame: &mut Frame, area: Rect) {
        let top = area.y + area.height.saturating_sub(3) / 2;
        let lines = vec![
            Line::from(Span::styled("Start a conversation", self.palette.title())),
            Line::default(),
            Line::from(Span::styled(
                "Select a model, tune the parameters and write a prompt to begin.",
                self.palette.muted(),
            )),
        ];
        let rect = Rect::new(area.x, top, area.width, area.height.min(3));
        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(ratatui::widgets::Wrap { trim: true }),
            rect,
        );
    }

    fn render_thinking(&self, frame: &mut Frame, area: Rect) {
        let row = Line::from(vec![
            Span::styled(
                format!("{} ", spinner(self.spinner_frame)),
                Style::default().fg(self.palette.accent),
            ),
            Span::styled("AI is thinking...", self.palette.muted()),
        ]);
        frame.render_widget(Paragraph::new(row), area);
    }
}

impl Component for Transcript<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .title(format!(" Conversation ({}) ", self.messages.len()))
            .title_bottom(
                Line::from(" Ctrl+E Export · Ctrl+S Share · Ctrl+L Clear ").right_aligned(),
            )
            .border_style(self.palette.border(self.focused))
            .title_style(self.palette.title());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.messages.is_empty() && !self.is_loading {
            self.state.clear_heights();
            self.render_empty(frame, inner);
            return;
        }

        // Leave a column for the scrollbar.
        let content_width = inner.width.saturating_sub(1);
        let bubble_width = ((content_width as u32 * BUBBLE_WIDTH_PERCENT as u32 / 100) as u16)
            .max(10)
            .min(content_width);

        if self.state.selected.is_some_and(|i| i >= self.messages.len()) {
            self.state.selected = None;
        }

        self.state.measure(self.messages, bubble_width);
        self.state.viewport_height = inner.height;
        self.state.trailer = if self.is_loading { THINKING_HEIGHT } else { 0 };

        let max_offset = self.state.max_offset();
        if self.state.stick_to_bottom || self.state.offset > max_offset {
            self.state.offset = max_offset;
        }

        let view_top = self.state.offset;
        let view_bottom = view_top.saturating_add(u32::from(inner.height));

        for i in self.state.visible_range(view_top, inner.height) {
            let message = &self.messages[i];
            let top = self.state.row_top(i);
            let height = self.state.heights[i].saturating_sub(BUBBLE_GAP);
            let rows = view_top.saturating_sub(top)..view_bottom.saturating_sub(top).min(height);
            if rows.is_empty() {
                continue;
            }

            // Both offsets are below `inner.height`, so they fit in a u16.
            let y = inner.y + (top + rows.start - view_top) as u16;
            let visible = (rows.end - rows.start) as u16;
            let x = match message.role {
                Role::User => inner.x + content_width.saturating_sub(bubble_width),
                Role::Assistant => inner.x,
            };
            let selected = self.state.selected == Some(i);
            frame.render_widget(
                Bubble::new(message, bubble_width, rows, height, selected, self.palette),
                Rect::new(x, y, bubble_width, visible),
            );
        }

        let thinking_row = self.state.content_height();
        if self.is_loading && (view_top..view_bottom).contains(&thinking_row) {
            let y = inner.y + (thinking_row - view_top) as u16;
            self.render_thinking(frame, Rect::new(inner.x, y, content_width, 1));
        }

        if max_offset > 0 {
            let mut scrollbar = ScrollbarState::new(max_offset as usize)
                .position(self.state.offset as usize)
                .viewport_content_length(usize::from(inner.height));
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                inner,
                &mut scrollbar,
            );
        }
    }
}
