//! # Prompt Editor Component
//!
//! Multi-line text input for the next prompt.
//!
//! ## Responsibilities
//!
//! - Capture and edit text (insert, paste, backspace/delete, cursor moves)
//! - Emit `Submit` on Enter when the text is not blank
//! - Show the active template and a "Thinking..." indicator while disabled
//!
//! ## State Management
//!
//! The buffer and cursor are internal state. `disabled`, `focused`,
//! `template_name`, `spinner_frame` and `palette` are props synced from the
//! app each frame. The editor never clears itself on submit: the caller
//! clears it once the submission is accepted.

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthChar;

use crate::tui::component::{Component, EventHandler};
use crate::tui::components::spinner;
use crate::tui::event::TuiEvent;
use crate::tui::palette::Palette;

const PLACEHOLDER: &str = "Enter your prompt here... Try asking about anything!";

/// Rows used by the editor including borders.
pub const EDITOR_HEIGHT: u16 = 8;

#[derive(Debug, Clone, PartialEq)]
pub enum PromptEvent {
    /// Enter on a non-blank buffer. The buffer is left intact.
    Submit(String),
    /// Ctrl+U emptied the buffer.
    Cleared,
    ContentChanged,
}

pub struct PromptEditor {
    buffer: String,
    /// Byte offset into `buffer`, always on a char boundary.
    cursor: usize,
    pub disabled: bool,
    pub focused: bool,
    pub template_name: Option<String>,
    pub spinner_frame: usize,
    pub palette: Palette,
}

impl PromptEditor {
    pub fn new(palette: Palette) -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            disabled: false,
            focused: true,
            template_name: None,
            spinner_frame: 0,
            palette,
        }
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Replace the buffer and put the cursor at the end.
    pub fn set_text(&mut self, text: &str) {
        self.buffer = text.to_string();
        self.cursor = self.buffer.len();
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    fn prev_boundary(&self) -> usize {
        self.buffer[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        self.buffer[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
            .unwrap_or(self.buffer.len())
    }

    fn insert(&mut self, text: &str) {
        self.buffer.insert_str(self.cursor, text);
        self.cursor += text.len();
    }
}

/// Hard-wrap `text` into rows of at most `width` columns and locate the
/// byte offset `cursor` as (column, row).
fn layout(text: &str, width: usize, cursor: usize) -> (Vec<String>, (usize, usize)) {
    let width = width.max(1);
    let mut rows = vec![String::new()];
    let mut col = 0;
    let mut cursor_pos = None;

    for (i, ch) in text.char_indices() {
        if ch == '\n' {
            if i == cursor {
                cursor_pos = Some((col, rows.len() - 1));
            }
            rows.push(String::new());
            col = 0;
            continue;
        }
        let w = ch.width().unwrap_or(0);
        if col + w > width && col > 0 {
            rows.push(String::new());
            col = 0;
        }
        if i == cursor {
            cursor_pos = Some((col, rows.len() - 1));
        }
        if let Some(row) = rows.last_mut() {
            row.push(ch);
        }
        col += w;
    }

    let cursor_pos = cursor_pos.unwrap_or_else(|| {
        if col >= width {
            rows.push(String::new());
            (0, rows.len() - 1)
        } else {
            (col, rows.len() - 1)
        }
    });
    (rows, cursor_pos)
}

impl Component for PromptEditor {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let hints = if self.disabled {
            format!(" {} Thinking... ", spinner(self.spinner_frame))
        } else {
            " Enter Send  Ctrl+J Newline  Ctrl+U Clear ".to_string()
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(" Prompt Editor ")
            .title(Line::from(" Ctrl+T Templates ").right_aligned())
            .title_bottom(Line::from(hints).centered())
            .border_style(self.palette.border(self.focused))
            .title_style(self.palette.title());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut text_area = inner;
        if let Some(name) = &self.template_name
            && inner.height > 1
        {
            let banner = Line::from(vec![
                Span::styled("Using template: ", self.palette.muted()),
                Span::styled(
                    name.clone(),
                    self.palette.muted().add_modifier(Modifier::BOLD),
                ),
            ]);
            frame.render_widget(
                Paragraph::new(banner),
                Rect::new(inner.x, inner.y, inner.width, 1),
            );
            text_area = Rect::new(inner.x, inner.y + 1, inner.width, inner.height - 1);
        }

        if text_area.height == 0 || text_area.width == 0 {
            return;
        }

        if self.buffer.is_empty() {
            frame.render_widget(
                Paragraph::new(PLACEHOLDER)
                    .style(self.palette.muted())
                    .wrap(ratatui::widgets::Wrap { trim: false }),
                text_area,
            );
        } else {
            let (rows, (cursor_col, cursor_row)) =
                layout(&self.buffer, text_area.width as usize, self.cursor);
            let visible = text_area.height as usize;
            let scroll = (cursor_row + 1).saturating_sub(visible);
            let text_style = if self.disabled {
                self.palette.muted()
            } else {
                Style::default().fg(self.palette.foreground)
            };
            let lines: Vec<Line> = rows
                .into_iter()
                .skip(scroll)
                .take(visible)
                .map(Line::from)
                .collect();
            frame.render_widget(Paragraph::new(lines).style(text_style), text_area);

            if self.focused && !self.disabled {
                frame.set_cursor_position(Position::new(
                    text_area.x + cursor_col as u16,
                    text_area.y + (cursor_row - scroll) as u16,
                ));
            }
            return;
        }

        if self.focused && !self.disabled {
            frame.set_cursor_position(Position::new(text_area.x, text_area.y));
        }
    }
}

impl EventHandler for PromptEditor {
    type Event = PromptEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        if self.disabled {
            return None;
        }
        match event {
            TuiEvent::InputChar(c) => {
                let mut buf = [0u8; 4];
                self.insert(c.encode_utf8(&mut buf));
                Some(PromptEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                self.insert(text);
                Some(PromptEvent::ContentChanged)
            }
            TuiEvent::Backspace => (self.cursor > 0).then(|| {
                let prev = self.prev_boundary();
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                PromptEvent::ContentChanged
            }),
            TuiEvent::Delete => (self.cursor < self.buffer.len()).then(|| {
                let next = self.next_boundary();
                self.buffer.drain(self.cursor..next);
                PromptEvent::ContentChanged
            }),
            TuiEvent::CursorLeft => (self.cursor > 0).then(|| {
                self.cursor = self.prev_boundary();
                PromptEvent::ContentChanged
            }),
            TuiEvent::CursorRight => (self.cursor < self.buffer.len()).then(|| {
                self.cursor = self.next_boundary();
                PromptEvent::ContentChanged
            }),
            TuiEvent::CursorHome => {
                let line_start = self.buffer[..self.cursor]
                    .rfind('\n')
                    .map(|i| i + 1)
                    .unwrap_or(0);
                (self.cursor != line_start).then(|| {
                    self.cursor = line_start;
                    PromptEvent::ContentChanged
                })
            }
            TuiEvent::CursorEnd => {
                let line_end = self.buffer[self.cursor..]
                    .find('\n')
                    .map(|i| self.cursor + i)
                    .unwrap_or(self.buffer.len());
                (self.cursor != line_end).then(|| {
                    self.cursor = line_end;
                    PromptEvent::ContentChanged
                })
            }
            TuiEvent::ClearPrompt => {
                self.clear();
                Some(PromptEvent::Cleared)
            }
            TuiEvent::Submit => {
                (!self.buffer.trim().is_empty()).then(|| PromptEvent::Submit(self.buffer.clone()))
            }
            _ => None,
        }
    }
}
