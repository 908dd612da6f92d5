//! # Header Component
//!
//! Top bar: product name on the left, status message and theme on the right.
//!
//! Stateless: all data arrives as props.
//!
//! ```text
//! ◆ IntelliSync  AI Interface Platform            Thinking... │ ☾ dark
//! ```
//!
//! When the bar is too narrow for both halves, the tagline is dropped
//! first, then the status message.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::core::theme::Theme;
use crate::tui::component::Component;
use crate::tui::palette::Palette;

pub struct Header {
    pub status_message: String,
    pub theme: Theme,
}

impl Header {
    pub fn new(status_message: String, theme: Theme) -> Self {
        Self {
            status_message,
            theme,
        }
    }

    fn theme_badge(&self) -> String {
        match self.theme {
            Theme::Dark => "☾ dark".to_string(),
            Theme::Light => "☀ light".to_string(),
        }
    }
}

impl Component for Header {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let palette = Palette::for_theme(self.theme);
        let width = area.width as usize;

        let brand = Span::styled(
            "◆ IntelliSync",
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        );
        let tagline = Span::styled("  AI Interface Platform", palette.muted());

        let badge = self.theme_badge();
        let right = if self.status_message.is_empty() {
            badge
        } else {
            format!("{} │ {}", self.status_message, badge)
        };

        let brand_width = brand.content.width();
        let tagline_width = tagline.content.width();

        let mut spans = vec![brand];
        let (right, used) = if brand_width + tagline_width + right.width() < width {
            spans.push(tagline);
            (right, brand_width + tagline_width)
        } else if brand_width + right.width() < width {
            (right, brand_width)
        } else {
            let badge = self.theme_badge();
            let used = brand_width;
            (badge, used)
        };

        let gap = width.saturating_sub(used + right.width());
        spans.push(Span::raw(" ".repeat(gap)));
        spans.push(Span::styled(right, Style::default().fg(palette.foreground)));

        frame.render_widget(
            Paragraph::new(Line::from(spans)).style(palette.base()),
            area,
        );
    }
}
