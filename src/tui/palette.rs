//! Theme → terminal colors.

use ratatui::style::{Color, Modifier, Style};

use crate::core::catalog::ModelFamily;
use crate::core::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,
    pub accent: Color,
    pub border: Color,
    pub user: Color,
    pub assistant: Color,
    pub warning: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                background: Color::Reset,
                foreground: Color::White,
                muted: Color::DarkGray,
                accent: Color::Magenta,
                border: Color::DarkGray,
                user: Color::Cyan,
                assistant: Color::Green,
                warning: Color::Yellow,
            },
            Theme::Light => Self {
                background: Color::White,
                foreground: Color::Black,
                muted: Color::Gray,
                accent: Color::Blue,
                border: Color::Gray,
                user: Color::Blue,
                assistant: Color::Magenta,
                warning: Color::Red,
            },
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.foreground).bg(self.background)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// Border style for a panel, highlighted when it has focus.
    pub fn border(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.accent)
        } else {
            Style::default().fg(self.border)
        }
    }

    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.foreground)
            .add_modifier(Modifier::BOLD)
    }

    /// Icon glyph and color for a model family.
    pub fn model_icon(&self, family: ModelFamily) -> (&'static str, Color) {
        match family {
            ModelFamily::Reasoning => ("◆", Color::Magenta),
            ModelFamily::Fast => ("»", Color::Blue),
            ModelFamily::Analytic => ("✦", Color::LightMagenta),
            ModelFamily::Multimodal => ("◎", Color::LightBlue),
            ModelFamily::Other => ("•", self.muted),
        }
    }
}
