//! # Model Selector
//!
//! Two pieces:
//! - `ModelSelector`: the sidebar card showing the active model.
//! - `ModelPicker`: full-screen overlay listing the catalog, opened with Ctrl+P.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Padding, Paragraph};

use crate::core::catalog::ModelDescriptor;
use crate::tui::component::Component;
use crate::tui::components::picker::{PickerState, centered_rect, truncate_str};
use crate::tui::palette::Palette;

/// Sidebar card: icon, name and provider of the selected model.
pub struct ModelSelector<'a> {
    pub model: Option<&'a ModelDescriptor>,
    pub palette: Palette,
}

impl Component for ModelSelector<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .title(" AI Model ")
            .title_bottom(Line::from(" Ctrl+P ").right_aligned())
            .border_style(self.palette.border(false))
            .title_style(self.palette.title());

        let lines = match self.model {
            Some(model) => {
                let (icon, color) = self.palette.model_icon(model.family());
                vec![
                    Line::from(vec![
                        Span::styled(format!("{icon} "), Style::default().fg(color)),
                        Span::styled(model.name.clone(), self.palette.title()),
                    ]),
                    Line::from(Span::styled(
                        format!("  {}", model.provider),
                        self.palette.muted(),
                    )),
                ]
            }
            None => vec![Line::from(Span::styled(
                "Select Model",
                self.palette.muted(),
            ))],
        };

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

/// Transient render wrapper for the model picker overlay.
pub struct ModelPicker<'a> {
    pub state: &'a mut PickerState<ModelDescriptor>,
    pub current_id: Option<&'a str>,
    pub palette: Palette,
}

impl Component for ModelPicker<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(70, 60, area);
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.palette.border(true))
            .title(" Available Models ")
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" Enter Select  Esc Back ").centered())
            .padding(Padding::horizontal(1))
            .style(self.palette.base());

        let inner_width = overlay.width.saturating_sub(4) as usize;
        let items: Vec<ListItem> = self
            .state
            .items
            .iter()
            .enumerate()
            .map(|(i, model)| {
                let is_active = self.current_id == Some(model.id.as_str());
                let is_highlighted = i == self.state.selected;
                let (icon, color) = self.palette.model_icon(model.family());

                let name_style = if is_highlighted {
                    self.palette
                        .title()
                        .add_modifier(Modifier::REVERSED)
                } else if is_active {
                    Style::default().fg(self.palette.accent)
                } else {
                    Style::default().fg(self.palette.foreground)
                };
                let marker = if is_active { " *" } else { "" };

                let header = Line::from(vec![
                    Span::styled(format!("{icon} "), Style::default().fg(color)),
                    Span::styled(format!("{}{marker}", model.name), name_style),
                    Span::styled(format!("  [{}]", model.provider), self.palette.muted()),
                ]);
                let summary = truncate_str(&model.description, inner_width.saturating_sub(2));
                let description =
                    Line::from(Span::styled(format!("  {summary}"), self.palette.muted()));
                ListItem::new(vec![header, description])
            })
            .collect();

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, overlay, &mut self.state.list_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog;
    use crate::core::theme::Theme;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_selector_shows_model_and_provider() {
        let backend = TestBackend::new(30, 4);
        let mut terminal = Terminal::new(backend).unwrap();
        let model = catalog::find_model("claude-3-opus").unwrap();

        terminal
            .draw(|f| {
                ModelSelector {
                    model: Some(&model),
                    palette: Palette::for_theme(Theme::Dark),
                }
                .render(f, f.area());
            })
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Claude 3 Opus"));
        assert!(text.contains("Anthropic"));
    }

    #[test]
    fn test_selector_without_model() {
        let backend = TestBackend::new(30, 4);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                ModelSelector {
                    model: None,
                    palette: Palette::for_theme(Theme::Light),
                }
                .render(f, f.area());
            })
            .unwrap();
        assert!(buffer_text(&terminal).contains("Select Model"));
    }

    #[test]
    fn test_picker_lists_catalog() {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut state = PickerState::new(catalog::models(), 0);

        terminal
            .draw(|f| {
                ModelPicker {
                    state: &mut state,
                    current_id: Some("gpt-4-turbo"),
                    palette: Palette::for_theme(Theme::Dark),
                }
                .render(f, f.area());
            })
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Available Models"));
        assert!(text.contains("GPT-4 Turbo *"));
        assert!(text.contains("Gemini Pro"));
        assert!(text.contains("Multimodal capabilities"));
    }
}
