//! Prompt template overlay, opened with Ctrl+T. Selecting a template loads
//! its body into the prompt editor.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Padding};

use crate::core::catalog::PromptTemplate;
use crate::tui::component::Component;
use crate::tui::components::picker::{PickerState, centered_rect};
use crate::tui::palette::Palette;

pub struct TemplatePicker<'a> {
    pub state: &'a mut PickerState<PromptTemplate>,
    pub palette: Palette,
}

impl Component for TemplatePicker<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(60, 50, area);
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.palette.border(true))
            .title(" Prompt Templates ")
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" Enter Use  Esc Back ").centered())
            .padding(Padding::horizontal(1))
            .style(self.palette.base());

        let items: Vec<ListItem> = self
            .state
            .items
            .iter()
            .enumerate()
            .map(|(i, template)| {
                let style = if i == self.state.selected {
                    self.palette.title().add_modifier(Modifier::REVERSED)
                } else {
                    Style::default().fg(self.palette.foreground)
                };
                ListItem::new(vec![
                    Line::from(Span::styled(template.name.clone(), style)),
                    Line::from(Span::styled(
                        format!("  {}", template.category),
                        self.palette.muted(),
                    )),
                ])
            })
            .collect();

        frame.render_stateful_widget(
            List::new(items).block(block),
            overlay,
            &mut self.state.list_state,
        );
    }
}
