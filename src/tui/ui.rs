//! Top-level screen layout.
//!
//! ```text
//! ┌ header ───────────────────────────────────────────────┐
//! │ ┌ AI Model ┐ ┌ Prompt Editor ───────────────────────┐ │
//! │ │          │ └──────────────────────────────────────┘ │
//! │ ┌ Params ──┐ ┌ Conversation ────────────────────────┐ │
//! │ │          │ │                                      │ │
//! │ └──────────┘ └──────────────────────────────────────┘ │
//! └ key hints ────────────────────────────────────────────┘
//! ```
//!
//! Below `WIDE_LAYOUT_MIN_WIDTH` columns the sidebar collapses: the model card
//! sits above the editor and the parameters panel is hidden.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::prompt_editor::EDITOR_HEIGHT;
use crate::tui::components::{
    Header, ModelPicker, ModelSelector, ParametersPanel, ParametersPanelState, TemplatePicker,
    Transcript,
};
use crate::tui::palette::Palette;
use crate::tui::{Focus, Overlay, TuiState};

pub const WIDE_LAYOUT_MIN_WIDTH: u16 = 72;
const SIDEBAR_WIDTH: u16 = 34;
const MODEL_CARD_HEIGHT: u16 = 4;

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};

    let palette = Palette::for_theme(app.theme.theme());
    frame.render_widget(Block::default().style(palette.base()), frame.area());

    let [header_area, body_area, hints_area] =
        Layout::vertical([Length(1), Min(0), Length(1)]).areas(frame.area());

    Header::new(app.status_message.clone(), app.theme.theme()).render(frame, header_area);

    tui.show_parameters = body_area.width >= WIDE_LAYOUT_MIN_WIDTH;
    if !tui.show_parameters && tui.focus == Focus::Parameters {
        tui.focus = Focus::Prompt;
    }

    let (model_area, params_area, main_area) = if tui.show_parameters {
        let [sidebar, main] =
            Layout::horizontal([Length(SIDEBAR_WIDTH), Min(0)]).areas(body_area);
        let [model_area, params_area, _] = Layout::vertical([
            Length(MODEL_CARD_HEIGHT),
            Length(ParametersPanelState::required_height()),
            Min(0),
        ])
        .areas(sidebar);
        (model_area, Some(params_area), main)
    } else {
        let [model_area, main] =
            Layout::vertical([Length(MODEL_CARD_HEIGHT), Min(0)]).areas(body_area);
        (model_area, None, main)
    };

    ModelSelector {
        model: app.session.selected_model(),
        palette,
    }
    .render(frame, model_area);

    if let Some(area) = params_area {
        ParametersPanel {
            state: &tui.parameters,
            parameters: app.session.parameters(),
            focused: tui.focus == Focus::Parameters && tui.overlay.is_none(),
            palette,
        }
        .render(frame, area);
    }

    let [editor_area, transcript_area] =
        Layout::vertical([Length(EDITOR_HEIGHT), Min(0)]).areas(main_area);

    let editor = &mut tui.prompt_editor;
    editor.disabled = app.session.is_loading();
    editor.focused = tui.focus == Focus::Prompt && tui.overlay.is_none();
    editor.template_name = app.session.selected_template().map(|t| t.name.clone());
    editor.spinner_frame = tui.spinner_frame;
    editor.palette = palette;
    editor.render(frame, editor_area);

    Transcript {
        state: &mut tui.transcript,
        messages: app.session.messages(),
        is_loading: app.session.is_loading(),
        spinner_frame: tui.spinner_frame,
        focused: tui.focus == Focus::Transcript && tui.overlay.is_none(),
        palette,
    }
    .render(frame, transcript_area);

    frame.render_widget(key_hints(tui, palette), hints_area);

    match &mut tui.overlay {
        Some(Overlay::Models(state)) => ModelPicker {
            state,
            current_id: app.session.selected_model().map(|m| m.id.as_str()),
            palette,
        }
        .render(frame, frame.area()),
        Some(Overlay::Templates(state)) => {
            TemplatePicker { state, palette }.render(frame, frame.area())
        }
        None => {}
    }
}

fn key_hints(tui: &TuiState, palette: Palette) -> Paragraph<'static> {
    let focus_hint = match tui.focus {
        Focus::Prompt => "Enter send",
        Focus::Parameters => "←→ adjust",
        Focus::Transcript => "↑↓ select · y copy",
    };
    let pairs = [
        ("Tab", "focus"),
        ("Ctrl+P", "model"),
        ("Ctrl+T", "templates"),
        ("Ctrl+D", "theme"),
        ("Esc", "cancel"),
        ("Ctrl+C", "quit"),
    ];

    let mut spans = vec![Span::styled(format!(" {focus_hint}"), palette.title())];
    for (key, label) in pairs {
        spans.push(Span::styled("  ", palette.muted()));
        spans.push(Span::styled(key, palette.title()));
        spans.push(Span::styled(format!(" {label}"), palette.muted()));
    }
    Paragraph::new(Line::from(spans))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog;
    use crate::core::message::Role;
    use crate::test_support::test_app;
    use crate::tui::components::PickerState;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(app: &App, tui: &mut TuiState, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw_ui(f, app, tui)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_wide_layout_shows_every_panel() {
        let app = test_app();
        let mut tui = TuiState::new(app.theme.theme());
        let text = draw(&app, &mut tui, 120, 40);
        assert!(tui.show_parameters);
        assert!(text.contains("IntelliSync"));
        assert!(text.contains("AI Model"));
        assert!(text.contains("GPT-4 Turbo"));
        assert!(text.contains("Parameters"));
        assert!(text.contains("Prompt Editor"));
        assert!(text.contains("Conversation (0)"));
    }

    #[test]
    fn test_parameters_panel_sized_to_knobs() {
        let app = test_app();
        let mut tui = TuiState::new(app.theme.theme());
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| draw_ui(f, &app, &mut tui)).unwrap();
        let buffer = terminal.backend().buffer();

        // Header row and model card sit above the panel.
        let bottom = 1 + MODEL_CARD_HEIGHT + ParametersPanelState::required_height() - 1;
        assert_eq!(buffer[(0, bottom)].symbol(), "└");
        assert_eq!(buffer[(0, bottom + 1)].symbol(), " ");
        // Label row of the last knob: label, bar, description, spacer, then one spare row.
        let last_knob_row: String = (0..SIDEBAR_WIDTH)
            .map(|x| buffer[(x, bottom - 5)].symbol())
            .collect();
        assert!(last_knob_row.contains("Frequency Penalty"), "{last_knob_row}");
    }

    #[test]
    fn test_narrow_layout_hides_parameters() {
        let app = test_app();
        let mut tui = TuiState::new(app.theme.theme());
        tui.focus = Focus::Parameters;
        let text = draw(&app, &mut tui, 60, 30);
        assert!(!tui.show_parameters);
        assert!(!text.contains("Parameters"));
        assert_eq!(tui.focus, Focus::Prompt);
    }

    #[test]
    fn test_conversation_and_thinking() {
        let mut app = test_app();
        app.session.add_message(Role::User, "What is Rust?");
        app.session.begin_request();
        let mut tui = TuiState::new(app.theme.theme());
        let text = draw(&app, &mut tui, 120, 40);
        assert!(text.contains("What is Rust?"));
        assert!(text.contains("AI is thinking..."));
        assert!(text.contains("Thinking..."));
    }

    #[test]
    fn test_model_overlay_drawn_on_top() {
        let app = test_app();
        let mut tui = TuiState::new(app.theme.theme());
        tui.overlay = Some(Overlay::Models(PickerState::new(catalog::models(), 0)));
        let text = draw(&app, &mut tui, 120, 40);
        assert!(text.contains("Available Models"));
    }
}
