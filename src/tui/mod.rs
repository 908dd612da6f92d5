//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Routing
//!
//! 1. An open overlay (model or template picker) gets every event.
//! 2. Global shortcuts (Ctrl+P, Ctrl+T, Ctrl+E, ...) and focus changes.
//! 3. Everything else goes to the focused panel.
//!
//! Panels emit their own events, which `route_event` turns into a
//! [`UiCommand`]. Commands become `Action`s for `update()`, and the returned
//! `Effect` is carried out by [`EffectRunner`].
//!
//! ## Redraw Strategy
//!
//! While a reply is pending the loop redraws every ~80ms to animate the
//! spinner. Otherwise it sleeps up to 500ms and redraws only on events.

mod component;
mod components;
mod event;
mod palette;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use chrono::Utc;
use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use tokio::task::AbortHandle;

use crate::core::action::{Action, Effect, update};
use crate::core::catalog::{self, ModelDescriptor, PromptTemplate};
use crate::core::clipboard::{ClipboardSink, SystemClipboard};
use crate::core::config::ResolvedConfig;
use crate::core::responder::spawn_response;
use crate::core::state::App;
use crate::core::theme::Theme;
use crate::core::transcript::{self, ShareOutcome};
use crate::tui::component::EventHandler;
use crate::tui::components::{
    ParametersPanelState, PickerEvent, PickerState, PromptEditor, PromptEvent, TranscriptEvent,
    TranscriptState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::palette::Palette;

const ANIMATION_TICK: Duration = Duration::from_millis(80);
const IDLE_TICK: Duration = Duration::from_millis(500);

/// Which panel receives keys that are not global shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Prompt,
    Parameters,
    Transcript,
}

/// Full-screen picker drawn over the main layout.
pub enum Overlay {
    Models(PickerState<ModelDescriptor>),
    Templates(PickerState<PromptTemplate>),
}

/// TUI-specific presentation state (not part of core state)
pub struct TuiState {
    pub focus: Focus,
    pub prompt_editor: PromptEditor,
    pub parameters: ParametersPanelState,
    pub transcript: TranscriptState,
    pub overlay: Option<Overlay>,
    pub spinner_frame: usize,
    /// Set by the layout pass: false when the terminal is too narrow for the sidebar.
    pub show_parameters: bool,
}

impl TuiState {
    pub fn new(theme: Theme) -> Self {
        Self {
            focus: Focus::Prompt,
            prompt_editor: PromptEditor::new(Palette::for_theme(theme)),
            parameters: ParametersPanelState::default(),
            transcript: TranscriptState::new(),
            overlay: None,
            spinner_frame: 0,
            show_parameters: true,
        }
    }

    fn cycle_focus(&mut self, forward: bool) {
        let order: &[Focus] = if self.show_parameters {
            &[Focus::Prompt, Focus::Parameters, Focus::Transcript]
        } else {
            &[Focus::Prompt, Focus::Transcript]
        };
        let current = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = if forward {
            (current + 1) % order.len()
        } else {
            (current + order.len() - 1) % order.len()
        };
        self.focus = order[next];
    }
}

/// What the loop should do in response to one terminal event.
#[derive(Debug, Clone, PartialEq)]
pub enum UiCommand {
    Dispatch(Action),
    /// Copy one transcript message to the clipboard.
    CopyMessage(usize),
}

enum OverlayOutcome {
    Model(ModelDescriptor),
    Template(PromptTemplate),
    Close,
}

/// Translate a terminal event into at most one command, updating
/// presentation state along the way.
pub fn route_event(app: &App, tui: &mut TuiState, event: TuiEvent) -> Option<UiCommand> {
    use UiCommand::Dispatch;

    match event {
        TuiEvent::Resize => return None,
        TuiEvent::ForceQuit => return Some(Dispatch(Action::Quit)),
        _ => {}
    }

    if tui.overlay.is_some() {
        let outcome = match &mut tui.overlay {
            Some(Overlay::Models(state)) => state.handle_event(&event).map(|e| match e {
                PickerEvent::Select(model) => OverlayOutcome::Model(model),
                PickerEvent::Dismiss => OverlayOutcome::Close,
            }),
            Some(Overlay::Templates(state)) => state.handle_event(&event).map(|e| match e {
                PickerEvent::Select(template) => OverlayOutcome::Template(template),
                PickerEvent::Dismiss => OverlayOutcome::Close,
            }),
            None => None,
        };
        return match outcome? {
            OverlayOutcome::Model(model) => {
                tui.overlay = None;
                Some(Dispatch(Action::SelectModel(model)))
            }
            OverlayOutcome::Template(template) => {
                tui.overlay = None;
                tui.prompt_editor.set_text(&template.content);
                tui.focus = Focus::Prompt;
                Some(Dispatch(Action::SelectTemplate(Some(template))))
            }
            OverlayOutcome::Close => {
                tui.overlay = None;
                None
            }
        };
    }

    let has_messages = !app.session.messages().is_empty();
    match event {
        TuiEvent::OpenModelPicker => {
            let models = catalog::models();
            let current = app
                .session
                .selected_model()
                .and_then(|m| models.iter().position(|c| c.id == m.id))
                .unwrap_or(0);
            tui.overlay = Some(Overlay::Models(PickerState::new(models, current)));
            return None;
        }
        TuiEvent::OpenTemplates => {
            if app.session.is_loading() {
                return None;
            }
            let templates = app.session.templates().to_vec();
            let current = app
                .session
                .selected_template()
                .and_then(|t| templates.iter().position(|c| c.id == t.id))
                .unwrap_or(0);
            tui.overlay = Some(Overlay::Templates(PickerState::new(templates, current)));
            return None;
        }
        TuiEvent::ClearConversation => {
            return has_messages.then_some(Dispatch(Action::ClearMessages));
        }
        TuiEvent::Export => return has_messages.then_some(Dispatch(Action::ExportTranscript)),
        TuiEvent::Share => return has_messages.then_some(Dispatch(Action::ShareTranscript)),
        TuiEvent::ToggleTheme => return Some(Dispatch(Action::ToggleTheme)),
        TuiEvent::FocusNext => {
            tui.cycle_focus(true);
            return None;
        }
        TuiEvent::FocusPrev => {
            tui.cycle_focus(false);
            return None;
        }
        TuiEvent::Escape if app.session.is_loading() => {
            return Some(Dispatch(Action::CancelGeneration));
        }
        TuiEvent::Escape => {
            tui.focus = Focus::Prompt;
            return None;
        }
        _ => {}
    }

    // Mouse wheel always scrolls the conversation.
    if matches!(event, TuiEvent::ScrollUp | TuiEvent::ScrollDown) {
        tui.transcript.handle_event(&event);
        return None;
    }

    match tui.focus {
        Focus::Prompt => {
            if matches!(event, TuiEvent::ScrollPageUp | TuiEvent::ScrollPageDown) {
                tui.transcript.handle_event(&event);
                return None;
            }
            match tui.prompt_editor.handle_event(&event)? {
                PromptEvent::Submit(text) => Some(Dispatch(Action::Submit(text))),
                PromptEvent::Cleared => app
                    .session
                    .selected_template()
                    .is_some()
                    .then_some(Dispatch(Action::SelectTemplate(None))),
                PromptEvent::ContentChanged => None,
            }
        }
        Focus::Parameters => match event {
            TuiEvent::InputChar(c) if c != '+' && c != '-' => retarget_to_prompt(app, tui, event),
            TuiEvent::Paste(_) => retarget_to_prompt(app, tui, event),
            _ => {
                let change = tui.parameters.handle_event(&event)?;
                Some(Dispatch(Action::SetParameters(
                    change.resolve(app.session.parameters()),
                )))
            }
        },
        Focus::Transcript => match event {
            TuiEvent::InputChar(c) if c != 'y' => retarget_to_prompt(app, tui, event),
            TuiEvent::Paste(_) => retarget_to_prompt(app, tui, event),
            TuiEvent::Submit => {
                tui.focus = Focus::Prompt;
                None
            }
            _ => match tui.transcript.handle_event(&event)? {
                TranscriptEvent::Copy(index) => Some(UiCommand::CopyMessage(index)),
            },
        },
    }
}

/// Typing outside the editor moves focus back to it and keeps the keystroke.
fn retarget_to_prompt(app: &App, tui: &mut TuiState, event: TuiEvent) -> Option<UiCommand> {
    tui.focus = Focus::Prompt;
    tui.transcript.selected = None;
    route_event(app, tui, event)
}

/// Performs the I/O behind each `Effect`.
pub struct EffectRunner {
    tx: mpsc::Sender<Action>,
    active_response: Option<AbortHandle>,
    clipboard: Box<dyn ClipboardSink>,
}

impl EffectRunner {
    pub fn new(tx: mpsc::Sender<Action>, clipboard: Box<dyn ClipboardSink>) -> Self {
        Self {
            tx,
            active_response: None,
            clipboard,
        }
    }

    /// Run `action` through `update` and carry out its effect.
    /// Returns true when the app should quit.
    pub fn dispatch(&mut self, app: &mut App, tui: &mut TuiState, action: Action) -> bool {
        debug!("Dispatching {:?}", action);
        let clears = matches!(action, Action::ClearMessages);
        let effect = update(app, action);
        if clears {
            tui.transcript.reset();
        }
        self.apply(app, tui, effect)
    }

    pub fn execute(&mut self, app: &mut App, tui: &mut TuiState, command: UiCommand) -> bool {
        match command {
            UiCommand::Dispatch(action) => self.dispatch(app, tui, action),
            UiCommand::CopyMessage(index) => {
                self.copy_message(app, index);
                false
            }
        }
    }

    fn apply(&mut self, app: &mut App, tui: &mut TuiState, effect: Effect) -> bool {
        match effect {
            Effect::None => {}
            Effect::ScheduleResponse { token, prompt } => {
                tui.prompt_editor.clear();
                let handle = spawn_response(token, prompt, app.response_delay, self.tx.clone());
                self.active_response = Some(handle.abort_handle());
            }
            Effect::AbortResponse => {
                if let Some(handle) = self.active_response.take() {
                    handle.abort();
                }
            }
            Effect::ExportTranscript => {
                match transcript::export_transcript(
                    app.session.messages(),
                    &app.export_dir,
                    Utc::now(),
                ) {
                    Ok(path) => {
                        info!("Exported transcript to {}", path.display());
                        app.status_message = format!("Exported to {}", path.display());
                    }
                    Err(e) => {
                        warn!("Transcript export failed: {}", e);
                        app.status_message = format!("Export failed: {}", e);
                    }
                }
            }
            Effect::ShareTranscript => {
                let messages = app.session.messages();
                let outcome = transcript::share_transcript(messages, None, self.clipboard.as_mut());
                info!("Share outcome: {:?}", outcome);
                if outcome == ShareOutcome::CopiedToClipboard {
                    app.status_message = String::from("Transcript copied to clipboard");
                }
            }
            Effect::Quit => return true,
        }
        false
    }

    fn copy_message(&mut self, app: &mut App, index: usize) {
        let Some(message) = app.session.messages().get(index) else {
            return;
        };
        match self.clipboard.write_text(&message.content) {
            Ok(()) => app.status_message = String::from("Copied to clipboard"),
            Err(e) => {
                warn!("Copy failed: {}", e);
                app.status_message = String::from("Clipboard unavailable");
            }
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste);
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let mut app = App::from_config(&config);
    let mut tui = TuiState::new(app.theme.theme());

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let mut runner = EffectRunner::new(tx, Box::new(SystemClipboard));

    let start_time = Instant::now();
    let mut needs_redraw = true;

    'main: loop {
        let animating = app.session.is_loading();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            tui.spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let timeout = if animating { ANIMATION_TICK } else { IDLE_TICK };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain all pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if let Some(command) = route_event(&app, &mut tui, event)
                && runner.execute(&mut app, &mut tui, command)
            {
                break 'main;
            }
        }

        // Replies from the responder task
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            if runner.dispatch(&mut app, &mut tui, action) {
                break 'main;
            }
        }
    }

    info!("Shutting down");
    ratatui::restore();
    Ok(())
}
