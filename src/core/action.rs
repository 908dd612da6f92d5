//! # Actions
//!
//! Everything that can happen in IntelliSync becomes an `Action`.
//! User presses Enter? That's `Action::Submit(prompt)`.
//! The simulated reply lands? That's `Action::ResponseReady { .. }`.
//!
//! `update()` applies an action to the state and returns an `Effect`
//! describing any I/O the adapter should perform. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info};

use crate::core::catalog::{ModelDescriptor, PromptTemplate};
use crate::core::message::Role;
use crate::core::params::ParameterPatch;
use crate::core::state::{App, RequestToken};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SelectModel(ModelDescriptor),
    SetParameters(ParameterPatch),
    SelectTemplate(Option<PromptTemplate>),
    Submit(String),
    ResponseReady { token: RequestToken, content: String },
    CancelGeneration,
    ClearMessages,
    ExportTranscript,
    ShareTranscript,
    ToggleTheme,
    Quit,
}

/// Side effects requested by `update`, performed by the adapter.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Start the delayed reply for this request.
    ScheduleResponse { token: RequestToken, prompt: String },
    /// Abort whatever task serves the cancelled request.
    AbortResponse,
    ExportTranscript,
    ShareTranscript,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::SelectModel(model) => {
            app.status_message = format!("Model: {}", model.name);
            app.session.set_selected_model(model);
            Effect::None
        }
        Action::SetParameters(patch) => {
            app.session.set_parameters(&patch);
            Effect::None
        }
        Action::SelectTemplate(template) => {
            if let Some(t) = &template {
                app.status_message = format!("Template: {}", t.name);
            }
            app.session.set_selected_template(template);
            Effect::None
        }
        Action::Submit(prompt) => {
            if prompt.trim().is_empty() || app.session.is_loading() {
                return Effect::None;
            }
            app.session.add_message(Role::User, prompt.clone());
            let token = app.session.begin_request();
            app.status_message = String::from("Thinking...");
            info!("Submitted prompt as request {}", token.id());
            Effect::ScheduleResponse { token, prompt }
        }
        Action::ResponseReady { token, content } => {
            if !app.session.complete_request(token) {
                debug!("Dropping stale reply for request {}", token.id());
                return Effect::None;
            }
            app.session.add_message(Role::Assistant, content);
            app.status_message.clear();
            Effect::None
        }
        Action::CancelGeneration => match app.session.cancel_request() {
            Some(token) => {
                info!("Cancelled request {}", token.id());
                app.status_message = String::from("Cancelled");
                Effect::AbortResponse
            }
            None => Effect::None,
        },
        Action::ClearMessages => {
            app.session.clear_messages();
            app.status_message = String::from("Conversation cleared");
            Effect::None
        }
        Action::ExportTranscript => {
            if app.session.messages().is_empty() {
                Effect::None
            } else {
                Effect::ExportTranscript
            }
        }
        Action::ShareTranscript => {
            if app.session.messages().is_empty() {
                Effect::None
            } else {
                Effect::ShareTranscript
            }
        }
        Action::ToggleTheme => {
            let theme = app.theme.toggle();
            app.status_message = format!("Theme: {}", theme.label());
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog;
    use crate::core::responder::simulated_reply;
    use crate::core::theme::Theme;
    use crate::test_support::test_app;

    fn submit(app: &mut App, prompt: &str) -> Effect {
        update(app, Action::Submit(prompt.to_string()))
    }

    #[test]
    fn test_submit_empty_is_noop() {
        let mut app = test_app();
        for prompt in ["", "   ", "\n\t "] {
            assert_eq!(submit(&mut app, prompt), Effect::None);
        }
        assert!(app.session.messages().is_empty());
        assert!(!app.session.is_loading());
    }

    #[test]
    fn test_submit_appends_user_message_and_schedules() {
        let mut app = test_app();
        let effect = submit(&mut app, "  Hello there  ");

        let token = match effect {
            Effect::ScheduleResponse { token, prompt } => {
                assert_eq!(prompt, "  Hello there  ");
                token
            }
            other => panic!("Expected ScheduleResponse, got {:?}", other),
        };
        assert_eq!(app.session.messages().len(), 1);
        assert_eq!(app.session.messages()[0].role, Role::User);
        assert_eq!(app.session.messages()[0].content, "  Hello there  ");
        assert!(app.session.is_loading());
        assert_eq!(app.session.pending_request(), Some(token));
    }

    #[test]
    fn test_submit_while_loading_is_noop() {
        let mut app = test_app();
        submit(&mut app, "first");
        assert_eq!(submit(&mut app, "second"), Effect::None);
        assert_eq!(app.session.messages().len(), 1);
    }

    #[test]
    fn test_full_round_trip_adds_two_messages() {
        let mut app = test_app();
        let Effect::ScheduleResponse { token, prompt } = submit(&mut app, "Explain Rust") else {
            panic!("expected a scheduled response");
        };
        let effect = update(
            &mut app,
            Action::ResponseReady {
                token,
                content: simulated_reply(&prompt),
            },
        );
        assert_eq!(effect, Effect::None);
        assert!(!app.session.is_loading());

        let messages = app.session.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].role, Role::Assistant);
        assert_eq!(
            messages[1].content,
            "This is a simulated response to: \"Explain Rust...\""
        );
    }

    #[test]
    fn test_stale_reply_is_dropped() {
        let mut app = test_app();
        let Effect::ScheduleResponse { token: old, .. } = submit(&mut app, "one") else {
            panic!("expected a scheduled response");
        };
        assert_eq!(update(&mut app, Action::CancelGeneration), Effect::AbortResponse);
        let Effect::ScheduleResponse { token: new, .. } = submit(&mut app, "two") else {
            panic!("expected a scheduled response");
        };

        update(
            &mut app,
            Action::ResponseReady {
                token: old,
                content: "late".to_string(),
            },
        );
        assert_eq!(app.session.messages().len(), 2);
        assert!(app.session.is_loading());

        update(
            &mut app,
            Action::ResponseReady {
                token: new,
                content: "on time".to_string(),
            },
        );
        assert_eq!(app.session.messages().len(), 3);
        assert_eq!(app.session.messages()[2].content, "on time");
        assert!(!app.session.is_loading());
    }

    #[test]
    fn test_cancel_when_idle_is_noop() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::CancelGeneration), Effect::None);
    }

    #[test]
    fn test_export_and_share_require_messages() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::ExportTranscript), Effect::None);
        assert_eq!(update(&mut app, Action::ShareTranscript), Effect::None);

        app.session.add_message(Role::User, "hi");
        assert_eq!(
            update(&mut app, Action::ExportTranscript),
            Effect::ExportTranscript
        );
        assert_eq!(
            update(&mut app, Action::ShareTranscript),
            Effect::ShareTranscript
        );
    }

    #[test]
    fn test_clear_messages() {
        let mut app = test_app();
        app.session.add_message(Role::User, "hi");
        app.session.add_message(Role::Assistant, "hello");
        update(&mut app, Action::ClearMessages);
        assert!(app.session.messages().is_empty());
    }

    #[test]
    fn test_select_model_and_template() {
        let mut app = test_app();
        let model = catalog::find_model("gemini-pro").unwrap();
        update(&mut app, Action::SelectModel(model.clone()));
        assert_eq!(app.session.selected_model(), Some(&model));

        let template = catalog::templates()[1].clone();
        update(&mut app, Action::SelectTemplate(Some(template.clone())));
        assert_eq!(app.session.selected_template(), Some(&template));
        assert!(app.session.messages().is_empty());

        update(&mut app, Action::SelectTemplate(None));
        assert!(app.session.selected_template().is_none());
    }

    #[test]
    fn test_set_parameters_action() {
        let mut app = test_app();
        update(
            &mut app,
            Action::SetParameters(ParameterPatch {
                frequency_penalty: Some(1.5),
                ..Default::default()
            }),
        );
        assert_eq!(app.session.parameters().frequency_penalty, 1.5);
        assert_eq!(app.session.parameters().temperature, 0.7);
    }

    #[test]
    fn test_toggle_theme_and_quit() {
        let mut app = test_app();
        let before = app.theme.theme();
        update(&mut app, Action::ToggleTheme);
        assert_eq!(app.theme.theme(), before.opposite());
        assert!(matches!(app.theme.theme(), Theme::Light | Theme::Dark));
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
