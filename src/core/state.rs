//! # Application State
//!
//! Core business state for IntelliSync. Domain logic only, no TUI types.
//! Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── session: SessionState           // the shared session holder
//! │   ├── selected_model              // Option<ModelDescriptor>
//! │   ├── parameters                  // GenerationParameters
//! │   ├── messages                    // append-only until clear
//! │   ├── templates                   // built-in catalog
//! │   ├── selected_template           // Option<PromptTemplate>
//! │   └── pending: Option<RequestToken> // "loading" iff Some
//! ├── theme: ThemeState               // light / dark
//! ├── status_message: String          // status line text
//! ├── response_delay: Duration        // simulated reply delay
//! └── export_dir: PathBuf             // where exports are written
//! ```
//!
//! The `App` is built once by the adapter and handed to every consumer by
//! reference. State changes go through `update(app, action)` in action.rs.

use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{debug, warn};

use crate::core::catalog::{self, ModelDescriptor, PromptTemplate};
use crate::core::config::ResolvedConfig;
use crate::core::message::{ChatMessage, Role};
use crate::core::params::{GenerationParameters, ParameterPatch};
use crate::core::theme::ThemeState;

/// Delay before the simulated assistant reply lands.
pub const DEFAULT_RESPONSE_DELAY: Duration = Duration::from_millis(2000);

/// Identifies one outstanding request. Issued from a generation counter, so
/// a completion carrying an older token can be told apart from the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Single source of truth for everything the panels read and write.
#[derive(Debug, Clone)]
pub struct SessionState {
    selected_model: Option<ModelDescriptor>,
    parameters: GenerationParameters,
    messages: Vec<ChatMessage>,
    templates: Vec<PromptTemplate>,
    selected_template: Option<PromptTemplate>,
    pending: Option<RequestToken>,
    next_request: u64,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            selected_model: None,
            parameters: GenerationParameters::default(),
            messages: Vec::new(),
            templates: catalog::templates(),
            selected_template: None,
            pending: None,
            next_request: 0,
        }
    }

    pub fn selected_model(&self) -> Option<&ModelDescriptor> {
        self.selected_model.as_ref()
    }

    /// Replace the selected model. Not checked against the catalog.
    pub fn set_selected_model(&mut self, model: ModelDescriptor) {
        debug!("Selected model: {}", model.id);
        self.selected_model = Some(model);
    }

    pub fn parameters(&self) -> &GenerationParameters {
        &self.parameters
    }

    /// Merge a partial update. Values are stored as given, without clamping.
    pub fn set_parameters(&mut self, patch: &ParameterPatch) {
        self.parameters.apply(patch);
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Append a message with a fresh id and the current time.
    pub fn add_message(&mut self, role: Role, content: impl Into<String>) -> &ChatMessage {
        self.add_message_at(role, content, Utc::now())
    }

    /// Append a message stamped with `now`.
    ///
    /// Timestamps never go backwards within the list, even if the wall
    /// clock does: an earlier `now` reuses the previous message's time.
    pub fn add_message_at(
        &mut self,
        role: Role,
        content: impl Into<String>,
        now: DateTime<Utc>,
    ) -> &ChatMessage {
        let timestamp = match self.messages.last() {
            Some(last) if last.timestamp > now => last.timestamp,
            _ => now,
        };
        self.messages.push(ChatMessage {
            id: uuid::Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            timestamp,
        });
        &self.messages[self.messages.len() - 1]
    }

    pub fn clear_messages(&mut self) {
        debug!("Clearing {} messages", self.messages.len());
        self.messages.clear();
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Manual loading toggle. `true` opens a request unless one is already
    /// pending; `false` drops the pending request.
    pub fn set_is_loading(&mut self, loading: bool) {
        if loading {
            if self.pending.is_none() {
                self.begin_request();
            }
        } else {
            self.cancel_request();
        }
    }

    /// Open a new request, superseding any pending one.
    pub fn begin_request(&mut self) -> RequestToken {
        self.next_request += 1;
        let token = RequestToken(self.next_request);
        if let Some(previous) = self.pending.replace(token) {
            warn!(
                "Request {} superseded by {} before completing",
                previous.id(),
                token.id()
            );
        }
        token
    }

    /// Close the request if `token` is the current one. Returns false for
    /// stale or unknown tokens, which leave the state untouched.
    pub fn complete_request(&mut self, token: RequestToken) -> bool {
        if self.pending == Some(token) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub fn cancel_request(&mut self) -> Option<RequestToken> {
        self.pending.take()
    }

    pub fn pending_request(&self) -> Option<RequestToken> {
        self.pending
    }

    pub fn templates(&self) -> &[PromptTemplate] {
        &self.templates
    }

    pub fn selected_template(&self) -> Option<&PromptTemplate> {
        self.selected_template.as_ref()
    }

    /// Record the active template. Does not touch the transcript.
    pub fn set_selected_template(&mut self, template: Option<PromptTemplate>) {
        self.selected_template = template;
    }
}

pub struct App {
    pub session: SessionState,
    pub theme: ThemeState,
    pub status_message: String,
    pub response_delay: Duration,
    pub export_dir: PathBuf,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Fresh state with the first catalog model selected.
    pub fn new() -> Self {
        let mut session = SessionState::new();
        if let Some(first) = catalog::models().into_iter().next() {
            session.set_selected_model(first);
        }
        Self {
            session,
            theme: ThemeState::default(),
            status_message: String::from("Welcome to IntelliSync!"),
            response_delay: DEFAULT_RESPONSE_DELAY,
            export_dir: PathBuf::from("."),
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        let mut app = Self::new();
        match catalog::find_model(&config.model_id) {
            Some(model) => app.session.set_selected_model(model),
            None => warn!(
                "Unknown model '{}', keeping the catalog default",
                config.model_id
            ),
        }
        app.session.set_parameters(&config.parameters);
        for knob in app.session.parameters().out_of_range() {
            warn!(
                "Configured {} is outside {}..={}",
                knob.spec().label,
                knob.spec().min,
                knob.spec().max
            );
        }
        app.theme = ThemeState::new(config.theme);
        app.response_delay = config.response_delay;
        app.export_dir = config.export_dir.clone();
        app
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::params::ParameterPatch;
    use crate::core::theme::Theme;
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.status_message, "Welcome to IntelliSync!");
        assert!(!app.session.is_loading());
        assert!(app.session.messages().is_empty());
        assert_eq!(app.session.selected_model().unwrap().id, "gpt-4-turbo");
        assert_eq!(app.session.templates().len(), 3);
        assert!(app.session.selected_template().is_none());
    }

    #[test]
    fn test_add_message_preserves_order_and_time() {
        let mut session = SessionState::new();
        for i in 0..20 {
            let role = if i % 2 == 0 { Role::User } else { Role::Assistant };
            session.add_message(role, format!("message {i}"));
        }
        let messages = session.messages();
        assert_eq!(messages.len(), 20);
        for (i, msg) in messages.iter().enumerate() {
            assert_eq!(msg.content, format!("message {i}"));
        }
        for pair in messages.windows(2) {
            assert!(pair[0].timestamp <= pair[1].timestamp);
            assert_ne!(pair[0].id, pair[1].id);
        }
    }

    #[test]
    fn test_clock_going_backwards_keeps_order() {
        let mut session = SessionState::new();
        let later = Utc::now();
        let earlier = later - chrono::Duration::seconds(30);

        let first = session.add_message_at(Role::User, "first", later).timestamp;
        let second = session
            .add_message_at(Role::Assistant, "second", earlier)
            .timestamp;
        assert_eq!(first, later);
        assert_eq!(second, later);

        let third = later + chrono::Duration::seconds(5);
        assert_eq!(
            session.add_message_at(Role::User, "third", third).timestamp,
            third
        );
    }

    #[test]
    fn test_clear_messages_empties_list() {
        let mut session = SessionState::new();
        session.add_message(Role::User, "a");
        session.add_message(Role::Assistant, "b");
        session.clear_messages();
        assert!(session.messages().is_empty());
        session.clear_messages();
        assert!(session.messages().is_empty());
    }

    #[test]
    fn test_set_parameters_merges() {
        let mut session = SessionState::new();
        let before = *session.parameters();
        session.set_parameters(&ParameterPatch {
            temperature: Some(1.2),
            ..Default::default()
        });
        let after = session.parameters();
        assert_eq!(after.temperature, 1.2);
        assert_eq!(after.max_tokens, before.max_tokens);
        assert_eq!(after.top_p, before.top_p);
        assert_eq!(after.frequency_penalty, before.frequency_penalty);
    }

    #[test]
    fn test_set_selected_model_accepts_anything() {
        let mut session = SessionState::new();
        let custom = ModelDescriptor {
            id: "custom".to_string(),
            name: "Custom".to_string(),
            provider: "Local".to_string(),
            description: String::new(),
        };
        session.set_selected_model(custom.clone());
        assert_eq!(session.selected_model(), Some(&custom));
    }

    #[test]
    fn test_request_tokens() {
        let mut session = SessionState::new();
        let first = session.begin_request();
        assert!(session.is_loading());
        let second = session.begin_request();
        assert_ne!(first, second);

        assert!(!session.complete_request(first), "stale token must be ignored");
        assert!(session.is_loading());
        assert!(session.complete_request(second));
        assert!(!session.is_loading());
        assert!(!session.complete_request(second));
    }

    #[test]
    fn test_set_is_loading() {
        let mut session = SessionState::new();
        session.set_is_loading(true);
        let token = session.pending_request().unwrap();
        session.set_is_loading(true);
        assert_eq!(session.pending_request(), Some(token));
        session.set_is_loading(false);
        assert!(!session.is_loading());
        assert!(!session.complete_request(token));
    }

    #[test]
    fn test_selected_template_does_not_touch_messages() {
        let mut session = SessionState::new();
        let template = session.templates()[0].clone();
        session.set_selected_template(Some(template.clone()));
        assert_eq!(session.selected_template(), Some(&template));
        assert!(session.messages().is_empty());
        session.set_selected_template(None);
        assert!(session.selected_template().is_none());
    }

    #[test]
    fn test_from_config() {
        let config = ResolvedConfig {
            model_id: "gemini-pro".to_string(),
            theme: Theme::Light,
            parameters: ParameterPatch {
                max_tokens: Some(512),
                ..Default::default()
            },
            response_delay: Duration::from_millis(10),
            export_dir: PathBuf::from("/tmp/exports"),
        };
        let app = App::from_config(&config);
        assert_eq!(app.session.selected_model().unwrap().id, "gemini-pro");
        assert_eq!(app.session.parameters().max_tokens, 512);
        assert_eq!(app.session.parameters().temperature, 0.7);
        assert_eq!(app.theme.theme(), Theme::Light);
        assert_eq!(app.response_delay, Duration::from_millis(10));
        assert_eq!(app.export_dir, PathBuf::from("/tmp/exports"));
    }

    #[test]
    fn test_from_config_unknown_model_keeps_default() {
        let config = ResolvedConfig {
            model_id: "nope".to_string(),
            ..ResolvedConfig::default()
        };
        let app = App::from_config(&config);
        assert_eq!(app.session.selected_model().unwrap().id, "gpt-4-turbo");
    }
}
