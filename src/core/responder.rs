//! # Simulated Responder
//!
//! Stands in for a model call: waits a fixed delay, then reports a canned
//! reply for the request token it was given. There is no error branch.

use std::sync::mpsc;
use std::time::Duration;

use log::{debug, warn};
use tokio::task::JoinHandle;

use crate::core::action::Action;
use crate::core::state::RequestToken;

/// Number of prompt characters echoed back in the reply.
pub const ECHO_CHARS: usize = 50;

/// The placeholder reply for `prompt`.
pub fn simulated_reply(prompt: &str) -> String {
    let echo: String = prompt.chars().take(ECHO_CHARS).collect();
    format!("This is a simulated response to: \"{echo}...\"")
}

/// Spawn the delayed reply. The returned handle can be aborted to cancel it.
///
/// Must be called from within a tokio runtime.
pub fn spawn_response(
    token: RequestToken,
    prompt: String,
    delay: Duration,
    tx: mpsc::Sender<Action>,
) -> JoinHandle<()> {
    debug!("Scheduling simulated reply for request {} in {:?}", token.id(), delay);
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let content = simulated_reply(&prompt);
        if tx.send(Action::ResponseReady { token, content }).is_err() {
            warn!(
                "Failed to deliver reply for request {}: receiver dropped",
                token.id()
            );
        }
    })
}
