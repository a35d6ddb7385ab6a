//! RegistrationFlow — executes planned transitions against the store and
//! the messenger.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use super::prompts::Prompt;
use super::state::RegistrationPhase;
use super::transition::{Action, ButtonChoice, plan};
use crate::channels::{InboundEvent, Messenger};
use crate::error::DatabaseError;
use crate::store::ProfileStore;

/// Result of handling one inbound event. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowOutcome {
    /// No store access, no message.
    Ignored,
    /// Greeting sent.
    Greeted,
    /// A step was stored; carries the phase that step targets.
    Advanced(RegistrationPhase),
    /// A store call failed and the apology was sent.
    StoreFailed,
}

/// Drives the registration conversation.
///
/// Holds no per-user state: every decision is made from the event and the
/// stored profile.
pub struct RegistrationFlow {
    store: Arc<dyn ProfileStore>,
    messenger: Arc<dyn Messenger>,
    start_command: String,
}

impl RegistrationFlow {
    pub fn new(
        store: Arc<dyn ProfileStore>,
        messenger: Arc<dyn Messenger>,
        start_command: impl Into<String>,
    ) -> Self {
        Self {
            store,
            messenger,
            start_command: start_command.into(),
        }
    }

    /// Handle one event. Never fails; problems are logged and, for store
    /// failures, reported to the talent with the apology.
    pub async fn handle(&self, event: InboundEvent) -> FlowOutcome {
        let (chat_id, user_id) = match &event {
            InboundEvent::Text {
                chat_id, user_id, ..
            }
            | InboundEvent::Button {
                chat_id, user_id, ..
            } => (chat_id.as_str(), user_id.as_str()),
            InboundEvent::Unrecognized => {
                debug!("Ignoring unrecognized update");
                return FlowOutcome::Ignored;
            }
        };

        match plan(&event, &self.start_command) {
            Action::Greet => {
                self.send_prompt(chat_id, &Prompt::greeting()).await;
                FlowOutcome::Greeted
            }
            Action::CaptureName(name) => self.capture_name(chat_id, user_id, name).await,
            Action::Select(choice) => self.apply_choice(chat_id, user_id, choice).await,
            Action::Ignore => {
                debug!(user_id, "Event does not trigger a registration step");
                FlowOutcome::Ignored
            }
        }
    }

    async fn capture_name(&self, chat_id: &str, user_id: &str, name: &str) -> FlowOutcome {
        match self.store.get_profile(user_id).await {
            Ok(Some(profile)) if profile.is_name_complete() => {
                debug!(user_id, phase = %profile.phase, "Name already set, ignoring text");
                return FlowOutcome::Ignored;
            }
            Ok(_) => {}
            Err(e) => return self.store_failed(chat_id, user_id, e).await,
        }

        if let Err(e) = self.store.save_name(user_id, name).await {
            return self.store_failed(chat_id, user_id, e).await;
        }
        info!(user_id, "Talent registered name");

        self.send_prompt(chat_id, &Prompt::work_type()).await;
        FlowOutcome::Advanced(RegistrationPhase::AwaitingWorkType)
    }

    async fn apply_choice(
        &self,
        chat_id: &str,
        user_id: &str,
        choice: ButtonChoice,
    ) -> FlowOutcome {
        let stored = match choice {
            ButtonChoice::WorkType(work_type) => {
                self.store
                    .set_work_type(user_id, &BTreeSet::from([work_type]))
                    .await
            }
            ButtonChoice::Zone(zone) => self.store.set_zone(user_id, zone).await,
            ButtonChoice::Availability(slot) => {
                self.store
                    .set_availability(user_id, &BTreeSet::from([slot]))
                    .await
            }
        };
        if let Err(e) = stored {
            return self.store_failed(chat_id, user_id, e).await;
        }

        let phase = choice.target_phase();
        info!(user_id, ?choice, %phase, "Registration step stored");
        if phase.is_terminal() {
            info!(user_id, "Talent registration complete");
        }

        self.send_prompt(chat_id, &choice.next_prompt()).await;
        FlowOutcome::Advanced(phase)
    }

    async fn store_failed(&self, chat_id: &str, user_id: &str, e: DatabaseError) -> FlowOutcome {
        match &e {
            DatabaseError::NotFound { .. } => {
                warn!(user_id, "Button clicked before a profile exists: {e}")
            }
            _ => error!(user_id, "Registration store call failed: {e}"),
        }
        self.send_prompt(chat_id, &Prompt::apology()).await;
        FlowOutcome::StoreFailed
    }

    /// Send one prompt. Failures are logged and dropped.
    async fn send_prompt(&self, chat_id: &str, prompt: &Prompt) {
        let sent = if prompt.options.is_empty() {
            self.messenger.send_text(chat_id, prompt.text).await
        } else {
            self.messenger
                .send_options(chat_id, prompt.text, &prompt.options)
                .await
        };
        if let Err(e) = sent {
            error!(
                channel = self.messenger.name(),
                chat_id, "Failed to send message: {e}"
            );
        }
    }
}
