//! Talent registration — the signup conversation held over the chat bot.
//!
//! A talent sends their name, then picks a work type, a zone and an
//! availability slot from inline buttons. Each step is persisted on the
//! talent's profile together with an explicit phase that only moves forward.

pub mod labels;
pub mod machine;
pub mod model;
pub mod prompts;
pub mod routes;
pub mod state;
pub mod transition;

pub use labels::{ButtonLabel, Schedule, WorkType, Zone};
pub use machine::{FlowOutcome, RegistrationFlow};
pub use model::TalentProfile;
pub use routes::{WebhookState, webhook_routes};
pub use state::RegistrationPhase;
