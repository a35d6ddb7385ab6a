//! Pure transition planning: which step an inbound event triggers.
//!
//! Planning never touches the store or the network, so every branch of the
//! conversation can be checked without I/O. `RegistrationFlow` executes the
//! plan.

use super::labels::{ButtonLabel, Schedule, WorkType, Zone};
use super::prompts::Prompt;
use super::state::RegistrationPhase;
use crate::channels::InboundEvent;

/// A button click that maps to one of the enumerated choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonChoice {
    WorkType(WorkType),
    Zone(Zone),
    Availability(Schedule),
}

impl ButtonChoice {
    /// Resolve a callback label. Label sets are disjoint, so at most one matches.
    pub fn from_label(label: &str) -> Option<Self> {
        WorkType::from_label(label)
            .map(Self::WorkType)
            .or_else(|| Zone::from_label(label).map(Self::Zone))
            .or_else(|| Schedule::from_label(label).map(Self::Availability))
    }

    /// Phase the profile reaches once this choice is stored.
    pub fn target_phase(&self) -> RegistrationPhase {
        match self {
            Self::WorkType(_) => RegistrationPhase::AwaitingZone,
            Self::Zone(_) => RegistrationPhase::AwaitingAvailability,
            Self::Availability(_) => RegistrationPhase::Complete,
        }
    }

    /// Message sent after the choice is stored.
    pub fn next_prompt(&self) -> Prompt {
        match self {
            Self::WorkType(_) => Prompt::zone(),
            Self::Zone(_) => Prompt::availability(),
            Self::Availability(_) => Prompt::complete(),
        }
    }
}

/// What the flow should do with an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action<'a> {
    /// Reply with the greeting. No store access.
    Greet,
    /// Record the name, unless the profile already has one.
    CaptureName(&'a str),
    /// Store a button selection.
    Select(ButtonChoice),
    /// Nothing to do.
    Ignore,
}

/// Decide the step for `event`. Keyed on the event type, not on the stored
/// phase: a button is honoured whenever its label is known.
pub fn plan<'a>(event: &'a InboundEvent, start_command: &str) -> Action<'a> {
    match event {
        InboundEvent::Text { text, .. } => {
            if text == start_command {
                Action::Greet
            } else if text.trim().is_empty() {
                Action::Ignore
            } else {
                Action::CaptureName(text)
            }
        }
        InboundEvent::Button { data, .. } => match ButtonChoice::from_label(data) {
            Some(choice) => Action::Select(choice),
            None => Action::Ignore,
        },
        InboundEvent::Unrecognized => Action::Ignore,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(t: &str) -> InboundEvent {
        InboundEvent::Text {
            chat_id: "1".into(),
            user_id: "42".into(),
            text: t.into(),
        }
    }

    fn button(data: &str) -> InboundEvent {
        InboundEvent::Button {
            chat_id: "1".into(),
            user_id: "42".into(),
            data: data.into(),
        }
    }

    #[test]
    fn start_command_greets() {
        assert_eq!(plan(&text("/start"), "/start"), Action::Greet);
    }

    #[test]
    fn custom_start_command() {
        assert_eq!(plan(&text("/hola"), "/hola"), Action::Greet);
        assert_eq!(plan(&text("/start"), "/hola"), Action::CaptureName("/start"));
    }

    #[test]
    fn start_command_must_match_exactly() {
        assert_eq!(plan(&text(" /start"), "/start"), Action::CaptureName(" /start"));
        assert_eq!(plan(&text("/start "), "/start"), Action::CaptureName("/start "));
    }

    #[test]
    fn other_text_is_a_name_candidate() {
        assert_eq!(plan(&text("Ana"), "/start"), Action::CaptureName("Ana"));
        assert_eq!(
            plan(&text(" Ana María "), "/start"),
            Action::CaptureName(" Ana María ")
        );
    }

    #[test]
    fn blank_text_is_ignored() {
        assert_eq!(plan(&text("   "), "/start"), Action::Ignore);
        assert_eq!(plan(&text(""), "/start"), Action::Ignore);
    }

    #[test]
    fn known_labels_select() {
        assert_eq!(
            plan(&button("Fotos"), "/start"),
            Action::Select(ButtonChoice::WorkType(WorkType::Photos))
        );
        assert_eq!(
            plan(&button("San Telmo"), "/start"),
            Action::Select(ButtonChoice::Zone(Zone::SanTelmo))
        );
        assert_eq!(
            plan(&button("Noche"), "/start"),
            Action::Select(ButtonChoice::Availability(Schedule::Night))
        );
    }

    #[test]
    fn unknown_label_is_ignored() {
        assert_eq!(plan(&button("Otro"), "/start"), Action::Ignore);
        assert_eq!(plan(&button("fotos"), "/start"), Action::Ignore);
    }

    #[test]
    fn unrecognized_is_ignored() {
        assert_eq!(plan(&InboundEvent::Unrecognized, "/start"), Action::Ignore);
    }

    #[test]
    fn label_sets_are_disjoint() {
        use std::collections::HashSet;
        let mut seen = HashSet::new();
        let all = WorkType::ALL
            .iter()
            .map(ButtonLabel::label)
            .chain(Zone::ALL.iter().map(ButtonLabel::label))
            .chain(Schedule::ALL.iter().map(ButtonLabel::label));
        for label in all {
            assert!(seen.insert(label), "duplicate label {label}");
        }
    }

    #[test]
    fn choices_chain_to_the_next_prompt() {
        let work = ButtonChoice::WorkType(WorkType::Modeling);
        assert_eq!(work.target_phase(), RegistrationPhase::AwaitingZone);
        assert_eq!(work.next_prompt(), Prompt::zone());

        let zone = ButtonChoice::Zone(Zone::Almagro);
        assert_eq!(zone.target_phase(), RegistrationPhase::AwaitingAvailability);
        assert_eq!(zone.next_prompt(), Prompt::availability());

        let slot = ButtonChoice::Availability(Schedule::Morning);
        assert_eq!(slot.target_phase(), RegistrationPhase::Complete);
        assert_eq!(slot.next_prompt(), Prompt::complete());
    }
}
