//! Registration phases — where a talent is in the signup conversation.

use serde::{Deserialize, Serialize};

/// The phases of the registration conversation.
///
/// Progresses linearly: Unregistered → AwaitingWorkType → AwaitingZone →
/// AwaitingAvailability → Complete. Stored explicitly on the profile row and
/// only ever moved forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationPhase {
    Unregistered,
    AwaitingWorkType,
    AwaitingZone,
    AwaitingAvailability,
    Complete,
}

impl RegistrationPhase {
    /// Every phase in progression order.
    pub const ALL: &'static [RegistrationPhase] = &[
        RegistrationPhase::Unregistered,
        RegistrationPhase::AwaitingWorkType,
        RegistrationPhase::AwaitingZone,
        RegistrationPhase::AwaitingAvailability,
        RegistrationPhase::Complete,
    ];

    /// Whether this phase is terminal (registration is done).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete)
    }

    /// Phases strictly before `self`.
    pub fn predecessors(self) -> impl Iterator<Item = RegistrationPhase> {
        Self::ALL.iter().copied().filter(move |p| *p < self)
    }

    /// Stable string stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unregistered => "unregistered",
            Self::AwaitingWorkType => "awaiting_work_type",
            Self::AwaitingZone => "awaiting_zone",
            Self::AwaitingAvailability => "awaiting_availability",
            Self::Complete => "complete",
        }
    }

    /// Parse a stored phase string. Unknown values fall back to `Unregistered`.
    pub fn from_db(s: &str) -> RegistrationPhase {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .unwrap_or_default()
    }
}

impl Default for RegistrationPhase {
    fn default() -> Self {
        Self::Unregistered
    }
}

impl std::fmt::Display for RegistrationPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
