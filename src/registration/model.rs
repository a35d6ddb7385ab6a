//! Talent profile data model.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::labels::{Schedule, WorkType, Zone};
use super::state::RegistrationPhase;

/// Profile a talent builds through the registration conversation.
///
/// One row per chat participant, keyed by the platform user id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TalentProfile {
    pub external_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub work_type: BTreeSet<WorkType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<Zone>,
    #[serde(default)]
    pub availability: BTreeSet<Schedule>,
    pub phase: RegistrationPhase,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TalentProfile {
    /// A profile is name-complete iff it carries a non-empty name.
    pub fn is_name_complete(&self) -> bool {
        self.name.as_deref().is_some_and(|n| !n.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(name: Option<&str>) -> TalentProfile {
        let now = Utc::now();
        TalentProfile {
            external_id: "42".to_string(),
            name: name.map(String::from),
            work_type: BTreeSet::new(),
            zone: None,
            availability: BTreeSet::new(),
            phase: RegistrationPhase::Unregistered,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn name_completeness() {
        assert!(profile(Some("Ana")).is_name_complete());
        assert!(!profile(None).is_name_complete());
        assert!(!profile(Some("")).is_name_complete());
        assert!(!profile(Some("  ")).is_name_complete());
    }

    #[test]
    fn profile_serde_roundtrip() {
        let mut p = profile(Some("Ana"));
        p.work_type.insert(WorkType::Photos);
        p.zone = Some(Zone::SanTelmo);
        p.availability.insert(Schedule::Morning);
        p.phase = RegistrationPhase::Complete;

        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["work_type"], serde_json::json!(["photos"]));
        assert_eq!(json["zone"], "San Telmo");
        assert_eq!(json["availability"], serde_json::json!(["morning"]));
        assert_eq!(json["phase"], "complete");

        let parsed: TalentProfile = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, p);
    }
}
