//! Job posting data model and submission validation.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::JobError;
use crate::registration::{Schedule, WorkType, Zone};

/// Contact handles look like `@agency`.
static INSTAGRAM_HANDLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@\S+$").expect("valid handle regex"));

/// A job published by an agency. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: Uuid,
    pub agency: String,
    pub instagram: String,
    pub work_type: WorkType,
    pub brand: String,
    pub zone: Zone,
    pub schedule: BTreeSet<Schedule>,
    pub expiry_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Job submission as sent by the agency form.
///
/// Fields are kept raw so that a missing or unknown value is reported by
/// [`NewJobPosting::validate`] against its own field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewJobPosting {
    pub agency: String,
    pub instagram: String,
    pub work_type: String,
    pub brand: String,
    pub zone: String,
    pub schedule: Vec<String>,
    pub expiry_date: String,
}

impl NewJobPosting {
    /// Validate the submission and stamp it with an id and creation time.
    pub fn validate(self) -> Result<JobPosting, JobError> {
        let agency = required("agency", &self.agency)?;
        let instagram = required("instagram", &self.instagram)?;
        let work_type: WorkType = choice("work_type", &self.work_type)?;
        let brand = required("brand", &self.brand)?;
        let zone: Zone = choice("zone", &self.zone)?;

        if !INSTAGRAM_HANDLE.is_match(&instagram) {
            return Err(JobError::validation("instagram", "Debe comenzar con @"));
        }

        let schedule = self
            .schedule
            .iter()
            .map(|slot| choice::<Schedule>("schedule", slot))
            .collect::<Result<BTreeSet<_>, _>>()?;
        if schedule.is_empty() {
            return Err(JobError::validation(
                "schedule",
                "Selecciona al menos un horario",
            ));
        }

        let expiry_date = required("expiry_date", &self.expiry_date)?;
        let expiry_date = NaiveDate::parse_from_str(&expiry_date, "%Y-%m-%d")
            .map_err(|_| JobError::validation("expiry_date", "Fecha inválida"))?;

        Ok(JobPosting {
            id: Uuid::new_v4(),
            agency,
            instagram,
            work_type,
            brand,
            zone,
            schedule,
            expiry_date,
            created_at: Utc::now(),
        })
    }
}

fn required(field: &str, value: &str) -> Result<String, JobError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(JobError::validation(field, "Este campo es requerido"));
    }
    Ok(trimmed.to_string())
}

/// Parse one enumerated value by its serialized name.
fn choice<T: DeserializeOwned>(field: &str, value: &str) -> Result<T, JobError> {
    let value = required(field, value)?;
    serde_json::from_value(serde_json::Value::String(value))
        .map_err(|_| JobError::validation(field, "Opción no válida"))
}
