//! Storage traits — async interfaces the flow and the job API depend on.

use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::DatabaseError;
use crate::jobs::JobPosting;
use crate::registration::{Schedule, TalentProfile, WorkType, Zone};

/// Talent profiles keyed by the platform user id.
///
/// Every `set_*` call overwrites its field, moves the phase forward (never
/// back) and fails with [`DatabaseError::NotFound`] when no row exists.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Point lookup by external id.
    async fn get_profile(&self, external_id: &str)
    -> Result<Option<TalentProfile>, DatabaseError>;

    /// Insert a profile with its name, or fill the name of a nameless row.
    async fn save_name(&self, external_id: &str, name: &str) -> Result<(), DatabaseError>;

    /// Replace the work type set.
    async fn set_work_type(
        &self,
        external_id: &str,
        work_type: &BTreeSet<WorkType>,
    ) -> Result<(), DatabaseError>;

    /// Replace the zone.
    async fn set_zone(&self, external_id: &str, zone: Zone) -> Result<(), DatabaseError>;

    /// Replace the availability set.
    async fn set_availability(
        &self,
        external_id: &str,
        availability: &BTreeSet<Schedule>,
    ) -> Result<(), DatabaseError>;
}

/// Agency job postings.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Persist a validated posting.
    async fn insert_job(&self, job: &JobPosting) -> Result<(), DatabaseError>;

    /// Postings, newest first. With `active_on`, only those whose expiry
    /// date is on or after that day.
    async fn list_jobs(&self, active_on: Option<NaiveDate>)
    -> Result<Vec<JobPosting>, DatabaseError>;
}
