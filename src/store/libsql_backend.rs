//! libSQL backend — async `ProfileStore` and `JobStore` implementation.
//!
//! Supports local file and in-memory databases.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use libsql::{Connection, Database as LibSqlDatabase, params};
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::DatabaseError;
use crate::jobs::JobPosting;
use crate::registration::{RegistrationPhase, Schedule, TalentProfile, WorkType, Zone};
use crate::store::migrations;
use crate::store::traits::{JobStore, ProfileStore};

/// libSQL database backend.
///
/// Stores a single connection that is reused for all operations.
/// `libsql::Connection` is `Send + Sync` and safe for concurrent async use.
pub struct LibSqlBackend {
    #[allow(dead_code)]
    db: Arc<LibSqlDatabase>,
    conn: Connection,
}

impl LibSqlBackend {
    /// Open (or create) a local database file and run migrations.
    pub async fn new_local(path: &Path) -> Result<Self, DatabaseError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DatabaseError::Pool(format!("Failed to create database directory: {e}"))
            })?;
        }

        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| DatabaseError::Pool(format!("Failed to open libSQL database: {e}")))?;

        let conn = db
            .connect()
            .map_err(|e| DatabaseError::Pool(format!("Failed to create connection: {e}")))?;

        let backend = Self {
            db: Arc::new(db),
            conn,
        };
        migrations::run_migrations(backend.conn()).await?;
        info!(path = %path.display(), "Database opened");
        Ok(backend)
    }

    /// Create an in-memory database (for tests).
    pub async fn new_memory() -> Result<Self, DatabaseError> {
        let db = libsql::Builder::new_local(":memory:")
            .build()
            .await
            .map_err(|e| {
                DatabaseError::Pool(format!("Failed to create in-memory database: {e}"))
            })?;

        let conn = db
            .connect()
            .map_err(|e| DatabaseError::Pool(format!("Failed to create connection: {e}")))?;

        let backend = Self {
            db: Arc::new(db),
            conn,
        };
        migrations::run_migrations(backend.conn()).await?;
        Ok(backend)
    }

    /// Get the connection.
    fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Overwrite one talent column and move the phase towards `target`.
    async fn update_talent_field(
        &self,
        external_id: &str,
        column: &'static str,
        value: String,
        target: RegistrationPhase,
    ) -> Result<(), DatabaseError> {
        let now = Utc::now().to_rfc3339();
        let sql = format!(
            "UPDATE talents SET {column} = ?1, phase = {}, updated_at = ?2 WHERE external_id = ?3",
            advance_phase_sql(target)
        );
        let affected = self
            .conn()
            .execute(&sql, params![value, now, external_id])
            .await
            .map_err(|e| DatabaseError::Query(format!("update talents.{column}: {e}")))?;

        if affected == 0 {
            return Err(DatabaseError::NotFound {
                entity: "talent".into(),
                id: external_id.to_string(),
            });
        }

        debug!(external_id, column, phase = %target, "Talent profile updated");
        Ok(())
    }
}

// ── Helper functions ────────────────────────────────────────────────

/// Parse an RFC 3339 or SQLite datetime string into DateTime<Utc>.
fn parse_datetime(s: &str) -> DateTime<Utc> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return dt.with_timezone(&Utc);
    }
    if let Ok(ndt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
        return ndt.and_utc();
    }
    if let Ok(ndt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return ndt.and_utc();
    }
    DateTime::<Utc>::MIN_UTC
}

/// SQL expression that moves `phase` to `target` unless it is already there
/// or beyond. Evaluated in the UPDATE itself so concurrent writers cannot
/// move it backwards.
fn advance_phase_sql(target: RegistrationPhase) -> String {
    let earlier: Vec<String> = target
        .predecessors()
        .map(|p| format!("'{}'", p.as_str()))
        .collect();
    if earlier.is_empty() {
        return "phase".to_string();
    }
    format!(
        "CASE WHEN phase IN ({}) THEN '{}' ELSE phase END",
        earlier.join(", "),
        target.as_str()
    )
}

/// Serialize a set column as a JSON array.
fn to_json_column<T: serde::Serialize>(value: &T) -> Result<String, DatabaseError> {
    serde_json::to_string(value).map_err(|e| DatabaseError::Serialization(e.to_string()))
}

fn from_json_column<T: DeserializeOwned>(column: &str, raw: &str) -> Result<T, DatabaseError> {
    serde_json::from_str(raw)
        .map_err(|e| DatabaseError::Serialization(format!("{column}: {e} (raw: {raw})")))
}

/// Parse a bare enum string (stored without JSON quotes).
fn parse_enum<T: DeserializeOwned>(column: &str, raw: &str) -> Result<T, DatabaseError> {
    serde_json::from_value(serde_json::Value::String(raw.to_string()))
        .map_err(|e| DatabaseError::Serialization(format!("{column}: {e}")))
}

fn row_err(e: libsql::Error) -> DatabaseError {
    DatabaseError::Query(format!("row parse: {e}"))
}

/// Map a libsql Row to a TalentProfile. Column order matches TALENT_COLUMNS.
fn row_to_profile(row: &libsql::Row) -> Result<TalentProfile, DatabaseError> {
    let external_id: String = row.get(0).map_err(row_err)?;
    let name: Option<String> = row.get(1).ok();
    let work_type_str: String = row.get(2).map_err(row_err)?;
    let zone_str: Option<String> = row.get(3).ok();
    let availability_str: String = row.get(4).map_err(row_err)?;
    let phase_str: String = row.get(5).map_err(row_err)?;
    let created_str: String = row.get(6).map_err(row_err)?;
    let updated_str: String = row.get(7).map_err(row_err)?;

    let zone = match zone_str {
        Some(ref z) => Some(parse_enum::<Zone>("zone", z)?),
        None => None,
    };

    Ok(TalentProfile {
        external_id,
        name,
        work_type: from_json_column("work_type", &work_type_str)?,
        zone,
        availability: from_json_column("availability", &availability_str)?,
        phase: RegistrationPhase::from_db(&phase_str),
        created_at: parse_datetime(&created_str),
        updated_at: parse_datetime(&updated_str),
    })
}

/// Map a libsql Row to a JobPosting. Column order matches JOB_COLUMNS.
fn row_to_job(row: &libsql::Row) -> Result<JobPosting, DatabaseError> {
    let id_str: String = row.get(0).map_err(row_err)?;
    let work_type_str: String = row.get(3).map_err(row_err)?;
    let zone_str: String = row.get(5).map_err(row_err)?;
    let schedule_str: String = row.get(6).map_err(row_err)?;
    let expiry_str: String = row.get(7).map_err(row_err)?;
    let created_str: String = row.get(8).map_err(row_err)?;

    Ok(JobPosting {
        id: Uuid::parse_str(&id_str)
            .map_err(|e| DatabaseError::Serialization(format!("id: {e}")))?,
        agency: row.get(1).map_err(row_err)?,
        instagram: row.get(2).map_err(row_err)?,
        work_type: parse_enum::<WorkType>("work_type", &work_type_str)?,
        brand: row.get(4).map_err(row_err)?,
        zone: parse_enum::<Zone>("zone", &zone_str)?,
        schedule: from_json_column("schedule", &schedule_str)?,
        expiry_date: NaiveDate::parse_from_str(&expiry_str, DATE_FORMAT)
            .map_err(|e| DatabaseError::Serialization(format!("expiry_date: {e}")))?,
        created_at: parse_datetime(&created_str),
    })
}

// ── Trait implementations ───────────────────────────────────────────

const TALENT_COLUMNS: &str =
    "external_id, name, work_type, zone, availability, phase, created_at, updated_at";

const JOB_COLUMNS: &str =
    "id, agency, instagram, work_type, brand, zone, schedule, expiry_date, created_at";

const DATE_FORMAT: &str = "%Y-%m-%d";

#[async_trait]
impl ProfileStore for LibSqlBackend {
    async fn get_profile(
        &self,
        external_id: &str,
    ) -> Result<Option<TalentProfile>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {TALENT_COLUMNS} FROM talents WHERE external_id = ?1"),
                params![external_id],
            )
            .await
            .map_err(|e| DatabaseError::Query(format!("get_profile: {e}")))?;

        match rows.next().await {
            Ok(Some(row)) => Ok(Some(row_to_profile(&row)?)),
            Ok(None) => Ok(None),
            Err(e) => Err(DatabaseError::Query(format!("get_profile: {e}"))),
        }
    }

    async fn save_name(&self, external_id: &str, name: &str) -> Result<(), DatabaseError> {
        let now = Utc::now().to_rfc3339();
        let target = RegistrationPhase::AwaitingWorkType;
        let sql = format!(
            "INSERT INTO talents (external_id, name, phase, created_at, updated_at)
             VALUES (?1, ?2, '{}', ?3, ?3)
             ON CONFLICT (external_id) DO UPDATE SET name = ?2, phase = {}, updated_at = ?3",
            target.as_str(),
            advance_phase_sql(target)
        );
        self.conn()
            .execute(&sql, params![external_id, name, now])
            .await
            .map_err(|e| DatabaseError::Query(format!("save_name: {e}")))?;

        debug!(external_id, "Talent name saved");
        Ok(())
    }

    async fn set_work_type(
        &self,
        external_id: &str,
        work_type: &BTreeSet<WorkType>,
    ) -> Result<(), DatabaseError> {
        self.update_talent_field(
            external_id,
            "work_type",
            to_json_column(work_type)?,
            RegistrationPhase::AwaitingZone,
        )
        .await
    }

    async fn set_zone(&self, external_id: &str, zone: Zone) -> Result<(), DatabaseError> {
        self.update_talent_field(
            external_id,
            "zone",
            zone.to_string(),
            RegistrationPhase::AwaitingAvailability,
        )
        .await
    }

    async fn set_availability(
        &self,
        external_id: &str,
        availability: &BTreeSet<Schedule>,
    ) -> Result<(), DatabaseError> {
        self.update_talent_field(
            external_id,
            "availability",
            to_json_column(availability)?,
            RegistrationPhase::Complete,
        )
        .await
    }
}

#[async_trait]
impl JobStore for LibSqlBackend {
    async fn insert_job(&self, job: &JobPosting) -> Result<(), DatabaseError> {
        self.conn()
            .execute(
                &format!(
                    "INSERT INTO jobs ({JOB_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"
                ),
                params![
                    job.id.to_string(),
                    job.agency.as_str(),
                    job.instagram.as_str(),
                    job.work_type.to_string(),
                    job.brand.as_str(),
                    job.zone.to_string(),
                    to_json_column(&job.schedule)?,
                    job.expiry_date.format(DATE_FORMAT).to_string(),
                    job.created_at.to_rfc3339_opts(SecondsFormat::Micros, true),
                ],
            )
            .await
            .map_err(|e| DatabaseError::Query(format!("insert_job: {e}")))?;

        debug!(id = %job.id, agency = %job.agency, "Job inserted into DB");
        Ok(())
    }

    async fn list_jobs(
        &self,
        active_on: Option<NaiveDate>,
    ) -> Result<Vec<JobPosting>, DatabaseError> {
        let conn = self.conn();
        let mut rows = match active_on {
            Some(day) => {
                conn.query(
                    &format!(
                        "SELECT {JOB_COLUMNS} FROM jobs WHERE expiry_date >= ?1 ORDER BY created_at DESC"
                    ),
                    params![day.format(DATE_FORMAT).to_string()],
                )
                .await
            }
            None => {
                conn.query(
                    &format!("SELECT {JOB_COLUMNS} FROM jobs ORDER BY created_at DESC"),
                    (),
                )
                .await
            }
        }
        .map_err(|e| DatabaseError::Query(format!("list_jobs: {e}")))?;

        let mut jobs = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| DatabaseError::Query(format!("list_jobs: {e}")))?
        {
            match row_to_job(&row) {
                Ok(job) => jobs.push(job),
                Err(e) => {
                    tracing::warn!("Skipping job row: {e}");
                }
            }
        }
        Ok(jobs)
    }
}
