//! Resolution write-back and read-back.
//!
//! Every transition is a single `UPDATE` on the origin's table, keyed on the
//! lead id only. Two runs on one lead therefore end with whichever wrote
//! last. Terminal writes only touch the columns their status owns:
//!
//! | status         | writes                                                     | leaves alone            |
//! |----------------|------------------------------------------------------------|-------------------------|
//! | `running`      | `email_domain`, `resolution_started_at`                    | everything else         |
//! | `ok`           | organization, people, `last_enriched_at`; clears candidates and error | -            |
//! | `needs_review` | candidates; clears error                                   | organization, people    |
//! | `error`        | error message                                              | organization, candidates |

use chrono::{Duration, Utc};
use om_core::entities::{Candidate, DecisionMaker, LeadResolution, OrganizationRecord};
use om_core::enums::Origin;
use om_core::limits::{MAX_CANDIDATES, MAX_PEOPLE};
use om_core::outcome::ResolutionOutcome;

use crate::LeadStore;
use crate::error::DatabaseError;
use crate::helpers::{
    format_timestamp, get_opt_string, opt_text, parse_enum, parse_optional_datetime,
    parse_optional_json, to_json_value,
};
use crate::repos::leads::not_found;
use crate::schema::lead_schema;

impl LeadStore {
    /// Mark a lead as `running` and record the email domain in use.
    ///
    /// Must be persisted before any directory call so an interrupted run stays
    /// visible as a stale `running` row.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::LeadNotFound` if the lead does not exist.
    pub async fn mark_running(
        &self,
        origin: Origin,
        lead_id: &str,
        email_domain: Option<&str>,
    ) -> Result<(), DatabaseError> {
        let now = format_timestamp(Utc::now());
        let sql = format!(
            "UPDATE {} SET resolution_status = 'running', email_domain = ?1,
                 resolution_started_at = ?2, resolution_updated_at = ?2
             WHERE id = ?3",
            lead_schema(origin).table
        );
        let changed = self
            .conn()
            .execute(
                &sql,
                libsql::params_from_iter(vec![
                    opt_text(email_domain),
                    libsql::Value::Text(now),
                    libsql::Value::Text(lead_id.to_string()),
                ]),
            )
            .await?;
        ensure_changed(changed, origin, lead_id)
    }

    /// Persist an `ok` result.
    ///
    /// The organization replaces any prior record and candidates are cleared.
    /// A non-empty `people` list replaces stored people; an empty one keeps
    /// the stored list only when it belongs to the same organization id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::LeadNotFound` if the lead does not exist.
    pub async fn record_ok(
        &self,
        origin: Origin,
        lead_id: &str,
        organization: &OrganizationRecord,
        people: &[DecisionMaker],
    ) -> Result<(), DatabaseError> {
        let organization = organization.clone().bounded();
        let people_json = if people.is_empty() {
            libsql::Value::Null
        } else {
            to_json_value(&people[..people.len().min(MAX_PEOPLE)])?
        };

        let now = format_timestamp(Utc::now());
        let sql = format!(
            "UPDATE {} SET resolution_status = 'ok', resolution_error = NULL,
                 organization_id = ?1, organization_record = ?2,
                 people_data = CASE
                     WHEN ?3 IS NOT NULL THEN ?3
                     WHEN organization_id = ?1 THEN people_data
                     ELSE NULL
                 END,
                 candidates = NULL, last_enriched_at = ?4, resolution_updated_at = ?4
             WHERE id = ?5",
            lead_schema(origin).table
        );
        let changed = self
            .conn()
            .execute(
                &sql,
                libsql::params_from_iter(vec![
                    libsql::Value::Text(organization.external_id.clone()),
                    to_json_value(&organization)?,
                    people_json,
                    libsql::Value::Text(now),
                    libsql::Value::Text(lead_id.to_string()),
                ]),
            )
            .await?;
        ensure_changed(changed, origin, lead_id)
    }

    /// Persist a `needs_review` result. Any prior organization is left as is.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::LeadNotFound` if the lead does not exist.
    pub async fn record_needs_review(
        &self,
        origin: Origin,
        lead_id: &str,
        candidates: &[Candidate],
    ) -> Result<(), DatabaseError> {
        let now = format_timestamp(Utc::now());
        let sql = format!(
            "UPDATE {} SET resolution_status = 'needs_review', resolution_error = NULL,
                 candidates = ?1, resolution_updated_at = ?2
             WHERE id = ?3",
            lead_schema(origin).table
        );
        let changed = self
            .conn()
            .execute(
                &sql,
                libsql::params_from_iter(vec![
                    to_json_value(&candidates[..candidates.len().min(MAX_CANDIDATES)])?,
                    libsql::Value::Text(now),
                    libsql::Value::Text(lead_id.to_string()),
                ]),
            )
            .await?;
        ensure_changed(changed, origin, lead_id)
    }

    /// Persist an `error` result. Organization and candidates are left as is.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::LeadNotFound` if the lead does not exist.
    pub async fn record_error(
        &self,
        origin: Origin,
        lead_id: &str,
        message: &str,
    ) -> Result<(), DatabaseError> {
        let now = format_timestamp(Utc::now());
        let sql = format!(
            "UPDATE {} SET resolution_status = 'error', resolution_error = ?1,
                 resolution_updated_at = ?2
             WHERE id = ?3",
            lead_schema(origin).table
        );
        let changed = self
            .conn()
            .execute(&sql, libsql::params![message, now, lead_id])
            .await?;
        ensure_changed(changed, origin, lead_id)
    }

    /// Persist whichever terminal state `outcome` maps to.
    ///
    /// # Errors
    ///
    /// See [`Self::record_ok`], [`Self::record_needs_review`] and
    /// [`Self::record_error`].
    pub async fn record_outcome(
        &self,
        origin: Origin,
        lead_id: &str,
        outcome: &ResolutionOutcome,
    ) -> Result<(), DatabaseError> {
        match outcome {
            ResolutionOutcome::Ok {
                organization,
                people,
            } => self.record_ok(origin, lead_id, organization, people).await,
            ResolutionOutcome::NeedsReview { candidates } => {
                self.record_needs_review(origin, lead_id, candidates).await
            }
            ResolutionOutcome::Error { message, .. } => {
                self.record_error(origin, lead_id, message).await
            }
        }
    }

    /// Read back the persisted resolution state of one lead.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::LeadNotFound` if no row has this id, or
    /// `DatabaseError::Query` if a stored JSON column does not decode.
    pub async fn get_resolution(
        &self,
        origin: Origin,
        lead_id: &str,
    ) -> Result<LeadResolution, DatabaseError> {
        let sql = format!(
            "SELECT resolution_status, resolution_error, email_domain, organization_id,
                    organization_record, people_data, candidates, last_enriched_at,
                    resolution_started_at, resolution_updated_at
             FROM {} WHERE id = ?1",
            lead_schema(origin).table
        );
        let mut rows = self.conn().query(&sql, [lead_id]).await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| not_found(origin, lead_id))?;

        Ok(LeadResolution {
            origin,
            lead_id: lead_id.to_string(),
            status: get_opt_string(&row, 0)?.as_deref().map(parse_enum).transpose()?,
            error_message: get_opt_string(&row, 1)?,
            email_domain: get_opt_string(&row, 2)?,
            organization_id: get_opt_string(&row, 3)?,
            organization: parse_optional_json(get_opt_string(&row, 4)?.as_deref())?,
            people: parse_optional_json(get_opt_string(&row, 5)?.as_deref())?.unwrap_or_default(),
            candidates: parse_optional_json(get_opt_string(&row, 6)?.as_deref())?
                .unwrap_or_default(),
            last_enriched_at: parse_optional_datetime(get_opt_string(&row, 7)?.as_deref())?,
            started_at: parse_optional_datetime(get_opt_string(&row, 8)?.as_deref())?,
            updated_at: parse_optional_datetime(get_opt_string(&row, 9)?.as_deref())?,
        })
    }

    /// Ids of leads stuck in `running` for longer than `older_than`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidState` if `older_than` reaches past the
    /// representable date range, or `DatabaseError` if the query fails.
    pub async fn list_stale_running(
        &self,
        origin: Origin,
        older_than: Duration,
    ) -> Result<Vec<String>, DatabaseError> {
        let cutoff = Utc::now().checked_sub_signed(older_than).ok_or_else(|| {
            DatabaseError::InvalidState(format!("stale window of {older_than} is out of range"))
        })?;
        let cutoff = format_timestamp(cutoff);
        let sql = format!(
            "SELECT id FROM {}
             WHERE resolution_status = 'running' AND resolution_started_at < ?1
             ORDER BY resolution_started_at",
            lead_schema(origin).table
        );
        let mut rows = self.conn().query(&sql, [cutoff]).await?;
        let mut ids = Vec::new();
        while let Some(row) = rows.next().await? {
            ids.push(row.get::<String>(0)?);
        }
        Ok(ids)
    }
}

fn ensure_changed(changed: u64, origin: Origin, lead_id: &str) -> Result<(), DatabaseError> {
    if changed == 0 {
        return Err(not_found(origin, lead_id));
    }
    Ok(())
}
