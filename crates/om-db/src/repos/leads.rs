//! Lead rows: seeding, projection to the two normalized fields, status reads.

use om_core::entities::Lead;
use om_core::enums::{Origin, ResolutionStatus};

use crate::LeadStore;
use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, opt_text, parse_enum};
use crate::schema::lead_schema;

impl LeadStore {
    /// Insert a new lead into its origin table and return the generated id.
    ///
    /// Origin-specific columns other than email and company stay NULL.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if id generation or the INSERT fails.
    pub async fn insert_lead(
        &self,
        origin: Origin,
        contact_email: Option<&str>,
        company_name: Option<&str>,
    ) -> Result<String, DatabaseError> {
        let schema = lead_schema(origin);
        let id = self.generate_id(schema.id_prefix).await?;

        let sql = format!(
            "INSERT INTO {} (id, {}, {}) VALUES (?1, ?2, ?3)",
            schema.table, schema.email_column, schema.company_column
        );
        self.conn()
            .execute(
                &sql,
                libsql::params_from_iter(vec![
                    libsql::Value::Text(id.clone()),
                    opt_text(contact_email),
                    opt_text(company_name),
                ]),
            )
            .await?;

        tracing::debug!(%origin, lead_id = %id, "inserted lead");
        Ok(id)
    }

    /// Read one lead, projected to its contact email and company name.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::LeadNotFound` if no row has this id.
    pub async fn load_lead(&self, origin: Origin, lead_id: &str) -> Result<Lead, DatabaseError> {
        let schema = lead_schema(origin);
        let sql = format!(
            "SELECT {}, {} FROM {} WHERE id = ?1",
            schema.email_column, schema.company_column, schema.table
        );
        let mut rows = self.conn().query(&sql, [lead_id]).await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| not_found(origin, lead_id))?;

        Ok(Lead {
            origin,
            lead_id: lead_id.to_string(),
            contact_email: get_opt_string(&row, 0)?.map(|s| s.trim().to_string()),
            company_name: get_opt_string(&row, 1)?
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        })
    }

    /// Current resolution status, `None` if the lead was never resolved.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::LeadNotFound` if no row has this id.
    pub async fn resolution_status(
        &self,
        origin: Origin,
        lead_id: &str,
    ) -> Result<Option<ResolutionStatus>, DatabaseError> {
        let schema = lead_schema(origin);
        let sql = format!(
            "SELECT resolution_status FROM {} WHERE id = ?1",
            schema.table
        );
        let mut rows = self.conn().query(&sql, [lead_id]).await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| not_found(origin, lead_id))?;

        get_opt_string(&row, 0)?
            .as_deref()
            .map(parse_enum)
            .transpose()
    }
}

pub(crate) fn not_found(origin: Origin, lead_id: &str) -> DatabaseError {
    DatabaseError::LeadNotFound {
        origin: origin.to_string(),
        lead_id: lead_id.to_string(),
    }
}
