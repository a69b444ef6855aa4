//! # om-db
//!
//! libSQL lead store for orgmatch.
//!
//! Holds one table per lead origin, each with its own column names for the
//! contact email and company, plus an identical set of resolution columns.
//! The resolution engine reads two normalized fields through the
//! [`schema::lead_schema`] mapping and writes back one terminal state per
//! attempt, each as a single `UPDATE`.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod schema;

#[cfg(test)]
mod test_support;

use error::DatabaseError;
use libsql::Builder;

/// Handle over the lead database.
pub struct LeadStore {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl LeadStore {
    /// Open a local database at the given path. `":memory:"` works for tests.
    ///
    /// Runs migrations on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let store = Self { db, conn };
        store.run_migrations().await?;
        Ok(store)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Generate a prefixed id via libSQL, e.g. `"inb-a3f8b2c1"`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT '{prefix}-' || lower(hex(randomblob(4)))"),
                (),
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }
}
