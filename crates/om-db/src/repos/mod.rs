//! Repository methods on [`crate::LeadStore`].
//!
//! Each module adds methods via `impl LeadStore` blocks. Table and column
//! names always come from [`crate::schema::lead_schema`].

pub mod leads;
pub mod resolution;
