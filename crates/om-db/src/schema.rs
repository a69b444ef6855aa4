//! Per-origin field-mapping table.
//!
//! Each lead origin lives in its own table with its own column names for the
//! contact email and the company. Everything above the store works with the
//! two normalized fields on [`om_core::entities::Lead`] only.

use om_core::enums::Origin;

/// Physical layout of one origin's lead table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeadSchema {
    pub table: &'static str,
    pub email_column: &'static str,
    pub company_column: &'static str,
    /// Prefix for generated lead ids, e.g. `inb` → `inb-a3f8b2c1`.
    pub id_prefix: &'static str,
}

const INBOUND: LeadSchema = LeadSchema {
    table: "inbound_leads",
    email_column: "email",
    company_column: "company",
    id_prefix: "inb",
};

const EVENT: LeadSchema = LeadSchema {
    table: "event_registrations",
    email_column: "contact_email",
    company_column: "organization_name",
    id_prefix: "evt",
};

const IMPORT: LeadSchema = LeadSchema {
    table: "imported_contacts",
    email_column: "work_email",
    company_column: "company_name",
    id_prefix: "imp",
};

/// Look up the table layout for an origin.
///
/// Exhaustive match: adding an `Origin` variant forces a mapping here.
#[must_use]
pub const fn lead_schema(origin: Origin) -> &'static LeadSchema {
    match origin {
        Origin::Inbound => &INBOUND,
        Origin::Event => &EVENT,
        Origin::Import => &IMPORT,
    }
}
