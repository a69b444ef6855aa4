//! Entity structs for orgmatch domain objects.
//!
//! All structs derive `Serialize` and `Deserialize`; organizations, candidates
//! and people are stored as JSON blobs on the lead row.

mod lead;
mod organization;
mod person;

pub use lead::{Lead, LeadResolution};
pub use organization::{Candidate, OrganizationRecord};
pub use person::DecisionMaker;
