//! # om-resolve
//!
//! Lead-to-organization resolution.
//!
//! - [`DomainExtractor`]: corporate domain from a contact email
//! - [`similarity`]: cheap company-name match score
//! - [`ResolutionStrategy`]: the decision tree over directory lookups
//! - [`Resolver`]: state machine and write-back around one attempt
//!
//! ```ignore
//! let resolver = Resolver::from_config(&config)?;
//! let outcome = resolver
//!     .resolve_lead(&store, Origin::Inbound, "inb-a3f8b2c1", &CancellationToken::new())
//!     .await;
//! ```

pub mod domain;
pub mod session;
pub mod similarity;
pub mod strategy;

pub use domain::DomainExtractor;
pub use session::{ResolutionSession, Resolver};
pub use similarity::similarity;
pub use strategy::{ResolutionStrategy, select_clear_match};
