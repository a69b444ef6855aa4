//! Corporate domain extraction from contact emails.

use std::collections::HashSet;

use om_config::{DEFAULT_GENERIC_DOMAINS, ResolutionConfig};

/// Derives a corporate web domain from an email address.
///
/// Addresses at consumer mail providers carry no information about the
/// sender's employer, so their domains are rejected. The denylist is supplied
/// at construction; matching is exact on the whole domain.
#[derive(Debug, Clone)]
pub struct DomainExtractor {
    generic: HashSet<String>,
}

impl DomainExtractor {
    pub fn new<I, S>(generic_domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            generic: generic_domains
                .into_iter()
                .map(|d| d.as_ref().trim().to_lowercase())
                .filter(|d| !d.is_empty())
                .collect(),
        }
    }

    /// Denylist from configuration: the base list plus any extras.
    #[must_use]
    pub fn from_config(config: &ResolutionConfig) -> Self {
        Self::new(config.all_generic_domains())
    }

    #[must_use]
    pub fn is_generic(&self, domain: &str) -> bool {
        self.generic.contains(domain)
    }

    /// Lower-cased domain after the `@`, or `None` when the email is missing
    /// or malformed, or belongs to a generic provider. An address is malformed
    /// unless it has exactly one `@` with text on both sides.
    #[must_use]
    pub fn extract_domain(&self, email: Option<&str>) -> Option<String> {
        let email = email?.trim().to_lowercase();
        let (local, domain) = email.split_once('@')?;
        if local.is_empty() || domain.is_empty() || domain.contains('@') || self.is_generic(domain)
        {
            return None;
        }
        Some(domain.to_string())
    }
}

impl Default for DomainExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_GENERIC_DOMAINS)
    }
}
