//! Resolution strategy configuration.

use serde::{Deserialize, Serialize};

/// Consumer mail providers whose domains say nothing about the sender's employer.
pub const DEFAULT_GENERIC_DOMAINS: &[&str] = &[
    "gmail.com",
    "googlemail.com",
    "outlook.com",
    "outlook.es",
    "hotmail.com",
    "hotmail.es",
    "hotmail.co.uk",
    "hotmail.fr",
    "live.com",
    "msn.com",
    "yahoo.com",
    "yahoo.es",
    "yahoo.co.uk",
    "yahoo.fr",
    "ymail.com",
    "icloud.com",
    "me.com",
    "mac.com",
    "aol.com",
    "protonmail.com",
    "proton.me",
    "gmx.com",
    "gmx.de",
    "gmx.net",
    "web.de",
    "mail.com",
    "zoho.com",
    "yandex.com",
    "yandex.ru",
    "mail.ru",
    "qq.com",
    "163.com",
    "orange.fr",
    "free.fr",
    "laposte.net",
    "libero.it",
    "telefonica.net",
];

const DEFAULT_DECISION_MAKER_TITLES: &[&str] = &[
    "ceo",
    "founder",
    "co-founder",
    "cto",
    "coo",
    "managing director",
    "head of marketing",
    "marketing director",
];

const fn default_similarity_threshold() -> f64 {
    0.85
}

const fn default_true() -> bool {
    true
}

fn default_generic_domains() -> Vec<String> {
    DEFAULT_GENERIC_DOMAINS.iter().map(ToString::to_string).collect()
}

fn default_decision_maker_titles() -> Vec<String> {
    DEFAULT_DECISION_MAKER_TITLES
        .iter()
        .map(ToString::to_string)
        .collect()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolutionConfig {
    /// Minimum name similarity for a search candidate to count as a clear match.
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,

    /// Location passed to name and people searches (e.g. "Spain"). Empty means none.
    #[serde(default)]
    pub region_hint: String,

    /// Base denylist of generic mail domains. Overriding replaces the built-in list.
    #[serde(default = "default_generic_domains")]
    pub generic_domains: Vec<String>,

    /// Extra generic domains appended to `generic_domains`.
    #[serde(default)]
    pub extra_generic_domains: Vec<String>,

    /// Whether to look up decision-makers after a successful resolution.
    #[serde(default = "default_true")]
    pub people_search: bool,

    /// Job titles used to filter the decision-maker search.
    #[serde(default = "default_decision_maker_titles")]
    pub decision_maker_titles: Vec<String>,
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: default_similarity_threshold(),
            region_hint: String::new(),
            generic_domains: default_generic_domains(),
            extra_generic_domains: Vec::new(),
            people_search: default_true(),
            decision_maker_titles: default_decision_maker_titles(),
        }
    }
}

impl ResolutionConfig {
    /// The effective denylist: base list followed by the extras.
    pub fn all_generic_domains(&self) -> impl Iterator<Item = &str> {
        self.generic_domains
            .iter()
            .chain(&self.extra_generic_domains)
            .map(String::as_str)
    }

    /// Region hint, or `None` when unset.
    #[must_use]
    pub fn region(&self) -> Option<&str> {
        let region = self.region_hint.trim();
        (!region.is_empty()).then_some(region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = ResolutionConfig::default();
        assert!((config.similarity_threshold - 0.85).abs() < f64::EPSILON);
        assert!(config.region().is_none());
        assert!(config.people_search);
        assert!(config.generic_domains.iter().any(|d| d == "gmail.com"));
        assert!(config.decision_maker_titles.iter().any(|t| t == "ceo"));
    }

    #[test]
    fn extras_extend_the_base_list() {
        let config = ResolutionConfig {
            extra_generic_domains: vec!["terra.com.br".into()],
            ..ResolutionConfig::default()
        };
        let all: Vec<&str> = config.all_generic_domains().collect();
        assert!(all.contains(&"gmail.com"));
        assert!(all.contains(&"terra.com.br"));
        assert_eq!(all.len(), DEFAULT_GENERIC_DOMAINS.len() + 1);
    }

    #[test]
    fn blank_region_is_none() {
        let config = ResolutionConfig {
            region_hint: "  ".into(),
            ..ResolutionConfig::default()
        };
        assert!(config.region().is_none());
    }
}
