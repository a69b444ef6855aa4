//! The resolution decision tree.
//!
//! ```text
//! email ─► domain? ──yes──► enrich_by_domain ──Success──────────────► Ok
//!             │                   │
//!             no            NotFound / Failure
//!             │                   │
//!             ▼                   ▼
//!        company name? ◄──────────┘   (none: Error)
//!             │
//!             ▼
//!      search_by_name ──► clear match? ──yes──► enrich candidate domain ─► Ok
//!                              │                (or synthesize from it)
//!                              no
//!                              ▼
//!                         NeedsReview
//! ```
//!
//! Every `Ok` is then followed by a best-effort decision-maker search whose
//! failures are logged and never change the outcome.

use tokio_util::sync::CancellationToken;

use om_config::ResolutionConfig;
use om_core::entities::{Candidate, DecisionMaker, OrganizationRecord};
use om_core::outcome::{ResolutionErrorKind, ResolutionOutcome};
use om_directory::{DirectoryApi, DirectoryClient, DirectoryFailure, FailureKind, Lookup};

use crate::domain::DomainExtractor;
use crate::similarity::similarity;

/// Pick the candidate to accept automatically, if any.
///
/// A lone candidate is always accepted. Otherwise the first candidate, in
/// the order the directory returned them, whose name scores at least
/// `threshold` against `company_name` wins. When several clear the threshold
/// the result depends on that order alone.
#[must_use]
pub fn select_clear_match<'a>(
    candidates: &'a [Candidate],
    company_name: &str,
    threshold: f64,
) -> Option<&'a Candidate> {
    if let [only] = candidates {
        return Some(only);
    }
    candidates
        .iter()
        .find(|c| similarity(&c.name, company_name) >= threshold)
}

/// Orchestrates domain extraction, directory lookups and name scoring.
pub struct ResolutionStrategy<A> {
    directory: DirectoryClient<A>,
    extractor: DomainExtractor,
    threshold: f64,
    region: Option<String>,
    people_search: bool,
    titles: Vec<String>,
}

impl<A: DirectoryApi> ResolutionStrategy<A> {
    #[must_use]
    pub fn new(directory: DirectoryClient<A>, config: &ResolutionConfig) -> Self {
        Self {
            directory,
            extractor: DomainExtractor::from_config(config),
            threshold: config.similarity_threshold,
            region: config.region().map(String::from),
            people_search: config.people_search,
            titles: config.decision_maker_titles.clone(),
        }
    }

    #[must_use]
    pub const fn extractor(&self) -> &DomainExtractor {
        &self.extractor
    }

    #[must_use]
    pub const fn directory(&self) -> &DirectoryClient<A> {
        &self.directory
    }

    /// Resolve a lead from its raw email and company name.
    pub async fn resolve(
        &self,
        email: Option<&str>,
        company_name: Option<&str>,
        cancel: &CancellationToken,
    ) -> ResolutionOutcome {
        let domain = self.extractor.extract_domain(email);
        self.resolve_with_domain(domain.as_deref(), company_name, cancel)
            .await
    }

    /// Resolve a lead whose email domain has already been extracted.
    pub async fn resolve_with_domain(
        &self,
        domain: Option<&str>,
        company_name: Option<&str>,
        cancel: &CancellationToken,
    ) -> ResolutionOutcome {
        let company_name = company_name.map(str::trim).filter(|n| !n.is_empty());

        let outcome = match (domain, company_name) {
            (Some(domain), company_name) => self.by_domain(domain, company_name, cancel).await,
            (None, Some(name)) => self.by_name(name, cancel).await,
            (None, None) => ResolutionOutcome::error(
                ResolutionErrorKind::Input,
                "no usable email domain and no company name",
            ),
        };

        match outcome {
            ResolutionOutcome::Ok {
                organization,
                people,
            } => self.with_people(organization, people, cancel).await,
            other => other,
        }
    }

    async fn by_domain(
        &self,
        domain: &str,
        company_name: Option<&str>,
        cancel: &CancellationToken,
    ) -> ResolutionOutcome {
        let reason = match self.directory.enrich_by_domain(domain, cancel).await {
            Lookup::Success(organization) => return ok(organization),
            Lookup::NotFound => Miss::NotFound(format!("no organization found for domain {domain}")),
            Lookup::Failure(failure) if failure.kind == FailureKind::Cancelled => {
                return failure_outcome(failure);
            }
            Lookup::Failure(failure) => Miss::Failed(failure),
        };

        match company_name {
            Some(name) => {
                tracing::debug!(domain, %reason, "domain enrichment missed, searching by name");
                self.by_name(name, cancel).await
            }
            None => {
                let message = format!("no company name available ({reason})");
                match reason {
                    Miss::NotFound(_) => {
                        ResolutionOutcome::error(ResolutionErrorKind::NotFound, message)
                    }
                    Miss::Failed(failure) => {
                        ResolutionOutcome::error(error_kind(failure.kind), message)
                    }
                }
            }
        }
    }

    async fn by_name(&self, company_name: &str, cancel: &CancellationToken) -> ResolutionOutcome {
        let candidates = match self
            .directory
            .search_by_name(company_name, self.region.as_deref(), cancel)
            .await
        {
            Lookup::Success(candidates) if !candidates.is_empty() => candidates,
            Lookup::Success(_) | Lookup::NotFound => {
                return ResolutionOutcome::error(
                    ResolutionErrorKind::NotFound,
                    "no matching organizations found",
                );
            }
            Lookup::Failure(failure) => return failure_outcome(failure),
        };

        match select_clear_match(&candidates, company_name, self.threshold) {
            Some(clear) => self.accept(clear, cancel).await,
            None => {
                tracing::debug!(
                    company_name,
                    candidates = candidates.len(),
                    "no clear match among candidates"
                );
                ResolutionOutcome::NeedsReview { candidates }
            }
        }
    }

    /// Enrich the clear match by its domain, falling back to its own fields.
    async fn accept(&self, candidate: &Candidate, cancel: &CancellationToken) -> ResolutionOutcome {
        let Some(domain) = candidate.primary_domain.as_deref() else {
            return ok(OrganizationRecord::from_candidate(candidate));
        };

        match self.directory.enrich_by_domain(domain, cancel).await {
            Lookup::Success(organization) => ok(organization),
            Lookup::Failure(failure) if failure.kind == FailureKind::Cancelled => {
                failure_outcome(failure)
            }
            miss => {
                tracing::debug!(
                    domain,
                    candidate = %candidate.external_id,
                    found = !matches!(miss, Lookup::NotFound),
                    "candidate enrichment missed, using search fields"
                );
                ok(OrganizationRecord::from_candidate(candidate))
            }
        }
    }

    /// Attach decision-makers to an `Ok` outcome. Failures only log.
    async fn with_people(
        &self,
        organization: OrganizationRecord,
        mut people: Vec<DecisionMaker>,
        cancel: &CancellationToken,
    ) -> ResolutionOutcome {
        if !self.people_search || organization.external_id.is_empty() {
            return ResolutionOutcome::Ok {
                organization,
                people,
            };
        }

        match self
            .directory
            .search_people(
                &organization.external_id,
                &self.titles,
                self.region.as_deref(),
                cancel,
            )
            .await
        {
            Lookup::Success(found) => people = found,
            Lookup::NotFound => {}
            Lookup::Failure(failure) if failure.kind == FailureKind::Cancelled => {
                return failure_outcome(failure);
            }
            Lookup::Failure(failure) => {
                tracing::warn!(
                    organization_id = %organization.external_id,
                    error = %failure,
                    "decision-maker search failed; keeping resolution"
                );
            }
        }

        ResolutionOutcome::Ok {
            organization,
            people,
        }
    }
}

/// Why a domain enrichment did not produce an organization.
enum Miss {
    NotFound(String),
    Failed(DirectoryFailure),
}

impl std::fmt::Display for Miss {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(message) => f.write_str(message),
            Self::Failed(failure) => write!(f, "{failure}"),
        }
    }
}

const fn ok(organization: OrganizationRecord) -> ResolutionOutcome {
    ResolutionOutcome::Ok {
        organization,
        people: Vec::new(),
    }
}

fn failure_outcome(failure: DirectoryFailure) -> ResolutionOutcome {
    ResolutionOutcome::error(error_kind(failure.kind), failure.message)
}

const fn error_kind(kind: FailureKind) -> ResolutionErrorKind {
    match kind {
        FailureKind::RateLimited => ResolutionErrorKind::RateLimited,
        FailureKind::Unavailable | FailureKind::Malformed => ResolutionErrorKind::Unavailable,
        FailureKind::Cancelled => ResolutionErrorKind::Cancelled,
    }
}
