//! One resolution attempt for one lead, from `running` to a terminal state.
//!
//! The `running` marker is written before the first directory call. The
//! terminal write happens exactly once per session, unless the caller
//! cancels, in which case nothing beyond the marker is written and the lead
//! stays visible to stale-run detection. Sessions on the same lead do not
//! coordinate: the last terminal write wins.

use tokio_util::sync::CancellationToken;

use om_config::{OrgMatchConfig, ResolutionConfig};
use om_core::enums::{Origin, ResolutionStatus};
use om_core::outcome::{ResolutionErrorKind, ResolutionOutcome};
use om_db::LeadStore;
use om_db::error::DatabaseError;
use om_directory::{DirectoryApi, DirectoryClient, DirectoryError, HttpDirectoryApi};

use crate::domain::DomainExtractor;
use crate::strategy::ResolutionStrategy;

/// Ephemeral context of a single attempt. Never shared across leads.
#[derive(Debug, Clone)]
pub struct ResolutionSession {
    pub origin: Origin,
    pub lead_id: String,
    pub email: Option<String>,
    pub company_name: Option<String>,
    pub email_domain: Option<String>,
    pub status: ResolutionStatus,
    pub error_message: Option<String>,
}

impl ResolutionSession {
    /// Load the lead and persist the `running` marker.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the lead cannot be read or marked.
    pub async fn begin(
        store: &LeadStore,
        extractor: &DomainExtractor,
        origin: Origin,
        lead_id: &str,
    ) -> Result<Self, DatabaseError> {
        let lead = store.load_lead(origin, lead_id).await?;
        let email_domain = extractor.extract_domain(lead.contact_email.as_deref());

        store
            .mark_running(origin, lead_id, email_domain.as_deref())
            .await?;

        Ok(Self {
            origin,
            lead_id: lead.lead_id,
            email: lead.contact_email,
            company_name: lead.company_name,
            email_domain,
            status: ResolutionStatus::Running,
            error_message: None,
        })
    }

    /// Persist the terminal state for `outcome`.
    ///
    /// The row is overwritten unconditionally, so when two sessions run on one
    /// lead the one finishing last decides the stored state.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidState` if this session already finished,
    /// or `DatabaseError` if the write fails. The session stays `running`.
    pub async fn finish(
        &mut self,
        store: &LeadStore,
        outcome: &ResolutionOutcome,
    ) -> Result<(), DatabaseError> {
        let next = outcome.status();
        if !self.status.can_transition_to(next) {
            return Err(DatabaseError::InvalidState(format!(
                "Cannot transition lead {} from {} to {next}",
                self.lead_id, self.status
            )));
        }

        store
            .record_outcome(self.origin, &self.lead_id, outcome)
            .await?;
        self.status = next;
        if let ResolutionOutcome::Error { message, .. } = outcome {
            self.error_message = Some(message.clone());
        }
        Ok(())
    }
}

/// Entry point for resolving leads against a store.
pub struct Resolver<A> {
    strategy: ResolutionStrategy<A>,
}

impl Resolver<HttpDirectoryApi> {
    /// Build a resolver backed by the HTTP directory client.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError` if the HTTP client cannot be built.
    pub fn from_config(config: &OrgMatchConfig) -> Result<Self, DirectoryError> {
        let directory = om_directory::http_client(&config.directory)?;
        Ok(Self::new(directory, &config.resolution))
    }
}

impl<A: DirectoryApi> Resolver<A> {
    #[must_use]
    pub fn new(directory: DirectoryClient<A>, config: &ResolutionConfig) -> Self {
        Self {
            strategy: ResolutionStrategy::new(directory, config),
        }
    }

    #[must_use]
    pub const fn strategy(&self) -> &ResolutionStrategy<A> {
        &self.strategy
    }

    /// Resolve one lead and persist the result.
    ///
    /// Always returns an outcome. Store failures come back as
    /// [`ResolutionErrorKind::Store`]; cancellation as
    /// [`ResolutionErrorKind::Cancelled`] with no terminal write.
    #[tracing::instrument(name = "resolve_lead", skip(self, store, cancel))]
    pub async fn resolve_lead(
        &self,
        store: &LeadStore,
        origin: Origin,
        lead_id: &str,
        cancel: &CancellationToken,
    ) -> ResolutionOutcome {
        if cancel.is_cancelled() {
            return cancelled();
        }

        let mut session =
            match ResolutionSession::begin(store, self.strategy.extractor(), origin, lead_id).await
            {
                Ok(session) => session,
                Err(e) => {
                    tracing::error!(error = %e, "could not start resolution");
                    return store_failure(&e);
                }
            };

        let outcome = self
            .strategy
            .resolve_with_domain(
                session.email_domain.as_deref(),
                session.company_name.as_deref(),
                cancel,
            )
            .await;

        if outcome.error_kind() == Some(ResolutionErrorKind::Cancelled) {
            tracing::info!("resolution cancelled; lead left in running");
            return cancelled();
        }

        if let Err(e) = session.finish(store, &outcome).await {
            tracing::error!(error = %e, status = %outcome.status(), "could not persist resolution");
            let message = format!("lead store: {e}");
            if let Err(e) = store.record_error(origin, lead_id, &message).await {
                tracing::error!(error = %e, "could not persist store failure; lead left in running");
            }
            return ResolutionOutcome::error(ResolutionErrorKind::Store, message);
        }

        match &outcome {
            ResolutionOutcome::Error { kind, message } => {
                tracing::info!(status = %session.status, %kind, message, "resolution finished");
            }
            _ => tracing::info!(status = %session.status, "resolution finished"),
        }
        outcome
    }
}

fn cancelled() -> ResolutionOutcome {
    ResolutionOutcome::error(ResolutionErrorKind::Cancelled, "resolution cancelled")
}

fn store_failure(error: &DatabaseError) -> ResolutionOutcome {
    ResolutionOutcome::error(ResolutionErrorKind::Store, format!("lead store: {error}"))
}
