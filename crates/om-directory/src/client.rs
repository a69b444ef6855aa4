//! Retrying directory client.
//!
//! Wraps a [`DirectoryApi`] with a hard per-call timeout, a fixed back-off on
//! rate limiting, a bounded retry on transient failures, cooperative
//! cancellation and payload shaping. Every operation returns a [`Lookup`].

use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use om_config::DirectoryConfig;
use om_core::entities::{Candidate, DecisionMaker, OrganizationRecord};
use om_core::limits::{MAX_CANDIDATES, MAX_PEOPLE};

use crate::api::{DirectoryApi, OrganizationQuery, PeopleQuery};
use crate::error::DirectoryError;
use crate::lookup::{DirectoryFailure, FailureKind, Lookup};

/// Timeout and retry budget applied to every directory operation.
///
/// The two retry counters share one attempt budget of
/// `1 + max(rate_limit_retries, transient_retries)`, so a single operation
/// takes at most that many `call_timeout`s plus back-offs.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Hard budget for a single attempt.
    pub call_timeout: Duration,
    /// Fixed wait after a rate-limited attempt.
    pub rate_limit_backoff: Duration,
    /// Retries granted after rate-limited attempts.
    pub rate_limit_retries: u32,
    /// Wait after a timeout, transport failure or server error.
    pub transient_backoff: Duration,
    /// Retries granted after transient failures.
    pub transient_retries: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            call_timeout: Duration::from_secs(30),
            rate_limit_backoff: Duration::from_secs(2),
            rate_limit_retries: 1,
            transient_backoff: Duration::from_millis(500),
            transient_retries: 1,
        }
    }
}

impl RetryPolicy {
    /// Upper bound on attempts for one logical operation.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        let retries = if self.rate_limit_retries > self.transient_retries {
            self.rate_limit_retries
        } else {
            self.transient_retries
        };
        retries.saturating_add(1)
    }

    #[must_use]
    pub const fn from_config(config: &DirectoryConfig) -> Self {
        Self {
            call_timeout: config.timeout(),
            rate_limit_backoff: config.rate_limit_backoff(),
            rate_limit_retries: config.rate_limit_retries,
            transient_backoff: config.transient_backoff(),
            transient_retries: config.transient_retries,
        }
    }
}

/// Directory access used by the resolution strategy.
pub struct DirectoryClient<A> {
    api: A,
    policy: RetryPolicy,
    page_size: u32,
}

impl<A: DirectoryApi> DirectoryClient<A> {
    #[must_use]
    pub fn new(api: A, policy: RetryPolicy) -> Self {
        Self {
            api,
            policy,
            page_size: 10,
        }
    }

    /// Set how many candidates a name search requests.
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.clamp(1, MAX_CANDIDATES as u32);
        self
    }

    /// Access the wrapped API (e.g. to inspect a test stub).
    #[must_use]
    pub const fn api(&self) -> &A {
        &self.api
    }

    #[must_use]
    pub const fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Enrich an organization by web domain.
    pub async fn enrich_by_domain(
        &self,
        domain: &str,
        cancel: &CancellationToken,
    ) -> Lookup<OrganizationRecord> {
        self.call("enrich_by_domain", cancel, || {
            self.api.enrich_organization(domain)
        })
        .await
        .map(OrganizationRecord::bounded)
    }

    /// Search organizations by name, in the directory's order.
    pub async fn search_by_name(
        &self,
        name: &str,
        region: Option<&str>,
        cancel: &CancellationToken,
    ) -> Lookup<Vec<Candidate>> {
        let query = OrganizationQuery {
            name,
            region,
            per_page: self.page_size,
        };
        let max = (self.page_size as usize).min(MAX_CANDIDATES);
        self.call("search_by_name", cancel, || {
            self.api.search_organizations(&query)
        })
        .await
        .map(|mut candidates| {
            candidates.truncate(max);
            candidates
        })
    }

    /// Search decision-makers at a resolved organization.
    pub async fn search_people(
        &self,
        organization_id: &str,
        titles: &[String],
        region: Option<&str>,
        cancel: &CancellationToken,
    ) -> Lookup<Vec<DecisionMaker>> {
        let query = PeopleQuery {
            organization_id,
            titles,
            region,
            per_page: MAX_PEOPLE as u32,
        };
        self.call("search_people", cancel, || self.api.search_people(&query))
            .await
            .map(|mut people| {
                people.truncate(MAX_PEOPLE);
                people
            })
    }

    /// Run one logical operation under the retry policy.
    ///
    /// An exhausted rate-limit budget is reported as a `Failure` with
    /// [`FailureKind::RateLimited`].
    async fn call<T, F, Fut>(
        &self,
        operation: &'static str,
        cancel: &CancellationToken,
        mut attempt_fn: F,
    ) -> Lookup<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, DirectoryError>>,
    {
        let max_attempts = self.policy.max_attempts();
        let mut attempt = 0u32;
        let mut rate_limit_retries = 0u32;
        let mut transient_retries = 0u32;

        loop {
            attempt += 1;
            tracing::debug!(operation, attempt, "directory call");

            let timeout_secs = self.policy.call_timeout.as_secs();
            let result = tokio::select! {
                biased;
                () = cancel.cancelled() => Err(DirectoryError::Cancelled),
                r = tokio::time::timeout(self.policy.call_timeout, attempt_fn()) => {
                    r.unwrap_or(Err(DirectoryError::Timeout { secs: timeout_secs }))
                }
            };
            let can_retry = attempt < max_attempts;

            let delay = match result {
                Err(DirectoryError::RateLimited { retry_after_secs })
                    if can_retry && rate_limit_retries < self.policy.rate_limit_retries =>
                {
                    rate_limit_retries += 1;
                    tracing::warn!(
                        operation,
                        attempt,
                        retry_after_secs,
                        delay = ?self.policy.rate_limit_backoff,
                        "directory rate limited, backing off"
                    );
                    self.policy.rate_limit_backoff
                }
                Err(DirectoryError::RateLimited { .. }) => {
                    return Lookup::Failure(DirectoryFailure::new(
                        FailureKind::RateLimited,
                        format!(
                            "rate limited by directory service ({operation}, {attempt} attempts); try again later"
                        ),
                    ));
                }
                other => match Lookup::from(other) {
                    Lookup::Failure(failure)
                        if can_retry
                            && failure.kind.is_transient()
                            && transient_retries < self.policy.transient_retries =>
                    {
                        transient_retries += 1;
                        tracing::warn!(
                            operation,
                            attempt,
                            error = %failure,
                            delay = ?self.policy.transient_backoff,
                            "directory call failed, retrying"
                        );
                        self.policy.transient_backoff
                    }
                    settled => return settled,
                },
            };

            if !pause(delay, cancel).await {
                return Lookup::Failure(DirectoryFailure::new(
                    FailureKind::Cancelled,
                    "directory call cancelled",
                ));
            }
        }
    }
}

/// Sleep for `delay` unless cancelled first. Returns `false` on cancellation.
async fn pause(delay: Duration, cancel: &CancellationToken) -> bool {
    tokio::select! {
        biased;
        () = cancel.cancelled() => false,
        () = tokio::time::sleep(delay) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[derive(Clone, Copy)]
    enum Behavior {
        AlwaysRateLimited,
        RateLimitedOnce,
        RateLimitedThenHang,
        AlwaysServerError,
        ServerErrorOnce,
        NotFound,
        Malformed,
        Hang,
    }

    struct StubApi {
        behavior: Behavior,
        calls: AtomicU32,
    }

    impl StubApi {
        fn new(behavior: Behavior) -> Self {
            Self {
                behavior,
                calls: AtomicU32::new(0),
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }

        async fn respond<T: Default>(&self) -> Result<T, DirectoryError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            match self.behavior {
                Behavior::AlwaysRateLimited => Err(DirectoryError::RateLimited {
                    retry_after_secs: 60,
                }),
                Behavior::RateLimitedOnce if n == 1 => Err(DirectoryError::RateLimited {
                    retry_after_secs: 1,
                }),
                Behavior::RateLimitedThenHang if n == 1 => Err(DirectoryError::RateLimited {
                    retry_after_secs: 1,
                }),
                Behavior::AlwaysServerError => Err(DirectoryError::Api {
                    status: 502,
                    message: "bad gateway".into(),
                }),
                Behavior::ServerErrorOnce if n == 1 => Err(DirectoryError::Api {
                    status: 500,
                    message: "boom".into(),
                }),
                Behavior::NotFound => Err(DirectoryError::NotFound { status: 404 }),
                Behavior::Malformed => Err(DirectoryError::Parse("expected value".into())),
                Behavior::Hang | Behavior::RateLimitedThenHang => {
                    tokio::time::sleep(Duration::from_secs(3_600)).await;
                    Ok(T::default())
                }
                Behavior::RateLimitedOnce | Behavior::ServerErrorOnce => Ok(T::default()),
            }
        }
    }

    #[async_trait]
    impl DirectoryApi for StubApi {
        async fn enrich_organization(
            &self,
            _domain: &str,
        ) -> Result<OrganizationRecord, DirectoryError> {
            self.respond().await
        }

        async fn search_organizations(
            &self,
            _query: &OrganizationQuery<'_>,
        ) -> Result<Vec<Candidate>, DirectoryError> {
            self.respond().await
        }

        async fn search_people(
            &self,
            _query: &PeopleQuery<'_>,
        ) -> Result<Vec<DecisionMaker>, DirectoryError> {
            self.respond().await
        }
    }

    fn client(behavior: Behavior) -> DirectoryClient<StubApi> {
        DirectoryClient::new(StubApi::new(behavior), RetryPolicy::default())
    }

    #[tokio::test(start_paused = true)]
    async fn rate_limited_retries_exactly_once() {
        let client = client(Behavior::AlwaysRateLimited);
        let cancel = CancellationToken::new();

        let result = client.enrich_by_domain("acme.com", &cancel).await;

        assert_eq!(client.api().calls(), 2);
        match result {
            Lookup::Failure(failure) => {
                assert_eq!(failure.kind, FailureKind::RateLimited);
                assert!(failure.message.contains("rate limited"));
            }
            other => panic!("expected rate-limit failure, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn rate_limit_backoff_waits_the_fixed_delay() {
        let client = client(Behavior::RateLimitedOnce);
        let cancel = CancellationToken::new();
        let started = tokio::time::Instant::now();

        let result = client.search_by_name("Acme", None, &cancel).await;

        assert!(result.is_success());
        assert_eq!(client.api().calls(), 2);
        assert!(started.elapsed() >= Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn transient_failure_retries_once_then_fails() {
        let client = client(Behavior::AlwaysServerError);
        let cancel = CancellationToken::new();

        let result = client.enrich_by_domain("acme.com", &cancel).await;

        assert_eq!(client.api().calls(), 2);
        assert!(
            matches!(result, Lookup::Failure(ref f) if f.kind == FailureKind::Unavailable && f.message.contains("502"))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn transient_failure_recovers_on_retry() {
        let client = client(Behavior::ServerErrorOnce);
        let cancel = CancellationToken::new();

        let result = client.search_people("o1", &[], None, &cancel).await;

        assert_eq!(client.api().calls(), 2);
        assert_eq!(result, Lookup::Success(Vec::new()));
    }

    #[tokio::test]
    async fn not_found_is_not_retried() {
        let client = client(Behavior::NotFound);
        let cancel = CancellationToken::new();

        let result = client.enrich_by_domain("acme.com", &cancel).await;

        assert_eq!(client.api().calls(), 1);
        assert_eq!(result, Lookup::NotFound);
    }

    #[tokio::test]
    async fn malformed_payload_is_not_retried() {
        let client = client(Behavior::Malformed);
        let cancel = CancellationToken::new();

        let result = client.enrich_by_domain("acme.com", &cancel).await;

        assert_eq!(client.api().calls(), 1);
        assert!(matches!(result, Lookup::Failure(ref f) if f.kind == FailureKind::Malformed));
    }

    #[tokio::test(start_paused = true)]
    async fn hung_call_times_out_and_retries() {
        let client = client(Behavior::Hang);
        let cancel = CancellationToken::new();

        let result = client.enrich_by_domain("acme.com", &cancel).await;

        assert_eq!(client.api().calls(), 2);
        assert!(
            matches!(result, Lookup::Failure(ref f) if f.kind == FailureKind::Unavailable && f.message.contains("timed out"))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn mixed_failures_share_one_attempt_budget() {
        let client = client(Behavior::RateLimitedThenHang);
        let cancel = CancellationToken::new();
        let started = tokio::time::Instant::now();

        let result = client.enrich_by_domain("acme.com", &cancel).await;

        assert_eq!(client.api().calls(), 2);
        assert!(
            matches!(result, Lookup::Failure(ref f) if f.kind == FailureKind::Unavailable && f.message.contains("timed out"))
        );
        let policy = RetryPolicy::default();
        assert!(
            started.elapsed()
                <= policy.call_timeout * policy.max_attempts()
                    + policy.rate_limit_backoff
                    + policy.transient_backoff
        );
    }

    #[test]
    fn max_attempts_follows_the_larger_retry_count() {
        assert_eq!(RetryPolicy::default().max_attempts(), 2);
        let policy = RetryPolicy {
            rate_limit_retries: 3,
            transient_retries: 1,
            ..RetryPolicy::default()
        };
        assert_eq!(policy.max_attempts(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_interrupts_in_flight_call() {
        let client = client(Behavior::Hang);
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            trigger.cancel();
        });

        let result = client.enrich_by_domain("acme.com", &cancel).await;

        assert_eq!(client.api().calls(), 1);
        assert!(matches!(result, Lookup::Failure(ref f) if f.kind == FailureKind::Cancelled));
    }

    #[tokio::test]
    async fn already_cancelled_token_skips_the_call() {
        let client = client(Behavior::NotFound);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = client.enrich_by_domain("acme.com", &cancel).await;

        assert_eq!(client.api().calls(), 0);
        assert!(matches!(result, Lookup::Failure(ref f) if f.kind == FailureKind::Cancelled));
    }

    #[test]
    fn policy_from_config_uses_configured_budgets() {
        let config = DirectoryConfig {
            timeout_secs: 5,
            rate_limit_backoff_ms: 100,
            rate_limit_retries: 3,
            ..DirectoryConfig::default()
        };
        let policy = RetryPolicy::from_config(&config);
        assert_eq!(policy.call_timeout, Duration::from_secs(5));
        assert_eq!(policy.rate_limit_backoff, Duration::from_millis(100));
        assert_eq!(policy.rate_limit_retries, 3);
    }
}
