//! Lead store lifecycle across every origin table.
//!
//! - insert → running → terminal, through the per-origin field mapping
//! - terminal-state exclusivity after each kind of write
//! - explicit re-resolution from every terminal state

use pretty_assertions::assert_eq;

use om_core::entities::{Candidate, LeadResolution, OrganizationRecord};
use om_core::enums::{Origin, ResolutionStatus};
use om_core::outcome::{ResolutionErrorKind, ResolutionOutcome};
use om_db::LeadStore;
use om_db::error::DatabaseError;

async fn test_store() -> LeadStore {
    LeadStore::open_local(":memory:").await.unwrap()
}

fn outcomes() -> Vec<ResolutionOutcome> {
    vec![
        ResolutionOutcome::Ok {
            organization: OrganizationRecord {
                external_id: "org_1".into(),
                name: "Acme".into(),
                ..OrganizationRecord::default()
            },
            people: Vec::new(),
        },
        ResolutionOutcome::NeedsReview {
            candidates: vec![
                Candidate {
                    external_id: "org_2".into(),
                    name: "Acme Tools Ltd".into(),
                    ..Candidate::default()
                },
                Candidate {
                    external_id: "org_3".into(),
                    name: "Acme Services Inc".into(),
                    ..Candidate::default()
                },
            ],
        },
        ResolutionOutcome::error(ResolutionErrorKind::NotFound, "no matching organizations found"),
    ]
}

fn assert_exclusive(res: &LeadResolution) {
    match res.status {
        Some(ResolutionStatus::Ok) => {
            assert!(res.organization.is_some());
            assert!(res.candidates.is_empty());
        }
        Some(ResolutionStatus::NeedsReview) => {
            assert!(!res.candidates.is_empty());
            assert_eq!(res.error_message, None);
        }
        Some(ResolutionStatus::Error) => assert!(res.error_message.is_some()),
        other => panic!("not terminal: {other:?}"),
    }
}

#[tokio::test]
async fn every_transition_sequence_stays_exclusive() {
    let store = test_store().await;

    for origin in Origin::ALL {
        let id = store
            .insert_lead(origin, Some("ceo@acme.com"), Some("Acme"))
            .await
            .unwrap();

        // Each outcome followed by each other outcome, via explicit re-runs.
        for first in outcomes() {
            for second in outcomes() {
                for outcome in [&first, &second] {
                    store.mark_running(origin, &id, Some("acme.com")).await.unwrap();
                    store.record_outcome(origin, &id, outcome).await.unwrap();

                    let res = store.get_resolution(origin, &id).await.unwrap();
                    assert_eq!(res.status, Some(outcome.status()));
                    assert_exclusive(&res);
                }
            }
        }
    }
}

#[tokio::test]
async fn error_after_ok_keeps_the_organization() {
    let store = test_store().await;
    let id = store
        .insert_lead(Origin::Event, Some("ceo@acme.com"), None)
        .await
        .unwrap();
    let [ok, _, error] = <[ResolutionOutcome; 3]>::try_from(outcomes()).unwrap();

    store.mark_running(Origin::Event, &id, None).await.unwrap();
    store.record_outcome(Origin::Event, &id, &ok).await.unwrap();
    store.mark_running(Origin::Event, &id, None).await.unwrap();
    store.record_outcome(Origin::Event, &id, &error).await.unwrap();

    let res = store.get_resolution(Origin::Event, &id).await.unwrap();
    assert_eq!(res.status, Some(ResolutionStatus::Error));
    assert_eq!(res.organization_id.as_deref(), Some("org_1"));
    assert!(res.organization.is_some());
}

#[tokio::test]
async fn writes_to_unknown_leads_fail_cleanly() {
    let store = test_store().await;
    let err = store
        .record_outcome(Origin::Import, "imp-00000000", &outcomes()[2])
        .await
        .unwrap_err();
    assert!(matches!(err, DatabaseError::LeadNotFound { .. }));
}
