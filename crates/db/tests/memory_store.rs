use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::NaiveDate;
use estate_core::budget::BudgetRange;
use estate_core::lead::NewLead;
use estate_core::roles::{ROLE_ADMIN, ROLE_MEMBER};
use estate_core::status::LeadStatus;
use estate_db::models::staff_user::CreateStaffUser;
use estate_db::{LeadStore, MemoryLeadStore, MemoryStaffStore, StaffStore, StoreError};
use estate_events::{ChangeKind, EventBus};

fn new_lead(name: &str) -> NewLead {
    NewLead {
        full_name: name.into(),
        email: "jane@x.com".into(),
        phone: "2125550100".into(),
        move_in_date: NaiveDate::from_ymd_opt(2099, 1, 1).unwrap(),
        budget_range: BudgetRange::From3kTo5k,
        neighborhoods: vec!["SoHo".into()],
    }
}

#[tokio::test]
async fn insert_forces_new_status_and_lists_newest_first() {
    let store = MemoryLeadStore::new(Arc::new(EventBus::default()));

    let first = store.insert(new_lead("First Lead")).await.unwrap();
    let second = store.insert(new_lead("Second Lead")).await.unwrap();
    assert_eq!(first.status, LeadStatus::New);

    let leads = store.list().await.unwrap();
    assert_eq!(leads.len(), 2);
    assert_eq!(leads[0].id, second.id);
    assert_eq!(leads[1].id, first.id);
}

#[tokio::test]
async fn insert_and_update_publish_changes() {
    let bus = Arc::new(EventBus::default());
    let mut rx = bus.receiver();
    let store = MemoryLeadStore::new(Arc::clone(&bus));

    let lead = store.insert(new_lead("Jane Doe")).await.unwrap();
    let change = rx.recv().await.unwrap();
    assert_eq!(change.kind, ChangeKind::Insert);
    assert_eq!(change.lead_id, lead.id);

    store
        .update_status(lead.id, LeadStatus::Archived)
        .await
        .unwrap();
    assert_eq!(rx.recv().await.unwrap().kind, ChangeKind::Update);
}

#[tokio::test]
async fn update_status_unknown_id_is_none_and_silent() {
    let bus = Arc::new(EventBus::default());
    let mut rx = bus.receiver();
    let store = MemoryLeadStore::new(Arc::clone(&bus));

    let result = store
        .update_status(uuid::Uuid::new_v4(), LeadStatus::Contacted)
        .await
        .unwrap();
    assert!(result.is_none());
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn any_status_transition_is_allowed() {
    let store = MemoryLeadStore::new(Arc::new(EventBus::default()));
    let lead = store.insert(new_lead("Jane Doe")).await.unwrap();

    for status in [LeadStatus::Archived, LeadStatus::New, LeadStatus::Contacted] {
        let updated = store.update_status(lead.id, status).await.unwrap().unwrap();
        assert_eq!(updated.status, status);
    }
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn staff_email_is_unique_case_insensitively() {
    let store = MemoryStaffStore::new();
    let created = store
        .create(CreateStaffUser {
            email: "Admin@Example.com".into(),
            password_hash: "hash".into(),
            role: ROLE_ADMIN.into(),
        })
        .await
        .unwrap();
    assert_eq!(created.id, 1);
    assert!(created.is_admin());

    let dup = store
        .create(CreateStaffUser {
            email: "admin@example.com".into(),
            password_hash: "hash".into(),
            role: ROLE_MEMBER.into(),
        })
        .await;
    assert_matches!(dup, Err(StoreError::Conflict(_)));

    let found = store.find_by_email("ADMIN@example.com").await.unwrap();
    assert_eq!(found.map(|u| u.id), Some(1));
    assert!(store.find_by_id(99).await.unwrap().is_none());
}
