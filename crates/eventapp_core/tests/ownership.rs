//! Ownership and validation gates: refused operations never reach the store.

use crate::common::app_instance::alice_and_bob;
use crate::common::test_helpers::{meetup, next_item};
use eventapp_core::store::{StoreOp, EVENTS};
use eventapp_core::{AppError, EventDraft, EventPatch, Session};

#[tokio::test]
async fn bob_cannot_remove_or_edit_alices_event() {
    let (app1, alice, app2, bob) = alice_and_bob().await;
    app1.services.events.create(&alice, meetup()).await.unwrap();
    let mut feed = app2.services.events.watch_all();
    let event = next_item(&mut feed).await.unwrap().remove(0);

    assert!(matches!(
        app2.services.events.prepare_remove(&bob, &event),
        Err(AppError::Permission(_))
    ));
    let patch = EventPatch {
        name: Some("Bob's now".into()),
        ..Default::default()
    };
    assert!(matches!(
        app2.services.events.update(&bob, &event, patch).await,
        Err(AppError::Permission(_))
    ));
    assert_eq!(app2.store.calls(StoreOp::Delete), 0);
    assert_eq!(app2.store.calls(StoreOp::Update), 0);
    assert_eq!(app2.store.documents(EVENTS).len(), 1);
}

#[tokio::test]
async fn owner_delete_is_two_step() {
    let (app1, alice, _app2, _bob) = alice_and_bob().await;
    app1.services.events.create(&alice, meetup()).await.unwrap();
    let mut feed = app1.services.events.watch_all();
    let event = next_item(&mut feed).await.unwrap().remove(0);

    let pending = app1.services.events.prepare_remove(&alice, &event).unwrap();
    assert_eq!(app1.store.calls(StoreOp::Delete), 0);
    app1.services.events.remove(&alice, pending).await.unwrap();
    assert_eq!(app1.store.calls(StoreOp::Delete), 1);
    assert_eq!(next_item(&mut feed).await.unwrap(), vec![]);
}

#[tokio::test]
async fn empty_fields_fail_before_any_remote_call() {
    let (app1, alice, _app2, _bob) = alice_and_bob().await;
    for draft in [
        EventDraft {
            name: " ".into(),
            ..meetup()
        },
        EventDraft {
            description: String::new(),
            ..meetup()
        },
        EventDraft {
            location: String::new(),
            ..meetup()
        },
        EventDraft { date: None, ..meetup() },
    ] {
        assert!(matches!(
            app1.services.events.create(&alice, draft.clone()).await,
            Err(AppError::Validation { .. })
        ));
        // Validation comes before the session check.
        assert!(matches!(
            app1.services.events.create(&Session::signed_out(), draft).await,
            Err(AppError::Validation { .. })
        ));
    }
    assert_eq!(app1.store.calls(StoreOp::Add), 0);
}

#[tokio::test]
async fn create_without_session_is_auth_error() {
    let (app1, _alice, _app2, _bob) = alice_and_bob().await;
    assert!(matches!(
        app1.services.events.create(&Session::signed_out(), meetup()).await,
        Err(AppError::Auth(_))
    ));
    assert_eq!(app1.store.calls(StoreOp::Add), 0);
}
