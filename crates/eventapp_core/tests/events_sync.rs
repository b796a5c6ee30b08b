//! Live event list: full snapshots, schema failures, listener release.

use crate::common::app_instance::alice_and_bob;
use crate::common::test_helpers::{fields, meetup, next_item};
use eventapp_core::store::{InMemoryStore, EVENTS};
use eventapp_core::{AppError, EventPatch, StoreError};
use pretty_assertions::assert_eq;
use serde_json::json;

#[tokio::test]
async fn alice_creates_meetup_and_both_clients_see_it() {
    let (app1, alice, app2, _bob) = alice_and_bob().await;
    let mut alice_feed = app1.services.events.watch_all();
    let mut bob_feed = app2.services.events.watch_all();
    assert_eq!(next_item(&mut alice_feed).await.unwrap(), vec![]);
    assert_eq!(next_item(&mut bob_feed).await.unwrap(), vec![]);

    let id = app1.services.events.create(&alice, meetup()).await.unwrap();

    for feed in [&mut alice_feed, &mut bob_feed] {
        let events = next_item(feed).await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, id);
        assert_eq!(events[0].name, "Meetup");
        assert_eq!(events[0].creator_id.as_str(), "alice");
        assert_eq!(events[0].creator_email.as_deref(), Some("alice@example.com"));
        assert_eq!(events[0].date_label(), "2024-05-01");
    }
}

#[tokio::test]
async fn missing_creator_aborts_the_emission() {
    let (app1, alice, _app2, _bob) = alice_and_bob().await;
    app1.services.events.create(&alice, meetup()).await.unwrap();
    let mut feed = app1.services.events.watch_all();
    assert_eq!(next_item(&mut feed).await.unwrap().len(), 1);

    app1.store.insert_raw(EVENTS, "orphan", fields(json!({"name": "No owner"})));
    match next_item(&mut feed).await {
        Err(AppError::Data(msg)) => assert!(msg.contains("Creator ID missing"), "{}", msg),
        other => panic!("expected DataError, got {:?}", other),
    }

    // Repairing the record lets the next full snapshot through.
    app1.store
        .insert_raw(EVENTS, "orphan", fields(json!({"name": "Adopted", "creatorId": "bob"})));
    let events = next_item(&mut feed).await.unwrap();
    assert_eq!(events.len(), 2);
}

#[tokio::test]
async fn owner_update_reaches_watchers_with_only_patched_fields() {
    let (app1, alice, app2, _bob) = alice_and_bob().await;
    app1.services.events.create(&alice, meetup()).await.unwrap();
    let mut feed = app2.services.events.watch_all();
    let event = next_item(&mut feed).await.unwrap().remove(0);

    let patch = EventPatch {
        location: Some("Hall".into()),
        ..Default::default()
    };
    app1.services.events.update(&alice, &event, patch).await.unwrap();
    let updated = next_item(&mut feed).await.unwrap().remove(0);
    assert_eq!(updated.location, "Hall");
    assert_eq!(updated.name, "Meetup");
    assert_eq!(updated.creator_id, event.creator_id);
}

#[tokio::test]
async fn dropping_the_feed_releases_the_watcher() {
    let store = InMemoryStore::new();
    let app = crate::common::app_instance::AppInstance::new(&store);
    let feed = app.services.events.watch_all();
    let mut again = app.services.events.watch_all();
    assert_eq!(store.watcher_count(), 2);
    drop(feed);
    assert_eq!(store.watcher_count(), 1);
    again.close();
    assert_eq!(store.watcher_count(), 0);
    assert!(!again.is_live());
}

#[tokio::test]
async fn watch_failure_is_surfaced_then_feed_ends() {
    let (app1, _alice, _app2, _bob) = alice_and_bob().await;
    let mut feed = app1.services.events.watch_all();
    next_item(&mut feed).await.unwrap();
    app1.store
        .fail_watchers(EVENTS, StoreError::PermissionDenied("rules".into()));
    assert!(matches!(next_item(&mut feed).await, Err(AppError::Permission(_))));
    assert_eq!(app1.store.watcher_count(), 0);
}

#[tokio::test]
async fn get_runs_through_the_schema() {
    let (app1, alice, _app2, _bob) = alice_and_bob().await;
    let id = app1.services.events.create(&alice, meetup()).await.unwrap();
    let event = app1.services.events.get(&id).await.unwrap().unwrap();
    assert_eq!(event.location, "Park");

    app1.store
        .insert_raw(
            EVENTS,
            "bad-date",
            fields(json!({"creatorId": "alice", "date": "01/05/2024"})),
        );
    let bad = eventapp_core::EventId::parse("bad-date").unwrap();
    assert!(matches!(app1.services.events.get(&bad).await, Err(AppError::Data(_))));
    let gone = eventapp_core::EventId::parse("nope").unwrap();
    assert_eq!(app1.services.events.get(&gone).await.unwrap(), None);
}
