//! Favorite repository over the `favorites` collection, scoped to the session user.
//!
//! The store has no uniqueness constraint on (userId, eventId). `toggle` is check-then-act with
//! no transaction: two overlapping toggles can leave zero or two records. A later toggle that
//! finds more than one record removes all of them.

use crate::error::AppError;
use crate::feed::Feed;
use crate::ids::EventId;
use crate::models::Event;
use crate::schema;
use crate::session::Session;
use crate::store::{DocumentStore, Filter, EVENTS, FAVORITES};
use futures::future::try_join_all;
use std::collections::BTreeSet;
use std::sync::Arc;

pub type FavoritesSnapshot = Result<BTreeSet<EventId>, AppError>;

#[derive(Clone)]
pub struct FavoriteRepository {
    store: Arc<dyn DocumentStore>,
}

impl FavoriteRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    fn pair_filter(session: &Session, event_id: &EventId) -> Result<Vec<Filter>, AppError> {
        let user = session.user()?;
        Ok(vec![
            Filter::eq(schema::USER_ID, user.uid.as_str()),
            Filter::eq(schema::EVENT_ID, event_id.as_str()),
        ])
    }

    /// Live set of the session user's favorite event IDs. Without a session the feed yields a
    /// single `Err(Auth)` and ends.
    pub fn watch_mine(&self, session: &Session) -> Feed<FavoritesSnapshot> {
        let user = match session.user() {
            Ok(u) => u.clone(),
            Err(e) => return Feed::failed(Err(e)),
        };
        Feed::attach(|tx| {
            self.store.watch(
                FAVORITES,
                vec![Filter::eq(schema::USER_ID, user.uid.as_str())],
                Box::new(move |snapshot| {
                    let item = snapshot.map_err(AppError::from).and_then(|docs| {
                        docs.iter()
                            .map(|d| schema::favorite_from_document(d).map(|f| f.event_id))
                            .collect::<Result<BTreeSet<_>, _>>()
                    });
                    if let Err(e) = &item {
                        log::warn!("favorites: snapshot for {} failed: {}", user.uid, e);
                    }
                    tx.send(item);
                }),
            )
        })
    }

    pub async fn is_favorite(
        &self,
        session: &Session,
        event_id: &EventId,
    ) -> Result<bool, AppError> {
        let filters = Self::pair_filter(session, event_id)?;
        Ok(!self.store.query(FAVORITES, filters).await?.is_empty())
    }

    /// Flip membership of `event_id`. Returns whether it is a favorite afterwards.
    pub async fn toggle(&self, session: &Session, event_id: &EventId) -> Result<bool, AppError> {
        let filters = Self::pair_filter(session, event_id)?;
        let user = session.user()?;
        let existing = self.store.query(FAVORITES, filters).await?;
        if existing.is_empty() {
            let id = self
                .store
                .add(FAVORITES, schema::favorite_fields(&user.uid, event_id))
                .await?;
            log::info!("favorites: {} added {} ({})", user.uid, event_id, id);
            return Ok(true);
        }
        if existing.len() > 1 {
            log::warn!(
                "favorites: {} duplicate records for ({}, {}); removing all",
                existing.len(),
                user.uid,
                event_id
            );
        }
        for doc in &existing {
            self.store.delete(FAVORITES, &doc.id).await?;
        }
        log::info!("favorites: {} removed {}", user.uid, event_id);
        Ok(false)
    }

    /// Fetch each event individually, all lookups in flight together. Results keep the set's
    /// order; events that no longer exist are left out.
    pub async fn resolve_events(&self, ids: &BTreeSet<EventId>) -> Result<Vec<Event>, AppError> {
        let store = &self.store;
        let lookups = ids.iter().map(|id| async move { store.get(EVENTS, id.as_str()).await });
        let docs = try_join_all(lookups).await?;
        let mut events = Vec::with_capacity(docs.len());
        for (id, doc) in ids.iter().zip(docs) {
            match doc {
                Some(doc) => events.push(schema::event_from_document(&doc)?),
                None => log::debug!("favorites: event {} no longer exists", id),
            }
        }
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::UserId;
    use crate::models::SessionUser;
    use crate::store::{Fields, InMemoryStore, StoreOp};
    use serde_json::json;

    fn alice() -> Session {
        Session::signed_in(SessionUser {
            uid: UserId::parse("alice").unwrap(),
            email: None,
        })
    }

    fn fields(v: serde_json::Value) -> Fields {
        v.as_object().cloned().unwrap_or_default()
    }

    #[tokio::test]
    async fn watch_mine_without_session_errors_once() {
        let repo = FavoriteRepository::new(Arc::new(InMemoryStore::new()));
        let mut feed = repo.watch_mine(&Session::signed_out());
        assert!(matches!(feed.next().await, Some(Err(AppError::Auth(_)))));
        assert!(feed.next().await.is_none());
    }

    #[tokio::test]
    async fn toggle_heals_duplicates() {
        let store = InMemoryStore::new();
        store.insert_raw(FAVORITES, "f1", fields(json!({"userId": "alice", "eventId": "ev1"})));
        store.insert_raw(FAVORITES, "f2", fields(json!({"userId": "alice", "eventId": "ev1"})));
        let repo = FavoriteRepository::new(Arc::new(store.clone()));
        let ev1 = EventId::parse("ev1").unwrap();
        assert!(!repo.toggle(&alice(), &ev1).await.unwrap());
        assert!(store.documents(FAVORITES).is_empty());
        assert_eq!(store.calls(StoreOp::Delete), 2);
    }

    #[tokio::test]
    async fn toggle_without_session_touches_nothing() {
        let store = InMemoryStore::new();
        let repo = FavoriteRepository::new(Arc::new(store.clone()));
        let ev1 = EventId::parse("ev1").unwrap();
        assert!(matches!(
            repo.toggle(&Session::signed_out(), &ev1).await,
            Err(AppError::Auth(_))
        ));
        assert_eq!(store.calls(StoreOp::Query), 0);
        assert_eq!(store.calls(StoreOp::Add), 0);
    }

    #[tokio::test]
    async fn malformed_favorite_fails_snapshot() {
        let store = InMemoryStore::new();
        store.insert_raw(FAVORITES, "f1", fields(json!({"userId": "alice"})));
        let repo = FavoriteRepository::new(Arc::new(store));
        let mut feed = repo.watch_mine(&alice());
        assert!(matches!(feed.next().await, Some(Err(AppError::Data(_)))));
    }
}
