//! In-process document store with live watches. Backs the `memory` backend and doubles as the
//! store spy in tests (call counters, injected failures, raw inserts).

use super::{matches_all, Document, DocumentStore, Fields, Filter, SnapshotListener};
use crate::error::StoreError;
use crate::subscription::{lock, Subscription};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StoreOp {
    Get,
    Add,
    Set,
    Update,
    Delete,
    Query,
    Watch,
}

struct Watcher {
    collection: String,
    filters: Vec<Filter>,
    listener: Arc<SnapshotListener>,
}

#[derive(Default)]
struct State {
    collections: HashMap<String, BTreeMap<String, Fields>>,
    watchers: BTreeMap<u64, Watcher>,
    next_watcher: u64,
    calls: HashMap<StoreOp, usize>,
    fail_next: Option<StoreError>,
}

impl State {
    fn snapshot(&self, collection: &str, filters: &[Filter]) -> Vec<Document> {
        self.collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|(_, fields)| matches_all(filters, fields))
                    .map(|(id, fields)| Document {
                        id: id.clone(),
                        fields: fields.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Count the call and consume an injected failure, if any.
    fn begin(&mut self, op: StoreOp) -> Result<(), StoreError> {
        *self.calls.entry(op).or_insert(0) += 1;
        match self.fail_next.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

type Delivery = (Arc<SnapshotListener>, Result<Vec<Document>, StoreError>);

#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<State>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times `op` was invoked, including failed calls.
    pub fn calls(&self, op: StoreOp) -> usize {
        lock(&self.state).calls.get(&op).copied().unwrap_or(0)
    }

    /// Make the next non-watch operation fail with `err`.
    pub fn fail_next(&self, err: StoreError) {
        lock(&self.state).fail_next = Some(err);
    }

    pub fn watcher_count(&self) -> usize {
        lock(&self.state).watchers.len()
    }

    pub fn documents(&self, collection: &str) -> Vec<Document> {
        lock(&self.state).snapshot(collection, &[])
    }

    /// Write a document as-is, bypassing counters, and notify watchers. Used to seed records a
    /// well-behaved client would never write.
    pub fn insert_raw(&self, collection: &str, id: &str, fields: Fields) {
        let deliveries = {
            let mut state = lock(&self.state);
            state
                .collections
                .entry(collection.to_string())
                .or_default()
                .insert(id.to_string(), fields);
            Self::pending_deliveries(&state, collection)
        };
        Self::deliver(deliveries);
    }

    /// Deliver `err` to every watcher of `collection` and drop those watchers.
    pub fn fail_watchers(&self, collection: &str, err: StoreError) {
        let listeners: Vec<Arc<SnapshotListener>> = {
            let mut state = lock(&self.state);
            let ids: Vec<u64> = state
                .watchers
                .iter()
                .filter(|(_, w)| w.collection == collection)
                .map(|(id, _)| *id)
                .collect();
            ids.into_iter()
                .filter_map(|id| state.watchers.remove(&id))
                .map(|w| w.listener)
                .collect()
        };
        for listener in listeners {
            listener(Err(err.clone()));
        }
    }

    fn pending_deliveries(state: &State, collection: &str) -> Vec<Delivery> {
        state
            .watchers
            .values()
            .filter(|w| w.collection == collection)
            .map(|w| (w.listener.clone(), Ok(state.snapshot(collection, &w.filters))))
            .collect()
    }

    /// Listeners run with the state lock released.
    fn deliver(deliveries: Vec<Delivery>) {
        for (listener, snapshot) in deliveries {
            listener(snapshot);
        }
    }

    fn mutate<T>(
        &self,
        op: StoreOp,
        collection: &str,
        f: impl FnOnce(&mut BTreeMap<String, Fields>) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let (out, deliveries) = {
            let mut state = lock(&self.state);
            state.begin(op)?;
            let docs = state.collections.entry(collection.to_string()).or_default();
            let out = f(docs)?;
            (out, Self::pending_deliveries(&state, collection))
        };
        Self::deliver(deliveries);
        Ok(out)
    }
}

fn new_document_id() -> String {
    Uuid::new_v4().simple().to_string()[..20].to_string()
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let mut state = lock(&self.state);
        state.begin(StoreOp::Get)?;
        Ok(state
            .collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .map(|fields| Document {
                id: id.to_string(),
                fields: fields.clone(),
            }))
    }

    async fn add(&self, collection: &str, fields: Fields) -> Result<String, StoreError> {
        self.mutate(StoreOp::Add, collection, |docs| {
            let id = new_document_id();
            docs.insert(id.clone(), fields);
            Ok(id)
        })
    }

    async fn set(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        self.mutate(StoreOp::Set, collection, |docs| {
            docs.insert(id.to_string(), fields);
            Ok(())
        })
    }

    async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        self.mutate(StoreOp::Update, collection, |docs| {
            let existing = docs
                .get_mut(id)
                .ok_or_else(|| StoreError::NotFound(format!("{}/{}", collection, id)))?;
            for (k, v) in fields {
                existing.insert(k, v);
            }
            Ok(())
        })
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        self.mutate(StoreOp::Delete, collection, |docs| {
            docs.remove(id);
            Ok(())
        })
    }

    async fn query(
        &self,
        collection: &str,
        filters: Vec<Filter>,
    ) -> Result<Vec<Document>, StoreError> {
        let mut state = lock(&self.state);
        state.begin(StoreOp::Query)?;
        Ok(state.snapshot(collection, &filters))
    }

    fn watch(
        &self,
        collection: &str,
        filters: Vec<Filter>,
        listener: SnapshotListener,
    ) -> Subscription {
        let listener = Arc::new(listener);
        let (id, initial) = {
            let mut state = lock(&self.state);
            *state.calls.entry(StoreOp::Watch).or_insert(0) += 1;
            let id = state.next_watcher;
            state.next_watcher += 1;
            let initial = state.snapshot(collection, &filters);
            state.watchers.insert(
                id,
                Watcher {
                    collection: collection.to_string(),
                    filters,
                    listener: listener.clone(),
                },
            );
            (id, initial)
        };
        log::debug!("memory store: watch #{} on {}", id, collection);
        listener(Ok(initial));
        let weak = Arc::downgrade(&self.state);
        Subscription::new(move || {
            if let Some(state) = weak.upgrade() {
                lock(&state).watchers.remove(&id);
                log::debug!("memory store: watch #{} released", id);
            }
        })
    }
}
