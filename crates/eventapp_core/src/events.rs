//! Event repository over the `events` collection.

use crate::error::AppError;
use crate::feed::Feed;
use crate::ids::EventId;
use crate::models::{Event, EventDraft, EventPatch};
use crate::schema;
use crate::session::Session;
use crate::store::{DocumentStore, EVENTS};
use std::sync::Arc;

pub type EventsSnapshot = Result<Vec<Event>, AppError>;

/// Proof that ownership was checked and the user was asked to confirm. Only
/// [`EventRepository::prepare_remove`] hands these out.
#[derive(Debug)]
pub struct PendingDelete {
    event: Event,
}

impl PendingDelete {
    pub fn event(&self) -> &Event {
        &self.event
    }
}

#[derive(Clone)]
pub struct EventRepository {
    store: Arc<dyn DocumentStore>,
}

impl EventRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Live list of every event. Each item is the whole collection; a document that fails the
    /// schema turns that item into `Err(Data)` instead of a shorter list.
    pub fn watch_all(&self) -> Feed<EventsSnapshot> {
        Feed::attach(|tx| {
            self.store.watch(
                EVENTS,
                Vec::new(),
                Box::new(move |snapshot| {
                    let item = snapshot
                        .map_err(AppError::from)
                        .and_then(|docs| schema::events_from_documents(&docs));
                    match &item {
                        Ok(events) => log::debug!("events: snapshot of {}", events.len()),
                        Err(e) => log::warn!("events: snapshot failed: {}", e),
                    }
                    tx.send(item);
                }),
            )
        })
    }

    pub async fn get(&self, id: &EventId) -> Result<Option<Event>, AppError> {
        match self.store.get(EVENTS, id.as_str()).await? {
            Some(doc) => schema::event_from_document(&doc).map(Some),
            None => Ok(None),
        }
    }

    /// Validates the draft before anything else, including the session check.
    pub async fn create(&self, session: &Session, draft: EventDraft) -> Result<EventId, AppError> {
        let missing = draft.missing_fields();
        if !missing.is_empty() {
            return Err(AppError::validation(missing));
        }
        let user = session.user()?;
        let id = self.store.add(EVENTS, schema::event_fields(&draft, user)).await?;
        log::info!("events: {} created {}", user.uid, id);
        EventId::parse(id).map_err(AppError::Remote)
    }

    /// Writes only the fields present in `patch`.
    pub async fn update(
        &self,
        session: &Session,
        event: &Event,
        patch: EventPatch,
    ) -> Result<(), AppError> {
        let user = session.authorize_owner(event, "edit")?;
        let blank = patch.blank_fields();
        if !blank.is_empty() {
            return Err(AppError::validation(blank));
        }
        if patch.is_empty() {
            log::debug!("events: empty patch for {}", event.id);
            return Ok(());
        }
        self.store
            .update(EVENTS, event.id.as_str(), schema::patch_fields(&patch))
            .await?;
        log::info!("events: {} updated {}", user.uid, event.id);
        Ok(())
    }

    /// First step of a delete. Refuses non-owners before the user is asked to confirm.
    pub fn prepare_remove(
        &self,
        session: &Session,
        event: &Event,
    ) -> Result<PendingDelete, AppError> {
        session.authorize_owner(event, "delete")?;
        Ok(PendingDelete { event: event.clone() })
    }

    /// Second step, after confirmation. Ownership is checked again against `session`.
    pub async fn remove(&self, session: &Session, pending: PendingDelete) -> Result<(), AppError> {
        let user = session.authorize_owner(&pending.event, "delete")?;
        self.store.delete(EVENTS, pending.event.id.as_str()).await?;
        log::info!("events: {} deleted {}", user.uid, pending.event.id);
        Ok(())
    }
}
