use super::{LoadState, Notice, NoticeSlot};
use crate::error::AppError;
use crate::events::{EventRepository, EventsSnapshot, PendingDelete};
use crate::models::Event;
use crate::navigator::{NavCommand, Screen};
use crate::session::Session;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventRow {
    pub event: Event,
    /// Edit and Delete are offered only when set.
    pub is_owner: bool,
}

pub struct EventListView {
    session: Session,
    state: LoadState<Event>,
    pending_delete: Option<PendingDelete>,
    deleting: bool,
    pub notice: NoticeSlot,
}

impl EventListView {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            state: LoadState::Loading,
            pending_delete: None,
            deleting: false,
            notice: NoticeSlot::default(),
        }
    }

    pub fn state(&self) -> &LoadState<Event> {
        &self.state
    }

    /// Replace the list wholesale with the latest snapshot.
    pub fn apply_snapshot(&mut self, snapshot: EventsSnapshot) {
        match snapshot {
            Ok(events) => self.state = LoadState::Ready(events),
            Err(e) => {
                self.state = LoadState::Failed(e.to_string());
                self.notice.set(Notice::from(&e));
            }
        }
    }

    pub fn rows(&self) -> Vec<EventRow> {
        self.state
            .items()
            .iter()
            .map(|event| EventRow {
                is_owner: self.session.is_owner(event),
                event: event.clone(),
            })
            .collect()
    }

    pub fn open_details(&self, event: &Event) -> NavCommand {
        NavCommand::Push(Screen::EventDetails(event.clone()))
    }

    pub fn open_add(&self) -> NavCommand {
        NavCommand::Push(Screen::AddEvent)
    }

    pub fn open_favorites(&self) -> NavCommand {
        NavCommand::Push(Screen::Favorites)
    }

    pub fn open_edit(&mut self, event: &Event) -> Option<NavCommand> {
        if !self.session.is_owner(event) {
            self.notice.set(Notice::from(&AppError::not_owner("edit")));
            return None;
        }
        Some(NavCommand::Push(Screen::EditEvent(event.clone())))
    }

    /// Step one of a delete: ownership check, then hold the request until the user confirms.
    pub fn request_delete(&mut self, events: &EventRepository, event: &Event) {
        match events.prepare_remove(&self.session, event) {
            Ok(pending) => self.pending_delete = Some(pending),
            Err(e) => self.notice.set(Notice::from(&e)),
        }
    }

    /// Event awaiting confirmation, if any.
    pub fn confirming(&self) -> Option<&Event> {
        self.pending_delete.as_ref().map(PendingDelete::event)
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// The user confirmed; hand back the delete to issue.
    pub fn confirm_delete(&mut self) -> Option<PendingDelete> {
        let pending = self.pending_delete.take()?;
        self.deleting = true;
        Some(pending)
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    pub fn finish_delete(&mut self, result: Result<(), AppError>) {
        self.deleting = false;
        match result {
            Ok(()) => self.notice.set(Notice::success("Event deleted successfully!")),
            Err(e) => self.notice.set(Notice::from(&e)),
        }
    }

    pub fn finish_sign_out(&mut self, result: Result<(), AppError>) {
        if let Err(e) = result {
            log::warn!("event list: sign out failed: {}", e);
            self.notice.set(Notice::error("Failed to log out. Please try again."));
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }
}
