use super::{Notice, NoticeSlot};
use crate::error::AppError;
use crate::events::{EventRepository, EventsSnapshot, PendingDelete};
use crate::favorites::FavoritesSnapshot;
use crate::models::Event;
use crate::navigator::{NavCommand, Screen};
use crate::session::Session;

pub struct EventDetailsView {
    session: Session,
    event: Event,
    /// `None` until the first favorites snapshot.
    is_favorite: Option<bool>,
    toggling: bool,
    pending_delete: Option<PendingDelete>,
    pub notice: NoticeSlot,
}

impl EventDetailsView {
    pub fn new(session: Session, event: Event) -> Self {
        Self {
            session,
            event,
            is_favorite: None,
            toggling: false,
            pending_delete: None,
            notice: NoticeSlot::default(),
        }
    }

    pub fn event(&self) -> &Event {
        &self.event
    }

    pub fn is_owner(&self) -> bool {
        self.session.is_owner(&self.event)
    }

    pub fn is_favorite(&self) -> Option<bool> {
        self.is_favorite
    }

    pub fn apply_favorites(&mut self, snapshot: FavoritesSnapshot) {
        match snapshot {
            Ok(ids) => self.is_favorite = Some(ids.contains(&self.event.id)),
            Err(e) => self.notice.set(Notice::from(&e)),
        }
    }

    /// Refresh from a live events snapshot. A failed snapshot or a vanished event leaves the
    /// last record on screen with a notice.
    pub fn apply_events(&mut self, snapshot: EventsSnapshot) {
        let events = match snapshot {
            Ok(events) => events,
            Err(e) => {
                self.notice.set(Notice::from(&e));
                return;
            }
        };
        match events.into_iter().find(|e| e.id == self.event.id) {
            Some(found) => self.event = found,
            None if self.notice.peek().is_none() => {
                self.notice.set(Notice::error("This event no longer exists."));
            }
            None => {}
        }
    }

    /// False while a toggle is already in flight.
    pub fn begin_toggle(&mut self) -> bool {
        if self.toggling {
            return false;
        }
        self.toggling = true;
        true
    }

    pub fn is_toggling(&self) -> bool {
        self.toggling
    }

    pub fn finish_toggle(&mut self, result: Result<bool, AppError>) {
        self.toggling = false;
        match result {
            Ok(now) => self.is_favorite = Some(now),
            Err(e) => self.notice.set(Notice::from(&e)),
        }
    }

    pub fn open_edit(&mut self) -> Option<NavCommand> {
        if !self.is_owner() {
            self.notice.set(Notice::from(&AppError::not_owner("edit")));
            return None;
        }
        Some(NavCommand::Push(Screen::EditEvent(self.event.clone())))
    }

    pub fn request_delete(&mut self, events: &EventRepository) {
        match events.prepare_remove(&self.session, &self.event) {
            Ok(pending) => self.pending_delete = Some(pending),
            Err(e) => self.notice.set(Notice::from(&e)),
        }
    }

    pub fn is_confirming(&self) -> bool {
        self.pending_delete.is_some()
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub fn confirm_delete(&mut self) -> Option<PendingDelete> {
        self.pending_delete.take()
    }

    /// Leaves the screen on success.
    pub fn finish_delete(&mut self, result: Result<(), AppError>) -> Option<NavCommand> {
        match result {
            Ok(()) => {
                self.notice.set(Notice::success("Event deleted successfully!"));
                Some(NavCommand::Back)
            }
            Err(e) => {
                self.notice.set(Notice::from_error(&e, Some("Error deleting event: ")));
                None
            }
        }
    }
}
