//! Screen view-models. Plain state holders and reducers with no UI dependency: the UI feeds
//! them snapshots and operation results, renders their state, and executes the `NavCommand`s
//! they hand back. Every failure becomes a one-shot [`Notice`]; no view is left unusable.

mod auth;
mod event_details;
mod event_form;
mod event_list;
mod favorites;

pub use auth::{SignInView, SignUpView};
pub use event_details::EventDetailsView;
pub use event_form::{AddEventView, EditEventView, EventForm};
pub use event_list::{EventListView, EventRow};
pub use favorites::FavoritesView;

use crate::error::AppError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A message the UI shows once, then discards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            title: "Success".to_string(),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: "Error".to_string(),
            message: message.into(),
        }
    }

    /// `prefix` is prepended to remote failures only; validation and permission messages are
    /// already phrased for the user.
    pub fn from_error(err: &AppError, prefix: Option<&str>) -> Self {
        let message = match (err, prefix) {
            (AppError::Network(_) | AppError::Remote(_) | AppError::Data(_), Some(p)) => {
                format!("{}{}", p, err)
            }
            _ => err.to_string(),
        };
        Self {
            kind: NoticeKind::Error,
            title: err.title().to_string(),
            message,
        }
    }
}

impl From<&AppError> for Notice {
    fn from(err: &AppError) -> Self {
        Notice::from_error(err, None)
    }
}

#[derive(Clone, Debug, Default)]
pub struct NoticeSlot(Option<Notice>);

impl NoticeSlot {
    pub fn set(&mut self, notice: Notice) {
        if notice.kind == NoticeKind::Error {
            log::warn!("notice: {}: {}", notice.title, notice.message);
        }
        self.0 = Some(notice);
    }

    pub fn take(&mut self) -> Option<Notice> {
        self.0.take()
    }

    pub fn peek(&self) -> Option<&Notice> {
        self.0.as_ref()
    }
}

/// Load state of a live list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadState<T> {
    Loading,
    Ready(Vec<T>),
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn items(&self) -> &[T] {
        match self {
            LoadState::Ready(items) => items,
            _ => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_applies_to_remote_failures_only() {
        let remote = Notice::from_error(
            &AppError::Remote("boom".into()),
            Some("Error deleting event: "),
        );
        assert_eq!(remote.message, "Error deleting event: boom");
        let denied =
            Notice::from_error(&AppError::not_owner("delete"), Some("Error deleting event: "));
        assert_eq!(denied.message, "You are not authorized to delete this event.");
        let invalid = Notice::from(&AppError::validation(vec!["name"]));
        assert_eq!(invalid.title, "Validation Error");
    }

    #[test]
    fn slot_is_one_shot() {
        let mut slot = NoticeSlot::default();
        slot.set(Notice::success("done"));
        assert!(slot.peek().is_some());
        assert_eq!(slot.take().map(|n| n.message), Some("done".to_string()));
        assert!(slot.take().is_none());
    }
}
