//! Domain models: events, favorites, signed-in users.
//! Wire format (document field names) lives in `schema`; these are the typed values screens use.

use crate::ids::{EventId, FavoriteId, UserId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Canonical calendar-date format stored in `events.date`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    pub description: String,
    pub location: String,
    pub date: Option<NaiveDate>,
    pub creator_id: UserId,
    pub creator_email: Option<String>,
}

impl Event {
    pub fn description_or_default(&self) -> &str {
        non_empty(&self.description).unwrap_or("No description provided")
    }

    pub fn location_or_default(&self) -> &str {
        non_empty(&self.location).unwrap_or("Not provided")
    }

    pub fn date_label(&self) -> String {
        self.date.map(format_date).unwrap_or_else(|| "Not set".to_string())
    }

    pub fn creator_label(&self) -> &str {
        self.creator_email
            .as_deref()
            .and_then(non_empty)
            .unwrap_or("No email provided")
    }
}

fn non_empty(s: &str) -> Option<&str> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Fields collected by the add-event form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventDraft {
    pub name: String,
    pub description: String,
    pub location: String,
    pub date: Option<NaiveDate>,
}

impl EventDraft {
    /// Names of required fields that are empty, in form order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.description.trim().is_empty() {
            missing.push("description");
        }
        if self.location.trim().is_empty() {
            missing.push("location");
        }
        if self.date.is_none() {
            missing.push("date");
        }
        missing
    }
}

/// Partial update. `None` fields are left untouched. There is deliberately no way to express
/// a change of creator.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub date: Option<NaiveDate>,
}

impl EventPatch {
    /// Patch that rewrites every editable field from a draft.
    pub fn from_draft(draft: EventDraft) -> Self {
        EventPatch {
            name: Some(draft.name),
            description: Some(draft.description),
            location: Some(draft.location),
            date: draft.date,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.location.is_none()
            && self.date.is_none()
    }

    /// Passed text fields that are blank.
    pub fn blank_fields(&self) -> Vec<&'static str> {
        let mut blank = Vec::new();
        for (label, value) in [
            ("name", &self.name),
            ("description", &self.description),
            ("location", &self.location),
        ] {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                blank.push(label);
            }
        }
        blank
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favorite {
    pub id: FavoriteId,
    pub user_id: UserId,
    pub event_id: EventId,
}

/// The signed-in identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub uid: UserId,
    pub email: Option<String>,
}
