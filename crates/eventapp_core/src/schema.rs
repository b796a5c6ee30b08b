//! Wire schema for the `events`, `favorites` and `users` collections.
//!
//! Every remote read passes through a `*_from_document` function here; a record that does not
//! fit is a typed `AppError::Data`, never a silently skipped row. Every write is built here too,
//! so no write path can carry `creatorId` except `event_fields` at creation.

use crate::error::AppError;
use crate::ids::{EventId, FavoriteId, UserId};
use crate::models::{format_date, parse_date, Event, EventDraft, EventPatch, Favorite, SessionUser};
use crate::store::{Document, Fields};
use chrono::{DateTime, Utc};
use serde_json::Value;

pub const NAME: &str = "name";
pub const DESCRIPTION: &str = "description";
pub const LOCATION: &str = "location";
pub const DATE: &str = "date";
pub const CREATOR_ID: &str = "creatorId";
pub const CREATOR_EMAIL: &str = "creatorEmail";
pub const USER_ID: &str = "userId";
pub const EVENT_ID: &str = "eventId";
pub const EMAIL: &str = "email";
pub const CREATED_AT: &str = "createdAt";

fn text(fields: &Fields, key: &str) -> String {
    fields.get(key).and_then(Value::as_str).unwrap_or_default().to_string()
}

fn required_id(doc: &Document, key: &str, what: &str) -> Result<String, AppError> {
    match doc.fields.get(key).and_then(Value::as_str).map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(AppError::Data(format!(
            "{} missing in {} document {}",
            key_label(key),
            what,
            doc.id
        ))),
    }
}

fn key_label(key: &str) -> &'static str {
    match key {
        CREATOR_ID => "Creator ID",
        USER_ID => "User ID",
        EVENT_ID => "Event ID",
        _ => "Required field",
    }
}

fn doc_id<T>(doc: &Document, parse: impl Fn(&str) -> Result<T, String>) -> Result<T, AppError> {
    parse(&doc.id).map_err(|e| AppError::Data(format!("bad document id: {}", e)))
}

pub fn event_from_document(doc: &Document) -> Result<Event, AppError> {
    let creator = required_id(doc, CREATOR_ID, "event")?;
    let date = match doc.fields.get(DATE) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.trim().is_empty() => None,
        Some(Value::String(s)) => Some(parse_date(s).ok_or_else(|| {
            AppError::Data(format!("Malformed date {:?} in event document {}", s, doc.id))
        })?),
        Some(other) => {
            return Err(AppError::Data(format!(
                "Malformed date {} in event document {}",
                other, doc.id
            )))
        }
    };
    Ok(Event {
        id: doc_id(doc, |s| EventId::parse(s))?,
        name: text(&doc.fields, NAME),
        description: text(&doc.fields, DESCRIPTION),
        location: text(&doc.fields, LOCATION),
        date,
        creator_id: UserId::parse(creator).map_err(AppError::Data)?,
        creator_email: doc
            .fields
            .get(CREATOR_EMAIL)
            .and_then(Value::as_str)
            .map(String::from),
    })
}

/// All-or-nothing: the first bad document fails the whole snapshot.
pub fn events_from_documents(docs: &[Document]) -> Result<Vec<Event>, AppError> {
    docs.iter().map(event_from_document).collect()
}

/// Fields for a new event, stamped with the creator.
pub fn event_fields(draft: &EventDraft, creator: &SessionUser) -> Fields {
    let mut fields = Fields::new();
    fields.insert(NAME.into(), Value::from(draft.name.trim()));
    fields.insert(DESCRIPTION.into(), Value::from(draft.description.trim()));
    fields.insert(LOCATION.into(), Value::from(draft.location.trim()));
    if let Some(date) = draft.date {
        fields.insert(DATE.into(), Value::from(format_date(date)));
    }
    fields.insert(CREATOR_ID.into(), Value::from(creator.uid.as_str()));
    fields.insert(
        CREATOR_EMAIL.into(),
        creator.email.clone().map(Value::from).unwrap_or(Value::Null),
    );
    fields
}

/// Only the fields present in the patch.
pub fn patch_fields(patch: &EventPatch) -> Fields {
    let mut fields = Fields::new();
    if let Some(name) = &patch.name {
        fields.insert(NAME.into(), Value::from(name.trim()));
    }
    if let Some(description) = &patch.description {
        fields.insert(DESCRIPTION.into(), Value::from(description.trim()));
    }
    if let Some(location) = &patch.location {
        fields.insert(LOCATION.into(), Value::from(location.trim()));
    }
    if let Some(date) = patch.date {
        fields.insert(DATE.into(), Value::from(format_date(date)));
    }
    fields
}

pub fn favorite_from_document(doc: &Document) -> Result<Favorite, AppError> {
    let user = required_id(doc, USER_ID, "favorite")?;
    let event = required_id(doc, EVENT_ID, "favorite")?;
    Ok(Favorite {
        id: doc_id(doc, |s| FavoriteId::parse(s))?,
        user_id: UserId::parse(user).map_err(AppError::Data)?,
        event_id: EventId::parse(event).map_err(AppError::Data)?,
    })
}

pub fn favorite_fields(user: &UserId, event: &EventId) -> Fields {
    let mut fields = Fields::new();
    fields.insert(USER_ID.into(), Value::from(user.as_str()));
    fields.insert(EVENT_ID.into(), Value::from(event.as_str()));
    fields
}

pub fn profile_fields(user: &SessionUser, created_at: DateTime<Utc>) -> Fields {
    let mut fields = Fields::new();
    fields.insert(EMAIL.into(), user.email.clone().map(Value::from).unwrap_or(Value::Null));
    fields.insert(CREATED_AT.into(), Value::from(created_at.to_rfc3339()));
    fields
}
