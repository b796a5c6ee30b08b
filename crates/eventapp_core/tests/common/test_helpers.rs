//! Shared helpers: feed reads with a deadline, drafts, raw documents.

use eventapp_core::models::parse_date;
use eventapp_core::store::Fields;
use eventapp_core::{EventDraft, Feed};
use std::time::Duration;

/// Next feed item, failing the test if nothing arrives within a second.
pub async fn next_item<T>(feed: &mut Feed<T>) -> T {
    tokio::time::timeout(Duration::from_secs(1), feed.next())
        .await
        .expect("feed item within 1s")
        .expect("feed still open")
}

pub fn meetup() -> EventDraft {
    EventDraft {
        name: "Meetup".into(),
        description: "d".into(),
        location: "Park".into(),
        date: parse_date("2024-05-01"),
    }
}

pub fn fields(value: serde_json::Value) -> Fields {
    value.as_object().cloned().expect("object literal")
}
