//! Display strings for events and notices, kept out of the components so they can be tested
//! without a UI platform.

use crate::theme::Palette;
use eventapp_core::views::{Notice, NoticeKind};
use eventapp_core::Event;

/// Label/value lines shown under an event's name.
pub fn event_details(event: &Event) -> Vec<(&'static str, String)> {
    vec![
        ("Description", event.description_or_default().to_string()),
        ("Location", event.location_or_default().to_string()),
        ("Date", event.date_label()),
        ("Created By", event.creator_label().to_string()),
    ]
}

/// One-line summary for list rows.
pub fn event_summary(event: &Event) -> String {
    format!("Location: {}  ·  Date: {}", event.location_or_default(), event.date_label())
}

pub fn favorite_label(is_favorite: Option<bool>, toggling: bool) -> &'static str {
    match (is_favorite, toggling) {
        (_, true) => "Saving…",
        (None, _) => "Loading…",
        (Some(true), _) => "★ Remove from Favorites",
        (Some(false), _) => "☆ Add to Favorites",
    }
}

pub fn notice_color(notice: &Notice, palette: &Palette) -> &'static str {
    match notice.kind {
        NoticeKind::Success => palette.success,
        NoticeKind::Error => palette.error,
    }
}

pub fn confirm_delete_message(event: &Event) -> String {
    format!("Delete \"{}\"? This cannot be undone.", event.name)
}
