mod event_details;
mod event_form;
mod event_list;
mod favorites;
mod sign_in;
mod sign_up;

pub use event_details::EventDetailsScreen;
pub use event_form::{AddEventScreen, EditEventScreen};
pub use event_list::EventListScreen;
pub use favorites::FavoritesScreen;
pub use sign_in::SignInScreen;
pub use sign_up::SignUpScreen;

use dioxus::prelude::*;
use eventapp_core::views::{Notice, NoticeSlot};

/// Move a screen's pending notice to the app banner before the screen closes.
pub(crate) fn hand_off_notice(slot: &mut NoticeSlot, mut app_notice: Signal<Option<Notice>>) {
    if let Some(notice) = slot.take() {
        app_notice.set(Some(notice));
    }
}
