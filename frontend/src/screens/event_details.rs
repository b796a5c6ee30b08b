use super::hand_off_notice;
use crate::app::{use_app_notice, use_services};
use crate::format::{confirm_delete_message, event_details, favorite_label};
use crate::theme::{palette, spacing};
use crate::widgets::{AppBar, ConfirmDialog, GradientBackground, GradientCard, NoticeBanner};
use dioxus::prelude::*;
use eventapp_core::views::EventDetailsView;
use eventapp_core::{Event, NavCommand, Session};

#[component]
pub fn EventDetailsScreen(
    is_dark: bool,
    session: Session,
    event: Event,
    on_navigate: EventHandler<NavCommand>,
) -> Element {
    let services = use_services();
    let app_notice = use_app_notice();
    let mut view = use_signal(|| EventDetailsView::new(session.clone(), event.clone()));
    let p = palette(is_dark);

    // Favorite membership for this user.
    use_future(move || async move {
        let session = services.read().session.current();
        let mut feed = services.read().favorites.watch_mine(&session);
        while let Some(snapshot) = feed.next().await {
            view.write().apply_favorites(snapshot);
        }
    });

    // Keeps the shown record current.
    use_future(move || async move {
        let mut feed = services.read().events.watch_all();
        while let Some(snapshot) = feed.next().await {
            view.write().apply_events(snapshot);
        }
    });

    let toggle = move |_| {
        if !view.write().begin_toggle() {
            return;
        }
        let favorites = services.read().favorites.clone();
        let session = services.read().session.current();
        let event_id = view.read().event().id.clone();
        spawn(async move {
            let result = favorites.toggle(&session, &event_id).await;
            view.write().finish_toggle(result);
        });
    };

    let confirm_delete = move |_| {
        let Some(pending) = view.write().confirm_delete() else {
            return;
        };
        let events = services.read().events.clone();
        let session = services.read().session.current();
        spawn(async move {
            let result = events.remove(&session, pending).await;
            let command = view.write().finish_delete(result);
            if let Some(command) = command {
                hand_off_notice(&mut view.write().notice, app_notice);
                on_navigate.call(command);
            }
        });
    };

    let v = view.read();
    let shown = v.event().clone();
    let lines = event_details(&shown);
    let is_owner = v.is_owner();
    let favorite_text = favorite_label(v.is_favorite(), v.is_toggling());
    let favorite_ready = v.is_favorite().is_some() && !v.is_toggling();
    let confirming = v.is_confirming();
    let notice = v.notice.peek().cloned();
    drop(v);

    rsx! {
        GradientBackground { is_dark,
            AppBar {
                is_dark,
                title: "Event Details".to_string(),
                can_go_back: true,
                on_back: move |_| on_navigate.call(NavCommand::Back),
                div {}
            }
            div { style: "padding: {spacing::LG}; max-width: 720px; margin: 0 auto;",
                NoticeBanner {
                    is_dark,
                    notice,
                    on_dismiss: move |_| {
                        view.write().notice.take();
                    },
                }
                GradientCard { is_dark, accent: is_owner,
                    h2 { style: "margin: 0 0 {spacing::MD}; font-size: 1.4rem;", "{shown.name}" }
                    for (label, value) in lines {
                        div { style: "margin-bottom: {spacing::SM};",
                            span { style: "font-weight: 600;", "{label}: " }
                            span { "{value}" }
                        }
                    }
                }
                div { style: "display: flex; flex-wrap: wrap; gap: {spacing::SM}; margin-top: {spacing::MD};",
                    button {
                        disabled: !favorite_ready,
                        onclick: toggle,
                        style: "padding: 10px 16px; border-radius: 8px; border: 1px solid {p.favorite}; background: transparent; color: {p.favorite}; cursor: pointer;",
                        "{favorite_text}"
                    }
                    if is_owner {
                        button {
                            onclick: move |_| {
                                let command = view.write().open_edit();
                                if let Some(command) = command {
                                    on_navigate.call(command);
                                }
                            },
                            style: "padding: 10px 16px; border-radius: 8px; border: none; background: {p.primary}; color: {p.on_primary}; cursor: pointer;",
                            "Edit Event"
                        }
                        button {
                            onclick: move |_| {
                                let events = services.read().events.clone();
                                view.write().request_delete(&events);
                            },
                            style: "padding: 10px 16px; border-radius: 8px; border: none; background: {p.error}; color: #FFFFFF; cursor: pointer;",
                            "Delete Event"
                        }
                    }
                }
            }
            if confirming {
                ConfirmDialog {
                    is_dark,
                    title: "Delete Event".to_string(),
                    message: confirm_delete_message(&shown),
                    confirm_label: "Delete".to_string(),
                    on_confirm: confirm_delete,
                    on_cancel: move |_| view.write().cancel_delete(),
                }
            }
        }
    }
}
