use crate::app::use_services;
use crate::format::{confirm_delete_message, event_summary};
use crate::theme::{palette, spacing};
use crate::widgets::{AppBar, ConfirmDialog, GradientBackground, GradientCard, NoticeBanner};
use dioxus::prelude::*;
use eventapp_core::views::{EventListView, EventRow, LoadState};
use eventapp_core::{Event, NavCommand, Session};

#[component]
pub fn EventListScreen(is_dark: bool, session: Session, on_navigate: EventHandler<NavCommand>) -> Element {
    let services = use_services();
    let mut view = use_signal(|| EventListView::new(session.clone()));
    let p = palette(is_dark);

    use_future(move || async move {
        let mut feed = services.read().events.watch_all();
        while let Some(snapshot) = feed.next().await {
            view.write().apply_snapshot(snapshot);
        }
    });

    let sign_out = move |_| {
        let provider = services.read().session.clone();
        spawn(async move {
            let result = provider.sign_out().await;
            view.write().finish_sign_out(result);
        });
    };

    let confirm_delete = move |_| {
        let Some(pending) = view.write().confirm_delete() else {
            return;
        };
        let events = services.read().events.clone();
        let session = view.read().session().clone();
        spawn(async move {
            let result = events.remove(&session, pending).await;
            view.write().finish_delete(result);
        });
    };

    let notice = view.read().notice.peek().cloned();
    let confirming = view.read().confirming().cloned();
    let (rows, loading, failed) = {
        let v = view.read();
        let failed = match v.state() {
            LoadState::Failed(message) => Some(message.clone()),
            _ => None,
        };
        (v.rows(), v.state().is_loading(), failed)
    };
    let deleting = view.read().is_deleting();

    rsx! {
        GradientBackground { is_dark,
            AppBar {
                is_dark,
                title: "Event List".to_string(),
                on_back: move |_| {},
                div { style: "display: flex; gap: {spacing::SM};",
                    button {
                        onclick: move |_| on_navigate.call(view.read().open_favorites()),
                        style: "background: none; border: 1px solid {p.outline}; border-radius: 8px; padding: 6px 12px; color: {p.on_surface}; cursor: pointer;",
                        "★ Favorites"
                    }
                    button {
                        onclick: sign_out,
                        style: "background: none; border: 1px solid {p.outline}; border-radius: 8px; padding: 6px 12px; color: {p.on_surface}; cursor: pointer;",
                        "Sign Out"
                    }
                }
            }
            div { style: "padding: {spacing::LG}; max-width: 720px; margin: 0 auto;",
                NoticeBanner {
                    is_dark,
                    notice,
                    on_dismiss: move |_| {
                        view.write().notice.take();
                    },
                }
                if loading {
                    p { style: "opacity: 0.7;", "Loading events…" }
                } else if let Some(message) = failed {
                    p { style: "color: {p.error};", "Could not load events: {message}" }
                } else if rows.is_empty() {
                    p { style: "opacity: 0.7;", "No events yet. Add the first one!" }
                }
                for row in rows {
                    EventRowCard {
                        key: "{row.event.id}",
                        is_dark,
                        row: row.clone(),
                        on_open: move |event: Event| on_navigate.call(view.read().open_details(&event)),
                        on_edit: move |event: Event| {
                            let command = view.write().open_edit(&event);
                            if let Some(command) = command {
                                on_navigate.call(command);
                            }
                        },
                        on_delete: move |event: Event| {
                            let events = services.read().events.clone();
                            view.write().request_delete(&events, &event);
                        },
                    }
                }
                if deleting {
                    p { style: "opacity: 0.7;", "Deleting…" }
                }
            }
            button {
                onclick: move |_| on_navigate.call(view.read().open_add()),
                style: "position: fixed; right: {spacing::LG}; bottom: {spacing::LG}; width: 56px; height: 56px; border-radius: 28px; border: none; background: {p.primary}; color: {p.on_primary}; font-size: 1.5rem; cursor: pointer;",
                title: "Add Event",
                "+"
            }
            if let Some(event) = confirming {
                ConfirmDialog {
                    is_dark,
                    title: "Delete Event".to_string(),
                    message: confirm_delete_message(&event),
                    confirm_label: "Delete".to_string(),
                    on_confirm: confirm_delete,
                    on_cancel: move |_| view.write().cancel_delete(),
                }
            }
        }
    }
}

#[component]
fn EventRowCard(
    is_dark: bool,
    row: EventRow,
    on_open: EventHandler<Event>,
    on_edit: EventHandler<Event>,
    on_delete: EventHandler<Event>,
) -> Element {
    let p = palette(is_dark);
    let summary = event_summary(&row.event);
    let open = row.event.clone();
    let edit = row.event.clone();
    let delete = row.event.clone();
    rsx! {
        GradientCard { is_dark, accent: row.is_owner,
            div { style: "display: flex; align-items: center; gap: {spacing::SM};",
                div {
                    style: "flex: 1; cursor: pointer;",
                    onclick: move |_| on_open.call(open.clone()),
                    div { style: "font-weight: 600; font-size: 1.05rem;", "{row.event.name}" }
                    div { style: "opacity: 0.8; font-size: 0.85rem; margin-top: {spacing::XS};", "{summary}" }
                }
                if row.is_owner {
                    button {
                        onclick: move |_| on_edit.call(edit.clone()),
                        style: "background: none; border: none; color: {p.primary}; cursor: pointer;",
                        "Edit"
                    }
                    button {
                        onclick: move |_| on_delete.call(delete.clone()),
                        style: "background: none; border: none; color: {p.error}; cursor: pointer;",
                        "Delete"
                    }
                }
            }
        }
    }
}
