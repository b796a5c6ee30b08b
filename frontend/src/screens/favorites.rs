use crate::app::use_services;
use crate::format::event_summary;
use crate::theme::spacing;
use crate::widgets::{AppBar, GradientBackground, GradientCard, NoticeBanner};
use dioxus::prelude::*;
use eventapp_core::views::{FavoritesView, LoadState};
use eventapp_core::{NavCommand, Session};

#[component]
pub fn FavoritesScreen(is_dark: bool, session: Session, on_navigate: EventHandler<NavCommand>) -> Element {
    let services = use_services();
    let mut view = use_signal(FavoritesView::new);

    // Each membership snapshot is resolved to full event records before it is shown.
    use_future(move || {
        let session = session.clone();
        async move {
            let favorites = services.read().favorites.clone();
            let mut feed = favorites.watch_mine(&session);
            while let Some(mut snapshot) = feed.next().await {
                // Resolving costs a read per id; skip straight to the newest membership.
                if let Some(newer) = feed.latest() {
                    snapshot = newer;
                }
                match snapshot {
                    Ok(ids) => {
                        let resolved = favorites.resolve_events(&ids).await;
                        view.write().apply(resolved);
                    }
                    Err(e) => view.write().apply_error(e),
                }
            }
        }
    });

    let notice = view.read().notice.peek().cloned();
    let state = view.read().state().clone();

    rsx! {
        GradientBackground { is_dark,
            AppBar {
                is_dark,
                title: "Favorites".to_string(),
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
                match state {
                    LoadState::Loading => rsx! {
                        p { style: "opacity: 0.7;", "Loading favorites…" }
                    },
                    LoadState::Failed(message) => rsx! {
                        p { style: "opacity: 0.7;", "Could not load favorites: {message}" }
                    },
                    LoadState::Ready(events) if events.is_empty() => rsx! {
                        p { style: "opacity: 0.7;", "No favorite events yet." }
                    },
                    LoadState::Ready(events) => rsx! {
                        for event in events {
                            GradientCard { key: "{event.id}", is_dark,
                                div {
                                    style: "cursor: pointer;",
                                    onclick: {
                                        let event = event.clone();
                                        move |_| on_navigate.call(view.read().open_details(&event))
                                    },
                                    div { style: "font-weight: 600; font-size: 1.05rem;", "★ {event.name}" }
                                    div { style: "opacity: 0.8; font-size: 0.85rem; margin-top: {spacing::XS};",
                                        {event_summary(&event)}
                                    }
                                }
                            }
                        }
                    },
                }
            }
        }
    }
}
