use crate::screens::{
    AddEventScreen, EditEventScreen, EventDetailsScreen, EventListScreen, FavoritesScreen, SignInScreen,
    SignUpScreen,
};
use crate::widgets::NoticeBanner;
use dioxus::prelude::*;
use eventapp_core::views::Notice;
use eventapp_core::{NavCommand, Navigator, Screen, Services, Session};

/// Services handle that closures can capture by copy.
pub fn use_services() -> Signal<Services> {
    let services = use_context::<Services>();
    use_signal(move || services)
}

/// App-level banner for notices that outlive the screen that raised them (e.g. "Event added"
/// shown after the add screen closes).
#[derive(Clone, Copy)]
pub struct AppNotice(pub Signal<Option<Notice>>);

pub fn use_app_notice() -> Signal<Option<Notice>> {
    use_context::<AppNotice>().0
}

#[component]
pub fn App() -> Element {
    let services = use_services();
    let mut app_notice = use_context_provider(|| AppNotice(Signal::new(None))).0;
    let is_dark = use_signal(|| true);
    let mut nav = use_signal(Navigator::new);
    let mut session = use_signal(Session::default);

    // Lives as long as the app: the session gate for the navigator.
    use_future(move || async move {
        let mut feed = services.read().session.watch();
        while let Some(next) = feed.next().await {
            if nav.write().on_session(&next) {
                log::info!("app: now at {}", nav.read().current().title());
            }
            session.set(next);
        }
    });

    let navigate = move |command: NavCommand| {
        if let Err(e) = nav.write().apply(command) {
            log::warn!("app: navigation refused: {}", e);
        }
    };

    let dark = is_dark();
    let current = nav.read().current().clone();
    let session_now = session();

    // Each screen owns its feeds; replacing the screen unmounts it and releases them.
    let current_screen = match current {
        Screen::SignIn => rsx! { SignInScreen { is_dark: dark, on_navigate: navigate } },
        Screen::SignUp => rsx! { SignUpScreen { is_dark: dark, on_navigate: navigate } },
        Screen::EventList => rsx! {
            EventListScreen { is_dark: dark, session: session_now, on_navigate: navigate }
        },
        Screen::AddEvent => rsx! {
            AddEventScreen { is_dark: dark, session: session_now, on_navigate: navigate }
        },
        Screen::EventDetails(event) => rsx! {
            EventDetailsScreen {
                is_dark: dark,
                session: session_now,
                event,
                on_navigate: navigate,
            }
        },
        Screen::EditEvent(event) => rsx! {
            EditEventScreen {
                is_dark: dark,
                session: session_now,
                event,
                on_navigate: navigate,
            }
        },
        Screen::Favorites => rsx! {
            FavoritesScreen { is_dark: dark, session: session_now, on_navigate: navigate }
        },
    };

    rsx! {
        div { style: "font-family: system-ui, sans-serif;",
            if app_notice.read().is_some() {
                div { style: "position: fixed; top: 8px; left: 50%; transform: translateX(-50%); width: min(480px, 90%); z-index: 10;",
                    NoticeBanner {
                        is_dark: dark,
                        notice: app_notice(),
                        on_dismiss: move |_| app_notice.set(None),
                    }
                }
            }
            {current_screen}
        }
    }
}
