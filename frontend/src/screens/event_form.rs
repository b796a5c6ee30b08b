use super::hand_off_notice;
use crate::app::{use_app_notice, use_services};
use crate::theme::{palette, spacing};
use crate::widgets::{AppBar, GradientBackground, GradientCard, NoticeBanner};
use dioxus::prelude::*;
use eventapp_core::views::{AddEventView, EditEventView, EventForm};
use eventapp_core::{Event, NavCommand, Session};

/// Name, description, location and date inputs shared by add and edit.
#[component]
fn EventFormFields(is_dark: bool, form: EventForm, disabled: bool, on_change: EventHandler<EventForm>) -> Element {
    let p = palette(is_dark);
    let input_style = format!(
        "width: 100%; padding: 12px; border-radius: 8px; border: 1px solid {}; background: transparent; color: {}; box-sizing: border-box;",
        p.outline, p.on_surface
    );
    let label_style = "display: block; margin-bottom: 4px; font-size: 0.875rem;";
    let date_text = form.date_text();
    let (name_form, description_form, location_form, date_form) =
        (form.clone(), form.clone(), form.clone(), form.clone());

    rsx! {
        div { style: "margin-bottom: {spacing::MD};",
            label { style: "{label_style}", "Event Name" }
            input {
                value: "{form.name}",
                disabled,
                oninput: move |ev| {
                    let mut next = name_form.clone();
                    next.name = ev.value();
                    on_change.call(next);
                },
                style: "{input_style}",
            }
        }
        div { style: "margin-bottom: {spacing::MD};",
            label { style: "{label_style}", "Description" }
            textarea {
                value: "{form.description}",
                disabled,
                rows: "4",
                oninput: move |ev| {
                    let mut next = description_form.clone();
                    next.description = ev.value();
                    on_change.call(next);
                },
                style: "{input_style}",
            }
        }
        div { style: "margin-bottom: {spacing::MD};",
            label { style: "{label_style}", "Location" }
            input {
                value: "{form.location}",
                disabled,
                oninput: move |ev| {
                    let mut next = location_form.clone();
                    next.location = ev.value();
                    on_change.call(next);
                },
                style: "{input_style}",
            }
        }
        div { style: "margin-bottom: {spacing::MD};",
            label { style: "{label_style}", "Date" }
            input {
                r#type: "date",
                value: "{date_text}",
                disabled,
                oninput: move |ev| {
                    let mut next = date_form.clone();
                    next.set_date_text(&ev.value());
                    on_change.call(next);
                },
                style: "{input_style}",
            }
        }
    }
}

#[component]
pub fn AddEventScreen(is_dark: bool, session: Session, on_navigate: EventHandler<NavCommand>) -> Element {
    let services = use_services();
    let app_notice = use_app_notice();
    let mut view = use_signal(AddEventView::today);
    let p = palette(is_dark);

    let submit = move |_| {
        let Some(draft) = view.write().begin_submit() else {
            return;
        };
        let events = services.read().events.clone();
        let session = session.clone();
        spawn(async move {
            let result = events.create(&session, draft).await;
            let command = view.write().finish(result);
            if let Some(command) = command {
                hand_off_notice(&mut view.write().notice, app_notice);
                on_navigate.call(command);
            }
        });
    };

    let form = view.read().form.clone();
    let submitting = view.read().is_submitting();
    let notice = view.read().notice.peek().cloned();

    rsx! {
        GradientBackground { is_dark,
            AppBar {
                is_dark,
                title: "Add Event".to_string(),
                can_go_back: true,
                on_back: move |_| on_navigate.call(NavCommand::Back),
                div {}
            }
            div { style: "padding: {spacing::LG}; max-width: 560px; margin: 0 auto;",
                NoticeBanner {
                    is_dark,
                    notice,
                    on_dismiss: move |_| {
                        view.write().notice.take();
                    },
                }
                GradientCard { is_dark,
                    EventFormFields {
                        is_dark,
                        form,
                        disabled: submitting,
                        on_change: move |next| view.write().form = next,
                    }
                    button {
                        disabled: submitting,
                        onclick: submit,
                        style: "width: 100%; padding: 12px; border-radius: 8px; background: {p.primary}; color: {p.on_primary}; font-weight: 600; border: none; cursor: pointer;",
                        if submitting { "Adding…" } else { "Add Event" }
                    }
                }
            }
        }
    }
}

#[component]
pub fn EditEventScreen(
    is_dark: bool,
    session: Session,
    event: Event,
    on_navigate: EventHandler<NavCommand>,
) -> Element {
    let services = use_services();
    let app_notice = use_app_notice();
    let mut view = use_signal(|| EditEventView::new(event.clone()));
    let p = palette(is_dark);

    let submit = move |_| {
        let Some(patch) = view.write().begin_submit() else {
            return;
        };
        let events = services.read().events.clone();
        let session = session.clone();
        let original = view.read().event().clone();
        spawn(async move {
            let result = events.update(&session, &original, patch).await;
            let command = view.write().finish(result);
            if let Some(command) = command {
                hand_off_notice(&mut view.write().notice, app_notice);
                on_navigate.call(command);
            }
        });
    };

    let form = view.read().form.clone();
    let submitting = view.read().is_submitting();
    let notice = view.read().notice.peek().cloned();

    rsx! {
        GradientBackground { is_dark,
            AppBar {
                is_dark,
                title: "Edit Event".to_string(),
                can_go_back: true,
                on_back: move |_| on_navigate.call(NavCommand::Back),
                div {}
            }
            div { style: "padding: {spacing::LG}; max-width: 560px; margin: 0 auto;",
                NoticeBanner {
                    is_dark,
                    notice,
                    on_dismiss: move |_| {
                        view.write().notice.take();
                    },
                }
                GradientCard { is_dark,
                    EventFormFields {
                        is_dark,
                        form,
                        disabled: submitting,
                        on_change: move |next| view.write().form = next,
                    }
                    button {
                        disabled: submitting,
                        onclick: submit,
                        style: "width: 100%; padding: 12px; border-radius: 8px; background: {p.primary}; color: {p.on_primary}; font-weight: 600; border: none; cursor: pointer;",
                        if submitting { "Saving…" } else { "Update Event" }
                    }
                }
            }
        }
    }
}
