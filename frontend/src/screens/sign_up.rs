use crate::app::use_services;
use crate::theme::{palette, spacing};
use crate::widgets::{AppBar, GradientBackground, GradientCard, NoticeBanner};
use dioxus::prelude::*;
use eventapp_core::views::SignUpView;
use eventapp_core::NavCommand;

#[component]
pub fn SignUpScreen(is_dark: bool, on_navigate: EventHandler<NavCommand>) -> Element {
    let services = use_services();
    let mut view = use_signal(SignUpView::new);
    let p = palette(is_dark);

    let submit = move |_| {
        let Some(credentials) = view.write().begin_submit() else {
            return;
        };
        let provider = services.read().session.clone();
        spawn(async move {
            let result = provider.sign_up(&credentials).await;
            view.write().finish(result);
        });
    };

    let submitting = view.read().is_submitting();
    let notice = view.read().notice.peek().cloned();
    let input_style = format!(
        "width: 100%; padding: 12px; border-radius: 8px; border: 1px solid {}; background: transparent; color: {}; box-sizing: border-box;",
        p.outline, p.on_surface
    );

    rsx! {
        GradientBackground { is_dark,
            AppBar {
                is_dark,
                title: "Sign Up".to_string(),
                can_go_back: true,
                on_back: move |_| on_navigate.call(view.read().open_sign_in()),
                div {}
            }
            div { style: "padding: {spacing::LG}; max-width: 400px; margin: 0 auto;",
                NoticeBanner {
                    is_dark,
                    notice,
                    on_dismiss: move |_| {
                        view.write().notice.take();
                    },
                }
                GradientCard { is_dark,
                    form {
                        onsubmit: move |ev| ev.prevent_default(),
                        div { style: "margin-bottom: {spacing::MD};",
                            label { style: "display: block; margin-bottom: 4px; font-size: 0.875rem;", "Email" }
                            input {
                                r#type: "email",
                                value: "{view.read().email}",
                                oninput: move |ev| view.write().email = ev.value(),
                                style: "{input_style}",
                            }
                        }
                        div { style: "margin-bottom: {spacing::MD};",
                            label { style: "display: block; margin-bottom: 4px; font-size: 0.875rem;", "Password (at least 6 characters)" }
                            input {
                                r#type: "password",
                                value: "{view.read().password}",
                                oninput: move |ev| view.write().password = ev.value(),
                                style: "{input_style}",
                            }
                        }
                        div { style: "margin-bottom: {spacing::MD};",
                            label { style: "display: block; margin-bottom: 4px; font-size: 0.875rem;", "Confirm password" }
                            input {
                                r#type: "password",
                                value: "{view.read().confirm_password}",
                                oninput: move |ev| view.write().confirm_password = ev.value(),
                                style: "{input_style}",
                            }
                        }
                        button {
                            r#type: "submit",
                            disabled: submitting,
                            onclick: submit,
                            style: "width: 100%; padding: 12px; border-radius: 8px; background: {p.primary}; color: {p.on_primary}; font-weight: 600; border: none; cursor: pointer;",
                            if submitting { "Creating account…" } else { "Create Account" }
                        }
                    }
                }
            }
        }
    }
}
