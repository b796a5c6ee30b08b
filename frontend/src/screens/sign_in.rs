use crate::app::use_services;
use crate::theme::{palette, spacing};
use crate::widgets::{GradientBackground, GradientCard, NoticeBanner};
use dioxus::prelude::*;
use eventapp_core::views::SignInView;
use eventapp_core::NavCommand;

#[component]
pub fn SignInScreen(is_dark: bool, on_navigate: EventHandler<NavCommand>) -> Element {
    let services = use_services();
    let mut view = use_signal(SignInView::new);
    let p = palette(is_dark);

    let submit = move |_| {
        let Some(credentials) = view.write().begin_submit() else {
            return;
        };
        let provider = services.read().session.clone();
        spawn(async move {
            let result = provider.sign_in(&credentials).await;
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
            div { style: "padding: {spacing::LG}; max-width: 400px; margin: 0 auto;",
                div { style: "text-align: center; margin: {spacing::LG} 0;",
                    div { style: "font-size: 48px; color: {p.primary};", "📅" }
                    h1 { style: "font-size: 1.5rem; font-weight: bold; margin: 16px 0 8px;", "Sign In" }
                    p { style: "opacity: 0.8; font-size: 0.9rem;", "Find and share community events" }
                }
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
                                placeholder: "you@example.com",
                                value: "{view.read().email}",
                                oninput: move |ev| view.write().email = ev.value(),
                                style: "{input_style}",
                            }
                        }
                        div { style: "margin-bottom: {spacing::MD};",
                            label { style: "display: block; margin-bottom: 4px; font-size: 0.875rem;", "Password" }
                            input {
                                r#type: "password",
                                placeholder: "Password",
                                value: "{view.read().password}",
                                oninput: move |ev| view.write().password = ev.value(),
                                style: "{input_style}",
                            }
                        }
                        button {
                            r#type: "submit",
                            disabled: submitting,
                            onclick: submit,
                            style: "width: 100%; padding: 12px; border-radius: 8px; background: {p.primary}; color: {p.on_primary}; font-weight: 600; border: none; cursor: pointer;",
                            if submitting { "Signing in…" } else { "Sign In" }
                        }
                    }
                }
                button {
                    onclick: move |_| on_navigate.call(view.read().open_sign_up()),
                    style: "margin-top: {spacing::MD}; background: none; border: none; color: {p.primary}; cursor: pointer; font-size: 0.9rem;",
                    "No account yet? Sign up"
                }
            }
        }
    }
}
