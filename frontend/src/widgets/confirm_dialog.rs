use crate::theme::{palette, spacing};
use dioxus::prelude::*;

/// Modal confirmation for destructive actions.
#[component]
pub fn ConfirmDialog(
    is_dark: bool,
    title: String,
    message: String,
    confirm_label: String,
    on_confirm: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    let p = palette(is_dark);
    rsx! {
        div { style: "position: fixed; inset: 0; background: rgba(0,0,0,0.5); display: flex; align-items: center; justify-content: center;",
            div { style: "background: {p.surface}; color: {p.on_surface}; border-radius: 16px; padding: {spacing::LG}; max-width: 360px; width: 90%;",
                h2 { style: "margin: 0 0 {spacing::SM}; font-size: 1.1rem;", "{title}" }
                p { style: "margin: 0 0 {spacing::LG};", "{message}" }
                div { style: "display: flex; justify-content: flex-end; gap: {spacing::SM};",
                    button {
                        onclick: move |_| on_cancel.call(()),
                        style: "padding: 8px 16px; border-radius: 8px; border: 1px solid {p.outline}; background: transparent; color: {p.on_surface}; cursor: pointer;",
                        "Cancel"
                    }
                    button {
                        onclick: move |_| on_confirm.call(()),
                        style: "padding: 8px 16px; border-radius: 8px; border: none; background: {p.error}; color: #FFFFFF; cursor: pointer;",
                        "{confirm_label}"
                    }
                }
            }
        }
    }
}
