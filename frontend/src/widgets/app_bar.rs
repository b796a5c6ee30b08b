use crate::theme::{palette, spacing};
use dioxus::prelude::*;

/// Title row with an optional back button; children are the trailing actions.
#[component]
pub fn AppBar(
    is_dark: bool,
    title: String,
    #[props(default)] can_go_back: bool,
    on_back: EventHandler<()>,
    children: Element,
) -> Element {
    let p = palette(is_dark);
    rsx! {
        div { style: "display: flex; align-items: center; gap: {spacing::MD}; padding: 12px {spacing::LG}; border-bottom: 1px solid {p.outline};",
            if can_go_back {
                button {
                    onclick: move |_| on_back.call(()),
                    style: "background: none; border: none; color: {p.primary}; cursor: pointer; font-size: 1rem;",
                    "‹ Back"
                }
            }
            h1 { style: "font-size: 1.25rem; margin: 0; color: {p.on_surface};", "{title}" }
            div { style: "flex: 1;" }
            {children}
        }
    }
}
