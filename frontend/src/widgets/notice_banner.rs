use crate::format::notice_color;
use crate::theme::{palette, spacing};
use dioxus::prelude::*;
use eventapp_core::views::Notice;

/// Shows a notice until dismissed.
#[component]
pub fn NoticeBanner(is_dark: bool, notice: Option<Notice>, on_dismiss: EventHandler<()>) -> Element {
    let Some(notice) = notice else {
        return rsx! {};
    };
    let p = palette(is_dark);
    let color = notice_color(&notice, &p);
    rsx! {
        div { style: "display: flex; align-items: flex-start; gap: {spacing::SM}; margin: {spacing::SM} 0; padding: 12px; border-radius: 8px; border: 1px solid {color}; background: {p.card};",
            div { style: "flex: 1;",
                div { style: "font-weight: 600; color: {color}; margin-bottom: {spacing::XS};", "{notice.title}" }
                div { style: "color: {p.on_surface}; font-size: 0.9rem;", "{notice.message}" }
            }
            button {
                onclick: move |_| on_dismiss.call(()),
                style: "background: none; border: none; color: {p.outline}; cursor: pointer;",
                "OK"
            }
        }
    }
}
