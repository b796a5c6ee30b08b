use crate::theme::{palette, spacing};
use dioxus::prelude::*;

/// Card surface. `accent` draws a left border in the primary color (used for owned events).
#[component]
pub fn GradientCard(is_dark: bool, #[props(default)] accent: bool, children: Element) -> Element {
    let p = palette(is_dark);
    let border = if accent { p.primary } else { "transparent" };
    rsx! {
        div {
            style: "background: {p.card}; border-left: 4px solid {border}; border-radius: 12px; padding: {spacing::CARD_PADDING}; margin: {spacing::SM} 0;",
            {children}
        }
    }
}
