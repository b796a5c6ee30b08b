use crate::theme::palette;
use dioxus::prelude::*;

#[component]
pub fn GradientBackground(is_dark: bool, children: Element) -> Element {
    let p = palette(is_dark);
    let bg_end = if is_dark { "#141317" } else { "#E3EBF7" };
    rsx! {
        div {
            style: "min-height: 100vh; background: linear-gradient(to bottom, {p.surface}, {bg_end}); color: {p.on_surface};",
            {children}
        }
    }
}
