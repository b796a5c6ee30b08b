//! Community events frontend: palette, display formatting and (with `desktop`) the Dioxus UI.

pub mod format;
pub mod theme;

#[cfg(feature = "desktop")]
pub mod app;
#[cfg(feature = "desktop")]
pub mod screens;
#[cfg(feature = "desktop")]
pub mod widgets;
