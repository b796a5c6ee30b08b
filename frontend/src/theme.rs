//! App palette and spacing. Light/dark selected at runtime.

/// Colors for one brightness.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub primary: &'static str,
    pub on_primary: &'static str,
    pub surface: &'static str,
    pub card: &'static str,
    pub on_surface: &'static str,
    pub outline: &'static str,
    pub success: &'static str,
    pub error: &'static str,
    pub favorite: &'static str,
}

pub const LIGHT: Palette = Palette {
    primary: "#4D94FF",
    on_primary: "#FFFFFF",
    surface: "#F2F5FA",
    card: "rgba(255,255,255,0.95)",
    on_surface: "#1C1B1F",
    outline: "#938F99",
    success: "#029C76",
    error: "#BA1A1A",
    favorite: "#E0A800",
};

pub const DARK: Palette = Palette {
    primary: "#8AB6FF",
    on_primary: "#0B1D3A",
    surface: "#1C1B1F",
    card: "rgba(73,69,79,0.9)",
    on_surface: "#E6E1E5",
    outline: "#938F99",
    success: "#4FD1A8",
    error: "#FFB4AB",
    favorite: "#FFD54F",
};

pub fn palette(is_dark: bool) -> Palette {
    if is_dark {
        DARK
    } else {
        LIGHT
    }
}

/// 8px grid.
pub mod spacing {
    pub const XS: &str = "4px";
    pub const SM: &str = "8px";
    pub const MD: &str = "16px";
    pub const LG: &str = "24px";
    pub const CARD_PADDING: &str = "16px";
}
