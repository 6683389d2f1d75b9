use bingo_core::ThemeName;

/// Palette behind a theme name. Boards persist the name only, so these
/// values can change without touching saved boards.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct ThemeProfile {
    /// CSS scheme written to the `data-theme` attribute
    pub scheme: &'static str,
    pub card_color: &'static str,
    pub frame_fill: &'static str,
    pub accent_emoji: &'static str,
    pub is_dark: bool,
}

pub(crate) const fn profile(theme: ThemeName) -> ThemeProfile {
    use ThemeName::*;
    match theme {
        Original => ThemeProfile {
            scheme: "original",
            card_color: "#E04025",
            frame_fill: "#F9D025",
            accent_emoji: "🍀",
            is_dark: false,
        },
        Wicked => ThemeProfile {
            scheme: "wicked",
            card_color: "#F5818B",
            frame_fill: "#3EA345",
            accent_emoji: "🍀",
            is_dark: false,
        },
        Ocean => ThemeProfile {
            scheme: "ocean",
            card_color: "#B3D9F6",
            frame_fill: "#326FC9",
            accent_emoji: "🦋",
            is_dark: false,
        },
        Night => ThemeProfile {
            scheme: "night",
            card_color: "#D9D9D9",
            frame_fill: "#000000",
            accent_emoji: "🌚",
            is_dark: true,
        },
        Sunset => ThemeProfile {
            scheme: "sunset",
            card_color: "#F9D025",
            frame_fill: "#E04025",
            accent_emoji: "🌅",
            is_dark: false,
        },
    }
}

pub(crate) const ATTR_NAME: &str = "data-theme";

/// Reflects the active board's theme onto `<html>` so the stylesheet can
/// switch palettes
pub(crate) fn apply(theme: ThemeName) {
    use gloo::utils::document;
    let scheme = profile(theme).scheme;
    let html = document()
        .query_selector("html")
        .expect("query must be correct")
        .expect("must have html element");
    log::debug!("theme-scheme: {}", scheme);
    if let Err(err) = html.set_attribute(ATTR_NAME, scheme) {
        log::error!("failed to set theme: {:?}", err);
    }
}
