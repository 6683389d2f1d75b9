use serde::{Deserialize, Serialize};

/// Named presentation profile. Boards store the name only; the palette
/// behind each name lives in the view and can evolve without touching
/// saved boards.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThemeName {
    Original,
    Wicked,
    Ocean,
    Night,
    Sunset,
}

impl ThemeName {
    pub const ALL: [ThemeName; 5] = [
        ThemeName::Original,
        ThemeName::Wicked,
        ThemeName::Ocean,
        ThemeName::Night,
        ThemeName::Sunset,
    ];

    pub const fn name(self) -> &'static str {
        use ThemeName::*;
        match self {
            Original => "Original",
            Wicked => "Wicked",
            Ocean => "Ocean",
            Night => "Night",
            Sunset => "Sunset",
        }
    }

    /// Lookup by stored name, `None` for anything not in the catalog
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|theme| theme.name() == name)
    }
}

impl Default for ThemeName {
    fn default() -> Self {
        Self::Wicked
    }
}
