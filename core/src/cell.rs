use serde::{Deserialize, Serialize};

use crate::types::{CellIndex, TOTAL_CELLS};

/// One goal on the board. Empty until the user fills in a goal text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    #[serde(default)]
    pub goal: String,
    #[serde(default)]
    pub icon: String,
}

impl Cell {
    pub fn new(goal: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            goal: goal.into(),
            icon: icon.into(),
        }
    }

    pub fn is_filled(&self) -> bool {
        !self.goal.is_empty()
    }

    pub fn clear(&mut self) {
        self.goal.clear();
        self.icon.clear();
    }
}

/// Decorative shape drawn behind a cell. Shapes belong to grid positions,
/// not to cell contents: shuffling moves goals, shapes stay put.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellShape {
    Circle,
    Quatrefoil,
    Wavy,
    Fancy,
    Star,
}

impl CellShape {
    pub const fn css_class(self) -> &'static str {
        use CellShape::*;
        match self {
            Circle => "circle",
            Quatrefoil => "quatrefoil",
            Wavy => "wavy",
            Fancy => "fancy",
            Star => "star",
        }
    }

    /// Shape for a grid position, total over all indices
    pub const fn at(index: CellIndex) -> Self {
        SHAPE_PATTERN[index % TOTAL_CELLS]
    }
}

/// Per-position card color used by the Original theme
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellColor {
    Rouge,
    Vert,
    Rose,
    Jaune,
    Bleu,
}

impl CellColor {
    pub const fn css_class(self) -> &'static str {
        use CellColor::*;
        match self {
            Rouge => "rouge",
            Vert => "vert",
            Rose => "rose",
            Jaune => "jaune",
            Bleu => "bleu",
        }
    }

    /// Color for a grid position, total over all indices
    pub const fn at(index: CellIndex) -> Self {
        ORIGINAL_COLORS[index % TOTAL_CELLS]
    }
}

// rows
const SHAPE_PATTERN: [CellShape; TOTAL_CELLS] = {
    use CellShape::*;
    [
        Circle, Quatrefoil, Wavy, Fancy, Circle,
        Fancy, Wavy, Star, Wavy, Fancy,
        Star, Circle, Fancy, Circle, Star,
        Quatrefoil, Wavy, Quatrefoil, Star, Quatrefoil,
        Wavy, Star, Circle, Quatrefoil, Fancy,
    ]
};

const ORIGINAL_COLORS: [CellColor; TOTAL_CELLS] = {
    use CellColor::*;
    [
        Rouge, Vert, Rose, Jaune, Bleu,
        Rose, Jaune, Vert, Bleu, Vert,
        Bleu, Rose, Rouge, Vert, Rouge,
        Jaune, Rouge, Bleu, Jaune, Rose,
        Vert, Rose, Jaune, Rouge, Bleu,
    ]
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_and_color_lookups_are_total() {
        for index in 0..TOTAL_CELLS {
            // must not panic and must produce a non-empty class
            assert!(!CellShape::at(index).css_class().is_empty());
            assert!(!CellColor::at(index).css_class().is_empty());
        }
    }

    #[test]
    fn cell_is_filled_iff_it_has_goal_text() {
        let cell = Cell::new("", "🏃");
        assert!(!cell.is_filled());
        let cell = Cell::new("Run a 5K race", "🏃");
        assert!(cell.is_filled());
    }
}
