use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cell::Cell;
use crate::types::{CellIndex, TOTAL_CELLS};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
#[error("expected exactly {TOTAL_CELLS} entries, got {0}")]
pub struct WrongLength(usize);

/// The 25 cells of a board, row-major. The length-25 invariant is enforced
/// on every deserialization path through the `try_from` conversion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Cell>", into = "Vec<Cell>")]
pub struct Grid(Vec<Cell>);

impl Default for Grid {
    fn default() -> Self {
        Self(vec![Cell::default(); TOTAL_CELLS])
    }
}

impl TryFrom<Vec<Cell>> for Grid {
    type Error = WrongLength;

    fn try_from(cells: Vec<Cell>) -> Result<Self, Self::Error> {
        if cells.len() == TOTAL_CELLS {
            Ok(Self(cells))
        } else {
            Err(WrongLength(cells.len()))
        }
    }
}

impl From<Grid> for Vec<Cell> {
    fn from(grid: Grid) -> Self {
        grid.0
    }
}

impl Grid {
    pub fn cell(&self, index: CellIndex) -> Option<&Cell> {
        self.0.get(index)
    }

    pub(crate) fn cell_mut(&mut self, index: CellIndex) -> Option<&mut Cell> {
        self.0.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// How many cells have a goal filled in
    pub fn completion_count(&self) -> usize {
        self.0.iter().filter(|cell| cell.is_filled()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.completion_count() == TOTAL_CELLS
    }

    /// Unbiased permutation of the cell contents. Positions (and their
    /// shape/color decorations) do not move, only what is written in them.
    pub(crate) fn shuffle(&mut self, seed: u64) {
        use rand::prelude::*;
        let mut rng = SmallRng::seed_from_u64(seed);
        self.0.shuffle(&mut rng);
    }
}

impl core::ops::Index<CellIndex> for Grid {
    type Output = Cell;

    fn index(&self, index: CellIndex) -> &Self::Output {
        &self.0[index]
    }
}

/// Per-cell daub marks, index-aligned with [`Grid`]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<bool>", into = "Vec<bool>")]
pub struct TagMap(Vec<bool>);

impl Default for TagMap {
    fn default() -> Self {
        Self(vec![false; TOTAL_CELLS])
    }
}

impl TryFrom<Vec<bool>> for TagMap {
    type Error = WrongLength;

    fn try_from(tags: Vec<bool>) -> Result<Self, Self::Error> {
        if tags.len() == TOTAL_CELLS {
            Ok(Self(tags))
        } else {
            Err(WrongLength(tags.len()))
        }
    }
}

impl From<TagMap> for Vec<bool> {
    fn from(tags: TagMap) -> Self {
        tags.0
    }
}

impl TagMap {
    pub fn is_tagged(&self, index: CellIndex) -> bool {
        self.0.get(index).copied().unwrap_or(false)
    }

    pub fn tagged_count(&self) -> usize {
        self.0.iter().filter(|&&tagged| tagged).count()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Flips one mark, returns the new value
    pub(crate) fn toggle(&mut self, index: CellIndex) -> bool {
        let tag = &mut self.0[index];
        *tag = !*tag;
        *tag
    }

    pub(crate) fn set(&mut self, index: CellIndex, tagged: bool) {
        self.0[index] = tagged;
    }

    pub(crate) fn clear(&mut self) {
        self.0.iter_mut().for_each(|tag| *tag = false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_grid() -> Grid {
        let mut grid = Grid::default();
        for index in 0..TOTAL_CELLS {
            *grid.cell_mut(index).unwrap() = Cell::new(format!("goal {index}"), "🎯");
        }
        grid
    }

    #[test]
    fn default_grid_is_25_empty_cells() {
        let grid = Grid::default();
        assert_eq!(grid.len(), TOTAL_CELLS);
        assert_eq!(grid.completion_count(), 0);
        assert!(!grid.is_complete());
    }

    #[test]
    fn deserializing_wrong_length_fails() {
        let short = serde_json::json!([{"goal": "x", "icon": ""}]).to_string();
        assert!(serde_json::from_str::<Grid>(&short).is_err());

        let tags = serde_json::json!([true, false]).to_string();
        assert!(serde_json::from_str::<TagMap>(&tags).is_err());
    }

    #[test]
    fn grid_survives_serde_round_trip() {
        let grid = filled_grid();
        let json = serde_json::to_string(&grid).unwrap();
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(grid, back);
        assert_eq!(back.len(), TOTAL_CELLS);
    }

    #[test]
    fn shuffle_permutes_contents_and_keeps_length() {
        let original = filled_grid();
        let mut shuffled = original.clone();
        shuffled.shuffle(0xB1A60);

        assert_eq!(shuffled.len(), TOTAL_CELLS);
        assert_eq!(shuffled.completion_count(), TOTAL_CELLS);

        let mut original_goals: Vec<_> = original.iter().map(|c| c.goal.clone()).collect();
        let mut shuffled_goals: Vec<_> = shuffled.iter().map(|c| c.goal.clone()).collect();
        original_goals.sort();
        shuffled_goals.sort();
        assert_eq!(original_goals, shuffled_goals);
    }

    #[test]
    fn shuffle_is_deterministic_per_seed() {
        let mut a = filled_grid();
        let mut b = filled_grid();
        a.shuffle(7);
        b.shuffle(7);
        assert_eq!(a, b);
    }

    #[test]
    fn tag_toggle_flips_and_reports_new_state() {
        let mut tags = TagMap::default();
        assert!(tags.toggle(3));
        assert!(tags.is_tagged(3));
        assert_eq!(tags.tagged_count(), 1);
        assert!(!tags.toggle(3));
        assert_eq!(tags.tagged_count(), 0);
    }
}
