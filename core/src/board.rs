use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::error::{BoardError, Result};
use crate::grid::{Grid, TagMap};
use crate::theme::ThemeName;
use crate::types::{CellIndex, TOTAL_CELLS};

/// Where a board sits in its lifecycle. `Daubing` is only derivable for a
/// locked board, so tagging an unlocked board cannot be expressed.
///
/// Valid transitions:
/// - Empty -> Editing (first goal saved)
/// - Editing -> Filled (25th goal saved)
/// - Filled -> Locked (explicit lock)
/// - Locked <-> Daubing (daub mode toggled in the view)
/// - any -> Empty (explicit reset, irreversible)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BoardPhase {
    /// No goals filled in yet
    Empty,
    /// Some goals filled in, still editable
    Editing,
    /// All 25 goals filled in, lock available
    Filled,
    /// Goals frozen, tags are the only mutable state
    Locked,
    /// Locked with daub mode active, cell clicks toggle tags
    Daubing,
}

impl BoardPhase {
    pub const fn is_locked(self) -> bool {
        use BoardPhase::*;
        match self {
            Empty => false,
            Editing => false,
            Filled => false,
            Locked => true,
            Daubing => true,
        }
    }

    pub const fn can_edit(self) -> bool {
        !self.is_locked()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EditOutcome {
    NoChange,
    GoalSaved,
    GoalCleared,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ShuffleOutcome {
    NoChange,
    Shuffled,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LockOutcome {
    NoChange,
    Locked,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TagOutcome {
    Tagged,
    Untagged,
}

impl EditOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

impl ShuffleOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

impl LockOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

fn unix_epoch() -> DateTime<Utc> {
    DateTime::UNIX_EPOCH
}

/// One complete bingo board: 25 goals, a theme, the lock flag and the daub
/// marks. Identity is the `name`, which doubles as the registry key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub(crate) name: String,
    pub(crate) goals: Grid,
    #[serde(default)]
    pub(crate) theme: ThemeName,
    #[serde(default)]
    pub(crate) is_locked: bool,
    #[serde(default, rename = "taggedCells")]
    pub(crate) tagged: TagMap,
    #[serde(default = "unix_epoch")]
    pub(crate) created_at: DateTime<Utc>,
}

impl Board {
    pub fn new(name: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            goals: Grid::default(),
            theme: ThemeName::default(),
            is_locked: false,
            tagged: TagMap::default(),
            created_at,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn goals(&self) -> &Grid {
        &self.goals
    }

    pub fn theme(&self) -> ThemeName {
        self.theme
    }

    pub fn is_locked(&self) -> bool {
        self.is_locked
    }

    pub fn tagged(&self) -> &TagMap {
        &self.tagged
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn completion_count(&self) -> usize {
        self.goals.completion_count()
    }

    /// Lifecycle phase for the current lock flag, completion count and the
    /// caller's transient daub-mode flag
    pub fn phase(&self, daub_mode: bool) -> BoardPhase {
        if self.is_locked {
            if daub_mode {
                BoardPhase::Daubing
            } else {
                BoardPhase::Locked
            }
        } else {
            match self.completion_count() {
                0 => BoardPhase::Empty,
                TOTAL_CELLS => BoardPhase::Filled,
                _ => BoardPhase::Editing,
            }
        }
    }

    fn check_unlocked(&self) -> Result<()> {
        if self.is_locked {
            Err(BoardError::BoardLocked)
        } else {
            Ok(())
        }
    }

    fn check_locked(&self) -> Result<()> {
        if self.is_locked {
            Ok(())
        } else {
            Err(BoardError::BoardUnlocked)
        }
    }

    /// Writes a goal into a cell. Whitespace-only goals are a no-op, edits
    /// on a locked board are rejected.
    pub fn set_cell(&mut self, index: CellIndex, goal: &str, icon: &str) -> Result<EditOutcome> {
        self.check_unlocked()?;
        let cell = self
            .goals
            .cell_mut(index)
            .ok_or(BoardError::IndexOutOfRange)?;

        let goal = goal.trim();
        if goal.is_empty() {
            return Ok(EditOutcome::NoChange);
        }

        let next = Cell::new(goal, icon.trim());
        if *cell == next {
            Ok(EditOutcome::NoChange)
        } else {
            *cell = next;
            Ok(EditOutcome::GoalSaved)
        }
    }

    /// Empties a cell again, same lock rules as [`Board::set_cell`]
    pub fn clear_cell(&mut self, index: CellIndex) -> Result<EditOutcome> {
        self.check_unlocked()?;
        let cell = self
            .goals
            .cell_mut(index)
            .ok_or(BoardError::IndexOutOfRange)?;

        if cell.is_filled() {
            cell.clear();
            Ok(EditOutcome::GoalCleared)
        } else {
            Ok(EditOutcome::NoChange)
        }
    }

    /// Permutes the goal contents across the fixed grid positions
    pub fn shuffle(&mut self, seed: u64) -> Result<ShuffleOutcome> {
        self.check_unlocked()?;
        if self.completion_count() == 0 {
            // permuting 25 empty cells changes nothing observable
            return Ok(ShuffleOutcome::NoChange);
        }
        self.goals.shuffle(seed);
        Ok(ShuffleOutcome::Shuffled)
    }

    /// Freezes the goals. Requires all 25 cells filled; locking an already
    /// locked board is a no-op.
    pub fn lock(&mut self) -> Result<LockOutcome> {
        if self.is_locked {
            return Ok(LockOutcome::NoChange);
        }
        let filled = self.completion_count();
        if filled < TOTAL_CELLS {
            return Err(BoardError::IncompleteBoard { filled });
        }
        self.is_locked = true;
        Ok(LockOutcome::Locked)
    }

    /// Flips one daub mark, only valid on a locked board
    pub fn toggle_tag(&mut self, index: CellIndex) -> Result<TagOutcome> {
        self.check_locked()?;
        if index >= TOTAL_CELLS {
            return Err(BoardError::IndexOutOfRange);
        }
        Ok(if self.tagged.toggle(index) {
            TagOutcome::Tagged
        } else {
            TagOutcome::Untagged
        })
    }

    pub fn set_theme(&mut self, theme: ThemeName) -> bool {
        if self.theme == theme {
            false
        } else {
            self.theme = theme;
            true
        }
    }

    /// Back to a blank board: goals, icons, lock flag and tags all cleared.
    /// There is no undo.
    pub fn reset(&mut self) {
        self.goals = Grid::default();
        self.tagged.clear();
        self.is_locked = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t0() -> DateTime<Utc> {
        DateTime::UNIX_EPOCH
    }

    fn filled_board(name: &str) -> Board {
        let mut board = Board::new(name, t0());
        for index in 0..TOTAL_CELLS {
            board.set_cell(index, &format!("goal {index}"), "🏃").unwrap();
        }
        board
    }

    #[test]
    fn fill_all_cells_then_lock_succeeds() {
        let mut board = filled_board("2026");
        assert_eq!(board.completion_count(), TOTAL_CELLS);
        assert_eq!(board.phase(false), BoardPhase::Filled);

        assert_eq!(board.lock().unwrap(), LockOutcome::Locked);
        assert!(board.is_locked());
        assert_eq!(board.phase(false), BoardPhase::Locked);
        assert_eq!(board.phase(true), BoardPhase::Daubing);
    }

    #[test]
    fn locking_an_incomplete_board_is_rejected() {
        let mut board = Board::new("2026", t0());
        for index in 0..10 {
            board.set_cell(index, "goal", "").unwrap();
        }

        assert_eq!(
            board.lock(),
            Err(BoardError::IncompleteBoard { filled: 10 })
        );
        assert!(!board.is_locked());
    }

    #[test]
    fn locking_twice_is_a_no_op() {
        let mut board = filled_board("2026");
        assert_eq!(board.lock().unwrap(), LockOutcome::Locked);
        assert_eq!(board.lock().unwrap(), LockOutcome::NoChange);
        assert!(board.is_locked());
    }

    #[test]
    fn locked_goals_are_immutable_except_tags() {
        let mut board = filled_board("2026");
        board.lock().unwrap();
        let before = board.goals().clone();

        assert_eq!(board.set_cell(0, "changed", ""), Err(BoardError::BoardLocked));
        assert_eq!(board.clear_cell(0), Err(BoardError::BoardLocked));
        assert_eq!(board.shuffle(1), Err(BoardError::BoardLocked));
        assert_eq!(board.goals(), &before);

        assert_eq!(board.toggle_tag(0).unwrap(), TagOutcome::Tagged);
        assert!(board.tagged().is_tagged(0));
        assert_eq!(board.toggle_tag(0).unwrap(), TagOutcome::Untagged);
    }

    #[test]
    fn tagging_an_unlocked_board_is_rejected() {
        let mut board = filled_board("2026");
        assert_eq!(board.toggle_tag(0), Err(BoardError::BoardUnlocked));
        assert_eq!(board.tagged().tagged_count(), 0);
    }

    #[test]
    fn whitespace_only_goal_is_a_no_op() {
        let mut board = Board::new("2026", t0());
        assert_eq!(board.set_cell(0, "   ", "🏃").unwrap(), EditOutcome::NoChange);
        assert_eq!(board.completion_count(), 0);
        assert_eq!(board.phase(false), BoardPhase::Empty);
    }

    #[test]
    fn goal_text_and_icon_are_trimmed_on_save() {
        let mut board = Board::new("2026", t0());
        assert_eq!(
            board.set_cell(3, "  Run  ", " 🏃 ").unwrap(),
            EditOutcome::GoalSaved
        );
        assert_eq!(board.goals()[3], Cell::new("Run", "🏃"));
        assert_eq!(board.phase(false), BoardPhase::Editing);
    }

    #[test]
    fn out_of_range_edit_is_rejected() {
        let mut board = Board::new("2026", t0());
        assert_eq!(
            board.set_cell(TOTAL_CELLS, "goal", ""),
            Err(BoardError::IndexOutOfRange)
        );
    }

    #[test]
    fn reset_clears_goals_lock_and_tags() {
        let mut board = filled_board("2026");
        board.lock().unwrap();
        board.toggle_tag(5).unwrap();

        board.reset();

        assert_eq!(board.phase(false), BoardPhase::Empty);
        assert!(!board.is_locked());
        assert_eq!(board.completion_count(), 0);
        assert_eq!(board.tagged().tagged_count(), 0);
    }

    #[test]
    fn shuffling_an_empty_board_reports_no_change() {
        let mut board = Board::new("2026", t0());
        assert_eq!(board.shuffle(42).unwrap(), ShuffleOutcome::NoChange);
    }

    #[test]
    fn board_serializes_with_camel_case_wire_names() {
        let mut board = filled_board("2026");
        board.lock().unwrap();
        board.toggle_tag(1).unwrap();

        let json = serde_json::to_value(&board).unwrap();
        assert_eq!(json["isLocked"], serde_json::json!(true));
        assert_eq!(json["taggedCells"][1], serde_json::json!(true));
        assert!(json["createdAt"].is_string());
        assert_eq!(json["goals"].as_array().unwrap().len(), TOTAL_CELLS);

        let back: Board = serde_json::from_value(json).unwrap();
        assert_eq!(back, board);
    }
}
