use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::error::{BoardError, Result};
use crate::grid::{Grid, TagMap};
use crate::share::SharePayload;
use crate::theme::ThemeName;
use crate::types::TOTAL_CELLS;

/// Name given to a board that predates board names (legacy storage record)
pub const DEFAULT_BOARD_NAME: &str = "My Board";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RenameOutcome {
    NoChange,
    Renamed,
}

impl RenameOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// All saved boards, keyed by name. The whole mapping is the unit of
/// persistence: every mutation re-serializes it in full. The active-board
/// pointer is runtime state only and is re-pinned after loading.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardRegistry {
    #[serde(flatten)]
    boards: BTreeMap<String, Board>,
    #[serde(skip)]
    active: Option<String>,
}

impl BoardRegistry {
    pub fn len(&self) -> usize {
        self.boards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.boards.keys().map(String::as_str)
    }

    pub fn boards(&self) -> impl Iterator<Item = &Board> {
        self.boards.values()
    }

    pub fn board(&self, name: &str) -> Option<&Board> {
        self.boards.get(name)
    }

    pub fn active_name(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn active(&self) -> Option<&Board> {
        self.boards.get(self.active.as_ref()?)
    }

    pub fn active_mut(&mut self) -> Option<&mut Board> {
        self.boards.get_mut(self.active.as_ref()?)
    }

    pub fn set_active(&mut self, name: &str) -> bool {
        if self.boards.contains_key(name) {
            self.active = Some(name.to_owned());
            true
        } else {
            false
        }
    }

    /// Pins the first board in iteration order when nothing is active yet,
    /// called once after loading from storage
    pub fn activate_first(&mut self) {
        if self.active().is_none() {
            self.active = self.boards.keys().next().cloned();
        }
    }

    /// Insert or replace under the board's own name
    pub fn upsert(&mut self, board: Board) {
        self.boards.insert(board.name.clone(), board);
    }

    /// Insert under a collision-free name, appending " (n)" as needed.
    /// Share imports and new-board creation go through this; local saves
    /// replace by name via [`BoardRegistry::upsert`].
    pub fn insert_unique(&mut self, mut board: Board) -> String {
        let name = self.unique_name(&board.name);
        board.name = name.clone();
        self.boards.insert(name.clone(), board);
        name
    }

    fn unique_name(&self, wanted: &str) -> String {
        let wanted = if wanted.trim().is_empty() {
            DEFAULT_BOARD_NAME
        } else {
            wanted
        };
        if !self.boards.contains_key(wanted) {
            return wanted.to_owned();
        }
        let mut n = 2;
        loop {
            let candidate = format!("{wanted} ({n})");
            if !self.boards.contains_key(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    /// Removes a board. If it was the active one, the first remaining board
    /// takes over; with none left the registry ends up with no active board.
    pub fn remove(&mut self, name: &str) -> Option<Board> {
        let removed = self.boards.remove(name)?;
        if self.active.as_deref() == Some(name) {
            self.active = self.boards.keys().next().cloned();
        }
        Some(removed)
    }

    /// Moves a board to a new key. Blank names and unknown boards are
    /// no-ops; colliding with another board is rejected.
    pub fn rename(&mut self, old: &str, new: &str) -> Result<RenameOutcome> {
        let new = new.trim();
        if new.is_empty() || new == old {
            return Ok(RenameOutcome::NoChange);
        }
        if self.boards.contains_key(new) {
            return Err(BoardError::NameTaken);
        }
        let Some(mut board) = self.boards.remove(old) else {
            return Ok(RenameOutcome::NoChange);
        };
        board.name = new.to_owned();
        self.boards.insert(new.to_owned(), board);
        if self.active.as_deref() == Some(old) {
            self.active = Some(new.to_owned());
        }
        Ok(RenameOutcome::Renamed)
    }

    /// Registers a decoded share payload as a new active board. A fully
    /// filled grid is shuffled with the recipient's seed (hiding the
    /// author's ordering) and locked immediately; anything less arrives as
    /// an ordinary editable board.
    pub fn import_shared(
        &mut self,
        payload: SharePayload,
        seed: u64,
        now: DateTime<Utc>,
    ) -> String {
        let mut board = Board::new(payload.name, now);
        board.goals = payload.goals;
        board.theme = payload.theme;
        if board.goals.is_complete() {
            board.goals.shuffle(seed);
            board.is_locked = true;
        }
        let name = self.insert_unique(board);
        self.active = Some(name.clone());
        name
    }
}

/// Single-board record from before boards had names, stored under the old
/// `bingoBoard` key as `{ goals, theme, isLocked? }` with an optional
/// per-cell `completed` flag.
#[derive(Clone, Debug, Deserialize)]
pub struct LegacyBoard {
    goals: Vec<LegacyCell>,
    #[serde(default)]
    theme: String,
    #[serde(default, rename = "isLocked")]
    is_locked: bool,
}

#[derive(Clone, Debug, Default, Deserialize)]
struct LegacyCell {
    #[serde(default)]
    goal: String,
    #[serde(default)]
    icon: String,
    #[serde(default)]
    completed: bool,
}

impl LegacyBoard {
    /// Converts to a [`Board`], padding or truncating to 25 cells and
    /// mapping `completed` flags to tags. A record without a lock flag but
    /// with a full grid and at least one completed cell predates the flag
    /// and is treated as locked.
    pub fn into_board(self, name: impl Into<String>, now: DateTime<Utc>) -> Board {
        let theme = ThemeName::from_name(&self.theme).unwrap_or_default();

        let mut cells = self.goals;
        cells.resize_with(TOTAL_CELLS, LegacyCell::default);

        let mut board = Board::new(name, now);
        let mut tagged = TagMap::default();
        let grid: Vec<_> = cells
            .iter()
            .enumerate()
            .map(|(index, cell)| {
                tagged.set(index, cell.completed);
                crate::cell::Cell::new(cell.goal.trim(), cell.icon.trim())
            })
            .collect();
        // the resize above makes the length conversion total
        board.goals = Grid::try_from(grid).expect("legacy grid is padded to 25 cells");
        board.theme = theme;
        board.is_locked =
            self.is_locked || (board.goals.is_complete() && tagged.tagged_count() > 0);
        board.tagged = if board.is_locked {
            tagged
        } else {
            TagMap::default()
        };
        board
    }
}

impl BoardRegistry {
    /// Explicit migration of the legacy single-board record: imported under
    /// [`DEFAULT_BOARD_NAME`] only when that key is free, so the multi-board
    /// registry always wins a conflict. Returns whether anything changed.
    pub fn migrate_legacy(&mut self, legacy: LegacyBoard, now: DateTime<Utc>) -> bool {
        if self.boards.contains_key(DEFAULT_BOARD_NAME) {
            log::info!("legacy board ignored, `{DEFAULT_BOARD_NAME}` already exists");
            return false;
        }
        let board = legacy.into_board(DEFAULT_BOARD_NAME, now);
        if board.completion_count() == 0 {
            log::info!("legacy board is empty, nothing to migrate");
            return false;
        }
        log::info!("migrated legacy board as `{DEFAULT_BOARD_NAME}`");
        self.upsert(board);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::share;

    fn t0() -> DateTime<Utc> {
        DateTime::UNIX_EPOCH
    }

    fn filled_board(name: &str) -> Board {
        let mut board = Board::new(name, t0());
        for index in 0..TOTAL_CELLS {
            board.set_cell(index, &format!("goal {index}"), "🎯").unwrap();
        }
        board
    }

    #[test]
    fn load_activates_first_board_in_iteration_order() {
        let mut registry = BoardRegistry::default();
        registry.upsert(Board::new("Zeta", t0()));
        registry.upsert(Board::new("Alpha", t0()));

        registry.activate_first();

        assert_eq!(registry.active_name(), Some("Alpha"));
    }

    #[test]
    fn deleting_the_active_board_falls_back_to_the_first_remaining() {
        let mut registry = BoardRegistry::default();
        registry.upsert(Board::new("A", t0()));
        registry.upsert(Board::new("B", t0()));
        registry.set_active("B");

        registry.remove("B").unwrap();

        assert_eq!(registry.active_name(), Some("A"));
    }

    #[test]
    fn deleting_the_only_board_empties_the_registry() {
        let mut registry = BoardRegistry::default();
        registry.upsert(Board::new("Only", t0()));
        registry.set_active("Only");

        registry.remove("Only").unwrap();

        assert!(registry.is_empty());
        assert_eq!(registry.active_name(), None);
        assert!(registry.active().is_none());
    }

    #[test]
    fn rename_to_blank_is_a_no_op() {
        let mut registry = BoardRegistry::default();
        registry.upsert(Board::new("Keep", t0()));
        registry.set_active("Keep");

        assert_eq!(registry.rename("Keep", "   ").unwrap(), RenameOutcome::NoChange);
        assert_eq!(registry.active_name(), Some("Keep"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn rename_moves_the_record_and_follows_the_active_pointer() {
        let mut registry = BoardRegistry::default();
        registry.upsert(filled_board("Old"));
        registry.set_active("Old");

        assert_eq!(registry.rename("Old", "New").unwrap(), RenameOutcome::Renamed);
        assert!(registry.board("Old").is_none());
        assert_eq!(registry.board("New").unwrap().name(), "New");
        assert_eq!(registry.active_name(), Some("New"));
    }

    #[test]
    fn rename_onto_an_existing_board_is_rejected() {
        let mut registry = BoardRegistry::default();
        registry.upsert(Board::new("A", t0()));
        registry.upsert(Board::new("B", t0()));

        assert_eq!(registry.rename("A", "B"), Err(BoardError::NameTaken));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn shared_names_collide_into_numeric_suffixes() {
        let mut registry = BoardRegistry::default();
        registry.upsert(Board::new("My Board", t0()));

        assert_eq!(registry.insert_unique(Board::new("My Board", t0())), "My Board (2)");
        assert_eq!(registry.insert_unique(Board::new("My Board", t0())), "My Board (3)");
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn importing_a_full_share_locks_and_permutes() {
        let source = filled_board("My Board");
        let payload = share::SharePayload::of(&source);

        let mut registry = BoardRegistry::default();
        let name = registry.import_shared(payload, 99, t0());

        let imported = registry.board(&name).unwrap();
        assert!(imported.is_locked());
        assert_eq!(registry.active_name(), Some(name.as_str()));

        let mut source_goals: Vec<_> = source.goals().iter().map(|c| c.goal.clone()).collect();
        let mut imported_goals: Vec<_> = imported.goals().iter().map(|c| c.goal.clone()).collect();
        source_goals.sort();
        imported_goals.sort();
        assert_eq!(source_goals, imported_goals);
    }

    #[test]
    fn importing_a_partial_share_stays_editable() {
        let mut source = Board::new("Draft", t0());
        source.set_cell(0, "goal", "").unwrap();
        let payload = share::SharePayload::of(&source);

        let mut registry = BoardRegistry::default();
        let name = registry.import_shared(payload, 99, t0());

        let imported = registry.board(&name).unwrap();
        assert!(!imported.is_locked());
        assert_eq!(imported.goals()[0].goal, "goal");
    }

    #[test]
    fn registry_serializes_as_a_plain_name_to_board_mapping() {
        let mut registry = BoardRegistry::default();
        registry.upsert(filled_board("2026"));
        registry.set_active("2026");

        let json = serde_json::to_value(&registry).unwrap();
        assert!(json.get("2026").is_some());
        assert!(json.get("active").is_none());

        let mut back: BoardRegistry = serde_json::from_value(json).unwrap();
        assert_eq!(back.active_name(), None);
        back.activate_first();
        assert_eq!(back.active_name(), Some("2026"));
    }

    #[test]
    fn legacy_board_migrates_completed_flags_to_tags() {
        let mut goals = Vec::new();
        for i in 0..TOTAL_CELLS {
            goals.push(serde_json::json!({
                "goal": format!("goal {i}"),
                "icon": "🎯",
                "completed": i == 0,
            }));
        }
        let legacy: LegacyBoard = serde_json::from_value(serde_json::json!({
            "goals": goals,
            "theme": "Ocean",
        }))
        .unwrap();

        let mut registry = BoardRegistry::default();
        assert!(registry.migrate_legacy(legacy, t0()));

        let board = registry.board(DEFAULT_BOARD_NAME).unwrap();
        assert_eq!(board.theme(), ThemeName::Ocean);
        assert!(board.is_locked());
        assert!(board.tagged().is_tagged(0));
        assert!(!board.tagged().is_tagged(1));
    }

    #[test]
    fn legacy_board_never_overwrites_an_existing_registry_entry() {
        let legacy: LegacyBoard = serde_json::from_value(serde_json::json!({
            "goals": [{"goal": "x", "icon": ""}],
        }))
        .unwrap();

        let mut registry = BoardRegistry::default();
        registry.upsert(filled_board(DEFAULT_BOARD_NAME));

        assert!(!registry.migrate_legacy(legacy, t0()));
        assert_eq!(registry.board(DEFAULT_BOARD_NAME).unwrap().completion_count(), TOTAL_CELLS);
    }
}
