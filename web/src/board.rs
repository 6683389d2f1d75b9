use bingo_core::{
    Board, BoardError, BoardPhase, BoardRegistry, Cell, CellColor, CellIndex, CellShape,
    DEFAULT_BOARD_NAME, GRID_SIZE, LOAD_PARAM, LegacyBoard, LockOutcome, SharePayload,
    TOTAL_CELLS, TagOutcome, ThemeName,
};
use chrono::{DateTime, Utc};
use gloo::storage::errors::StorageError;
use gloo::storage::{LocalStorage, Storage};
use gloo::timers::callback::Timeout;
use wasm_bindgen::JsValue;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::dialog::{GoalDialog, ShareDialog};
use crate::theme;
use crate::utils::*;

impl StorageKey for BoardRegistry {
    const KEY: &'static str = "bingoBoards";
}

/// Storage slot of the single-board format that predates the registry
const LEGACY_KEY: &str = "bingoBoard";

/// The grid flip animation runs 600ms; the actual permutation lands halfway
/// through, while the cells are face-down.
const SHUFFLE_APPLY_MS: u32 = 300;
const SHUFFLE_FINISH_MS: u32 = 600;

const NOTICE_MS: u32 = 2500;

#[derive(Clone, Debug, PartialEq)]
struct EditBuffer {
    index: CellIndex,
    goal: String,
    icon: String,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    CellClicked(CellIndex),
    EditGoal(String),
    EditIcon(String),
    SaveGoal,
    CloseDialog,
    Shuffle,
    ApplyShuffle,
    FinishShuffle,
    Lock,
    ToggleDaubMode,
    ResetBoard,
    NewBoard,
    SelectBoard(String),
    RenameBoard(String),
    DeleteBoard,
    ChangeTheme(ThemeName),
    OpenShare,
    CloseShare,
    ClearNotice,
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    index: CellIndex,
    cell: Cell,
    #[prop_or_default]
    tagged: bool,
    #[prop_or_default]
    daubable: bool,
    #[prop_or_default]
    original_colors: bool,
    callback: Callback<CellIndex>,
}

#[function_component(CellView)]
fn cell_view(props: &CellProps) -> Html {
    let CellProps {
        index,
        cell,
        tagged,
        daubable,
        original_colors,
        callback,
    } = props.clone();

    let mut class = classes!("cell", CellShape::at(index).css_class());
    if original_colors {
        class.push(CellColor::at(index).css_class());
    }
    if tagged {
        class.push("tagged");
    }
    if daubable {
        class.push("daubable");
    }

    let onclick = Callback::from(move |_: MouseEvent| callback.emit(index));

    html! {
        <td {class} {onclick}>
            if cell.is_filled() {
                <span class="icon">{cell.icon.clone()}</span>
                <p class="goal">{cell.goal.clone()}</p>
            } else {
                <p class="hint">{"Click to add goal"}</p>
            }
        </td>
    }
}

/// Root component. Owns the registry and all transient UI state; every
/// board mutation goes through the engine operations and ends with the
/// whole registry written back to local storage.
pub(crate) struct BoardView {
    registry: BoardRegistry,
    /// Stand-in board while the registry is empty; committed to the
    /// registry on its first real mutation
    draft: Board,
    daub_mode: bool,
    edit: Option<EditBuffer>,
    share_url: Option<String>,
    notice: Option<String>,
    shuffling: bool,
    shuffle_apply: Option<Timeout>,
    shuffle_finish: Option<Timeout>,
    notice_timer: Option<Timeout>,
}

impl BoardView {
    fn current(&self) -> &Board {
        self.registry.active().unwrap_or(&self.draft)
    }

    fn current_mut(&mut self) -> &mut Board {
        if self.registry.active_name().is_some() {
            self.registry.active_mut().expect("active board must exist")
        } else {
            &mut self.draft
        }
    }

    fn commit_draft(&mut self) {
        commit_draft(&mut self.registry, &mut self.draft, utc_now());
    }

    fn notify(&mut self, ctx: &Context<Self>, text: impl Into<String>) {
        self.notice = Some(text.into());
        let link = ctx.link().clone();
        self.notice_timer = Some(Timeout::new(NOTICE_MS, move || {
            link.send_message(Msg::ClearNotice)
        }));
    }

    fn save_goal(&mut self, buffer: EditBuffer) {
        let result = if buffer.goal.trim().is_empty() {
            self.current_mut().clear_cell(buffer.index)
        } else {
            self.current_mut()
                .set_cell(buffer.index, &buffer.goal, &buffer.icon)
        };
        match result {
            Ok(outcome) => {
                if outcome.has_update() {
                    self.commit_draft();
                }
            }
            // locked-board edits are rejected silently
            Err(BoardError::BoardLocked) => log::debug!("edit rejected, board is locked"),
            Err(err) => log::warn!("could not save goal: {}", err),
        }
    }

    fn toggle_tag(&mut self, ctx: &Context<Self>, index: CellIndex) -> bool {
        match self.current_mut().toggle_tag(index) {
            Ok(TagOutcome::Tagged) => {
                self.notify(ctx, "Goal completed! 🎉");
                true
            }
            Ok(TagOutcome::Untagged) => {
                self.notify(ctx, "Goal uncompleted");
                true
            }
            Err(err) => {
                log::debug!("tag rejected: {}", err);
                false
            }
        }
    }
}

impl Component for BoardView {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let mut registry = BoardRegistry::local_or_default();
        let mut notice = None;
        let mut dirty = false;

        if let Some(legacy) = take_legacy_board() {
            dirty |= registry.migrate_legacy(legacy, utc_now());
        }

        match pending_share_payload() {
            Some(Ok(payload)) => {
                let name = registry.import_shared(payload, js_random_seed(), utc_now());
                log::info!("imported shared board as `{}`", name);
                notice = Some(format!("Imported shared board \"{name}\""));
                dirty = true;
                strip_share_param();
            }
            Some(Err(err)) => {
                log::warn!("invalid share link: {}", err);
                notice = Some("That share link is invalid".to_string());
                strip_share_param();
            }
            None => {}
        }

        registry.activate_first();
        if dirty {
            registry.local_save();
        }

        let current_theme = registry.active().map_or_else(ThemeName::default, |b| b.theme());
        theme::apply(current_theme);

        let notice_timer = notice.as_ref().map(|_| {
            let link = ctx.link().clone();
            Timeout::new(NOTICE_MS, move || link.send_message(Msg::ClearNotice))
        });

        Self {
            registry,
            draft: Board::new(DEFAULT_BOARD_NAME, utc_now()),
            daub_mode: false,
            edit: None,
            share_url: None,
            notice,
            shuffling: false,
            shuffle_apply: None,
            shuffle_finish: None,
            notice_timer,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        let updated = match msg {
            CellClicked(index) => match self.current().phase(self.daub_mode) {
                BoardPhase::Daubing => self.toggle_tag(ctx, index),
                BoardPhase::Locked => {
                    // locked without daub mode: cells are inert
                    log::debug!("cell {} clicked while locked", index);
                    false
                }
                BoardPhase::Empty | BoardPhase::Editing | BoardPhase::Filled => {
                    match self.current().goals().cell(index) {
                        Some(cell) => {
                            self.edit = Some(EditBuffer {
                                index,
                                goal: cell.goal.clone(),
                                icon: cell.icon.clone(),
                            });
                            true
                        }
                        None => false,
                    }
                }
            },
            EditGoal(goal) => match &mut self.edit {
                Some(buffer) => {
                    buffer.goal = goal;
                    true
                }
                None => false,
            },
            EditIcon(icon) => match &mut self.edit {
                Some(buffer) => {
                    buffer.icon = icon;
                    true
                }
                None => false,
            },
            SaveGoal => match self.edit.take() {
                Some(buffer) => {
                    self.save_goal(buffer);
                    true
                }
                None => false,
            },
            CloseDialog => self.edit.take().is_some(),
            Shuffle => {
                if self.current().is_locked() {
                    self.notify(ctx, BoardError::BoardLocked.to_string());
                    true
                } else if self.shuffling {
                    false
                } else {
                    self.shuffling = true;
                    let link = ctx.link().clone();
                    self.shuffle_apply = Some(Timeout::new(SHUFFLE_APPLY_MS, move || {
                        link.send_message(ApplyShuffle)
                    }));
                    let link = ctx.link().clone();
                    self.shuffle_finish = Some(Timeout::new(SHUFFLE_FINISH_MS, move || {
                        link.send_message(FinishShuffle)
                    }));
                    true
                }
            }
            ApplyShuffle => {
                self.shuffle_apply = None;
                match self.current_mut().shuffle(js_random_seed()) {
                    Ok(outcome) => {
                        if outcome.has_update() {
                            self.commit_draft();
                        }
                        outcome.has_update()
                    }
                    Err(err) => {
                        log::debug!("shuffle rejected: {}", err);
                        false
                    }
                }
            }
            FinishShuffle => {
                self.shuffle_finish = None;
                self.shuffling = false;
                true
            }
            Lock => match self.current_mut().lock() {
                Ok(LockOutcome::Locked) => {
                    self.commit_draft();
                    self.notify(ctx, "Board locked! Toggle daub mode to tag finished goals");
                    true
                }
                Ok(LockOutcome::NoChange) => {
                    self.notify(ctx, "Board is already locked");
                    true
                }
                Err(err) => {
                    self.notify(ctx, err.to_string());
                    true
                }
            },
            ToggleDaubMode => {
                if self.current().is_locked() {
                    self.daub_mode = !self.daub_mode;
                    true
                } else {
                    self.notify(ctx, BoardError::BoardUnlocked.to_string());
                    true
                }
            }
            ResetBoard => {
                self.current_mut().reset();
                self.daub_mode = false;
                self.edit = None;
                true
            }
            NewBoard => {
                let name = self
                    .registry
                    .insert_unique(Board::new(DEFAULT_BOARD_NAME, utc_now()));
                self.registry.set_active(&name);
                self.daub_mode = false;
                self.edit = None;
                theme::apply(self.current().theme());
                true
            }
            SelectBoard(name) => {
                if self.registry.set_active(&name) {
                    self.daub_mode = false;
                    self.edit = None;
                    theme::apply(self.current().theme());
                    true
                } else {
                    log::warn!("unknown board selected: {}", name);
                    false
                }
            }
            RenameBoard(new_name) => match self.registry.active_name().map(str::to_owned) {
                Some(old_name) => match self.registry.rename(&old_name, &new_name) {
                    Ok(outcome) => outcome.has_update(),
                    Err(err) => {
                        self.notify(ctx, err.to_string());
                        true
                    }
                },
                None => false,
            },
            DeleteBoard => match self.registry.active_name().map(str::to_owned) {
                Some(name) => {
                    self.registry.remove(&name);
                    self.daub_mode = false;
                    self.edit = None;
                    self.notify(ctx, format!("Deleted \"{name}\""));
                    theme::apply(self.current().theme());
                    true
                }
                None => false,
            },
            ChangeTheme(theme_name) => {
                if self.current_mut().set_theme(theme_name) {
                    self.commit_draft();
                    theme::apply(theme_name);
                    true
                } else {
                    false
                }
            }
            OpenShare => {
                if self.current().completion_count() == 0 {
                    self.notify(ctx, "Fill in some goals before sharing");
                } else {
                    let origin = gloo::utils::window()
                        .location()
                        .origin()
                        .unwrap_or_default();
                    self.share_url = Some(SharePayload::of(self.current()).share_url(&origin));
                }
                true
            }
            CloseShare => self.share_url.take().is_some(),
            ClearNotice => {
                self.notice_timer = None;
                self.notice.take().is_some()
            }
        };

        self.registry.local_save();
        updated
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let board = self.current();
        let phase = board.phase(self.daub_mode);
        let profile = theme::profile(board.theme());
        let completed = board.completion_count();
        let original_colors = board.theme() == ThemeName::Original;

        let cell_callback = ctx.link().callback(CellClicked);

        let cb_shuffle = ctx.link().callback(|_: MouseEvent| Shuffle);
        let cb_lock = ctx.link().callback(|_: MouseEvent| Lock);
        let cb_daub = ctx.link().callback(|_: MouseEvent| ToggleDaubMode);
        let cb_share = ctx.link().callback(|_: MouseEvent| OpenShare);
        let cb_reset = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            ResetBoard
        });
        let cb_new_board = ctx.link().callback(|_: MouseEvent| NewBoard);
        let cb_rename = ctx.link().callback(|e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            RenameBoard(input.value())
        });
        let cb_delete = ctx.link().callback(|_: MouseEvent| DeleteBoard);

        html! {
            <div class={classes!("bingo", self.shuffling.then_some("shuffling"), profile.is_dark.then_some("dark"))}>
                <header>
                    <h1>{format!("{} NEW YEAR'S RESOLUTION BINGO {}", profile.accent_emoji, profile.accent_emoji)}</h1>
                    <p>{"TWENTY-FIVE INTENTIONS FOR THE FULL YEAR AHEAD!"}</p>
                </header>
                <nav class="actions">
                    <aside class="counter">
                        <strong>{format!("{completed}/{TOTAL_CELLS}")}</strong>
                        <small>{"COMPLETED"}</small>
                    </aside>
                    <button onclick={cb_shuffle} disabled={phase.is_locked() || self.shuffling}>
                        {"Shuffle"}
                    </button>
                    <button onclick={cb_lock} disabled={phase.is_locked()}>{"Lock Board"}</button>
                    <button
                        class={classes!("daub", self.daub_mode.then_some("active"))}
                        onclick={cb_daub}
                        disabled={!phase.is_locked()}
                    >
                        {"Daub Mode"}
                    </button>
                    <button onclick={cb_share}>{"Share"}</button>
                    <button onclick={cb_reset}>{"Reset Board"}</button>
                </nav>
                <aside class="themes">
                    {
                        for ThemeName::ALL.into_iter().map(|theme_name| {
                            let onclick = ctx.link().callback(move |_: MouseEvent| ChangeTheme(theme_name));
                            let selected = board.theme() == theme_name;
                            let swatch = theme::profile(theme_name);
                            html! {
                                <button
                                    class={classes!("theme", selected.then_some("selected"))}
                                    style={format!("--card: {}; --frame: {}", swatch.card_color, swatch.frame_fill)}
                                    {onclick}
                                >
                                    {theme_name.name().to_lowercase()}
                                </button>
                            }
                        })
                    }
                </aside>
                <aside class="boards">
                    <ul>
                        {
                            for self.registry.names().map(|name| {
                                let name = name.to_owned();
                                let active = self.registry.active_name() == Some(name.as_str());
                                let onclick = {
                                    let name = name.clone();
                                    ctx.link().callback(move |_: MouseEvent| SelectBoard(name.clone()))
                                };
                                html! {
                                    <li class={classes!(active.then_some("active"))}>
                                        <button {onclick}>{name}</button>
                                    </li>
                                }
                            })
                        }
                    </ul>
                    <button onclick={cb_new_board}>{"+ New Board"}</button>
                    if let Some(active_name) = self.registry.active_name() {
                        <input
                            type="text"
                            class="rename"
                            value={active_name.to_owned()}
                            onchange={cb_rename}
                        />
                        <button class="delete" onclick={cb_delete}>{"Delete Board"}</button>
                    }
                </aside>
                <table class="grid">
                    {
                        for (0..GRID_SIZE).map(|row| html! {
                            <tr>
                                {
                                    for (0..GRID_SIZE).map(|col| {
                                        let index = row * GRID_SIZE + col;
                                        let cell = board.goals()[index].clone();
                                        let tagged = board.tagged().is_tagged(index);
                                        html! {
                                            <CellView
                                                {index}
                                                {cell}
                                                {tagged}
                                                daubable={phase == BoardPhase::Daubing}
                                                {original_colors}
                                                callback={cell_callback.clone()}
                                            />
                                        }
                                    })
                                }
                            </tr>
                        })
                    }
                </table>
                if let Some(notice) = &self.notice {
                    <aside class="notice">{notice}</aside>
                }
                <GoalDialog
                    open={self.edit.is_some()}
                    goal={self.edit.as_ref().map(|b| b.goal.clone()).unwrap_or_default()}
                    icon={self.edit.as_ref().map(|b| b.icon.clone()).unwrap_or_default()}
                    on_goal_input={ctx.link().callback(EditGoal)}
                    on_icon_pick={ctx.link().callback(EditIcon)}
                    on_save={ctx.link().callback(|()| SaveGoal)}
                    on_close={ctx.link().callback(|()| CloseDialog)}
                />
                <ShareDialog
                    open={self.share_url.is_some()}
                    url={self.share_url.clone().unwrap_or_default()}
                    on_close={ctx.link().callback(|()| CloseShare)}
                />
            </div>
        }
    }
}

/// First real mutation of the draft turns it into a registry board; `draft`
/// is left holding a fresh empty board.
fn commit_draft(registry: &mut BoardRegistry, draft: &mut Board, now: DateTime<Utc>) {
    if registry.active_name().is_none() {
        let board = std::mem::replace(draft, Board::new(DEFAULT_BOARD_NAME, now));
        let name = registry.insert_unique(board);
        registry.set_active(&name);
    }
}

fn take_legacy_board() -> Option<LegacyBoard> {
    match LocalStorage::get::<LegacyBoard>(LEGACY_KEY) {
        Ok(legacy) => {
            LocalStorage::delete(LEGACY_KEY);
            Some(legacy)
        }
        Err(StorageError::KeyNotFound(_)) => None,
        Err(err) => {
            // corrupt record: drop it and continue from the registry
            log::error!("could not parse legacy board, discarding: {:?}", err);
            LocalStorage::delete(LEGACY_KEY);
            None
        }
    }
}

/// Reads the one-time `?load=` parameter, if any
fn pending_share_payload() -> Option<Result<SharePayload, bingo_core::DecodeError>> {
    let search = gloo::utils::window().location().search().ok()?;
    if search.is_empty() {
        return None;
    }
    let params = web_sys::UrlSearchParams::new_with_str(&search).ok()?;
    let encoded = params.get(LOAD_PARAM)?;
    Some(SharePayload::decode(&encoded))
}

/// Removes `load` from the visible URL, replacing (not pushing) history
fn strip_share_param() {
    let window = gloo::utils::window();
    let location = window.location();
    let (Ok(search), Ok(pathname), Ok(hash)) = (location.search(), location.pathname(), location.hash())
    else {
        return;
    };
    let Ok(params) = web_sys::UrlSearchParams::new_with_str(&search) else {
        return;
    };
    params.delete(LOAD_PARAM);
    let query = String::from(params.to_string());
    let url = if query.is_empty() {
        format!("{pathname}{hash}")
    } else {
        format!("{pathname}?{query}{hash}")
    };
    let Ok(history) = window.history() else {
        return;
    };
    if let Err(err) = history.replace_state_with_url(&JsValue::NULL, "", Some(&url)) {
        log::error!("could not strip share parameter: {:?}", err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_keys_match_the_persisted_layout() {
        assert_eq!(<BoardRegistry as StorageKey>::KEY, "bingoBoards");
        assert_eq!(LEGACY_KEY, "bingoBoard");
    }

    #[test]
    fn shuffle_mutation_lands_mid_animation() {
        assert!(SHUFFLE_APPLY_MS < SHUFFLE_FINISH_MS);
    }

    #[test]
    fn theme_change_on_a_fresh_board_survives_the_commit() {
        let mut registry = BoardRegistry::default();
        let mut draft = Board::new(DEFAULT_BOARD_NAME, DateTime::UNIX_EPOCH);
        assert!(draft.set_theme(ThemeName::Night));

        commit_draft(&mut registry, &mut draft, DateTime::UNIX_EPOCH);

        assert_eq!(registry.active_name(), Some(DEFAULT_BOARD_NAME));
        assert_eq!(registry.active().unwrap().theme(), ThemeName::Night);
        // the replacement draft starts from the default theme again
        assert_eq!(draft.theme(), ThemeName::default());
    }

    #[test]
    fn committing_with_an_active_board_is_a_no_op() {
        let mut registry = BoardRegistry::default();
        registry.upsert(Board::new("Existing", DateTime::UNIX_EPOCH));
        registry.set_active("Existing");
        let mut draft = Board::new(DEFAULT_BOARD_NAME, DateTime::UNIX_EPOCH);

        commit_draft(&mut registry, &mut draft, DateTime::UNIX_EPOCH);

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.active_name(), Some("Existing"));
    }
}
