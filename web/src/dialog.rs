use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::inspire;
use crate::utils::Modal;

/// Icon choices offered in the goal dialog
const EMOJI_CHOICES: &[&str] = &[
    "🏃", "💪", "🧘", "🥾", "⚽", "🏊", "✈️", "🗺️", "🏕️", "🚗", "📚", "✍️",
    "🎨", "🎸", "💻", "🗣️", "💼", "🤝", "💰", "📈", "🏠", "❤️", "🌱", "🌅",
];

#[derive(Properties, PartialEq)]
pub(crate) struct GoalDialogProps {
    #[prop_or_default]
    pub open: bool,
    pub goal: AttrValue,
    pub icon: AttrValue,
    pub on_goal_input: Callback<String>,
    pub on_icon_pick: Callback<String>,
    pub on_save: Callback<()>,
    pub on_close: Callback<()>,
}

/// Edit dialog for one cell: icon picker, goal text, inspiration chips.
/// Owns nothing; every keystroke flows to the parent's edit buffer and only
/// a save commits it to the board.
#[function_component]
pub(crate) fn GoalDialog(props: &GoalDialogProps) -> Html {
    if !props.open {
        return html! {};
    }

    let can_save = !props.goal.trim().is_empty();

    let oninput = {
        let on_goal_input = props.on_goal_input.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_goal_input.emit(input.value());
        })
    };

    let onkeydown = {
        let on_save = props.on_save.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                on_save.emit(());
            }
        })
    };

    let cb_save = {
        let on_save = props.on_save.clone();
        Callback::from(move |_: MouseEvent| on_save.emit(()))
    };

    let cb_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let cb_inspire = {
        let on_goal_input = props.on_goal_input.clone();
        Callback::from(move |_: MouseEvent| on_goal_input.emit(inspire::random_inspiration().to_string()))
    };

    html! {
        <Modal>
            <dialog class="goal-dialog" open=true>
                <article>
                    <h2>{"+ ADD YOUR GOAL"}</h2>
                    <div class="emoji-picker">
                        {
                            for EMOJI_CHOICES.iter().map(|&emoji| {
                                let on_icon_pick = props.on_icon_pick.clone();
                                let selected = props.icon.as_str() == emoji;
                                let onclick = Callback::from(move |_: MouseEvent| {
                                    on_icon_pick.emit(emoji.to_string());
                                });
                                html! {
                                    <button class={classes!("emoji", selected.then_some("selected"))} {onclick}>
                                        {emoji}
                                    </button>
                                }
                            })
                        }
                    </div>
                    <input
                        type="text"
                        placeholder="Enter your goal..."
                        value={props.goal.clone()}
                        {oninput}
                        {onkeydown}
                    />
                    <details class="inspirations">
                        <summary>{"Need inspiration?"}</summary>
                        <button class="surprise" onclick={cb_inspire}>{"Surprise me"}</button>
                        <ul>
                            {
                                for inspire::INSPIRATIONS.iter().map(|&(text, category)| {
                                    let on_goal_input = props.on_goal_input.clone();
                                    let onclick = Callback::from(move |_: MouseEvent| {
                                        on_goal_input.emit(text.to_string());
                                    });
                                    html! {
                                        <li data-category={category.label()}>
                                            <button {onclick}>{text}</button>
                                        </li>
                                    }
                                })
                            }
                        </ul>
                    </details>
                    <footer>
                        <button type="reset" onclick={cb_close}>{"Cancel"}</button>
                        <button disabled={!can_save} onclick={cb_save}>{"Save Goal"}</button>
                    </footer>
                </article>
            </dialog>
        </Modal>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct ShareDialogProps {
    #[prop_or_default]
    pub open: bool,
    pub url: AttrValue,
    pub on_close: Callback<()>,
}

#[function_component]
pub(crate) fn ShareDialog(props: &ShareDialogProps) -> Html {
    if !props.open {
        return html! {};
    }

    let cb_copy = {
        let url = props.url.to_string();
        Callback::from(move |_: MouseEvent| copy_to_clipboard(url.clone()))
    };

    let cb_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    html! {
        <Modal>
            <dialog class="share-dialog" open=true>
                <article>
                    <h2>{"Share Your Bingo Board"}</h2>
                    <p>{"Copy this link to share your bingo board with others:"}</p>
                    <div class="share-link">
                        <input type="text" readonly=true value={props.url.clone()}/>
                        <button onclick={cb_copy}>{"Copy"}</button>
                    </div>
                    <footer>
                        <button type="reset" onclick={cb_close}>{"Close"}</button>
                    </footer>
                </article>
            </dialog>
        </Modal>
    }
}

/// One-shot fire-and-forget write, no cancellation
fn copy_to_clipboard(url: String) {
    let clipboard = gloo::utils::window().navigator().clipboard();
    spawn_local(async move {
        match JsFuture::from(clipboard.write_text(&url)).await {
            Ok(_) => log::debug!("share link copied"),
            Err(err) => log::error!("could not copy share link: {:?}", err),
        }
    });
}
