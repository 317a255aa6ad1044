use web_sys::{window, Storage};
use wheel_shared::WheelSession;
use yew::prelude::*;

use crate::styles;

pub const STATE_KEY: &str = "wheelState";

fn local_storage() -> Option<Storage> {
    window().and_then(|w| w.local_storage().ok().flatten())
}

// Read the saved wheel document, if any
pub fn load_state() -> Option<String> {
    local_storage().and_then(|s| s.get_item(STATE_KEY).ok().flatten())
}

pub fn save_state(session: &WheelSession) {
    let json = match session.to_data().to_json() {
        Ok(json) => json,
        Err(err) => {
            log::warn!("Could not serialize wheel state: {}", err);
            return;
        }
    };

    match local_storage() {
        Some(storage) => {
            if let Err(err) = storage.set_item(STATE_KEY, &json) {
                log::warn!("Could not save wheel state: {:?}", err);
            }
        }
        None => log::warn!("localStorage unavailable, wheel state not saved"),
    }
}

#[derive(Properties, PartialEq)]
pub struct SpinButtonProps {
    pub is_spinning: bool,
    pub can_spin: bool,
    pub onclick: Callback<MouseEvent>,
}

#[function_component(SpinButton)]
pub fn spin_button(props: &SpinButtonProps) -> Html {
    let is_disabled = props.is_spinning || !props.can_spin;
    let button_text = if props.is_spinning { "Spinning..." } else { "Spin" };

    let button_class = if is_disabled {
        "bg-gradient-to-r from-gray-400 to-gray-500 opacity-75 cursor-not-allowed text-white"
    } else {
        "bg-gradient-to-r from-yellow-400 to-orange-500 hover:from-yellow-500 hover:to-orange-600 text-white shadow-lg hover:shadow-xl"
    };

    html! {
        <button
            onclick={props.onclick.clone()}
            disabled={is_disabled}
            class={classes!(
                "w-full",
                "px-8",
                "py-4",
                "rounded-full",
                "font-bold",
                "text-lg",
                "transition-all",
                "duration-300",
                button_class
            )}
        >
            {button_text}
        </button>
    }
}

#[derive(Properties, PartialEq)]
pub struct TagTogglesProps {
    /// Tags in first-seen order, each with its enabled state.
    pub tags: Vec<(String, bool)>,
    pub on_toggle: Callback<String>,
}

#[function_component(TagToggles)]
pub fn tag_toggles(props: &TagTogglesProps) -> Html {
    if props.tags.is_empty() {
        return html! {};
    }

    html! {
        <div class="flex flex-wrap gap-2 justify-center">
            { for props.tags.iter().map(|(tag, enabled)| {
                let on_toggle = props.on_toggle.clone();
                let name = tag.clone();
                html! {
                    <span
                        key={tag.clone()}
                        class={if *enabled { styles::TAG_ON } else { styles::TAG_OFF }}
                        onclick={Callback::from(move |_: MouseEvent| on_toggle.emit(name.clone()))}
                    >
                        {tag.clone()}
                    </span>
                }
            }) }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct WinnerDisplayProps {
    pub winner: Option<String>,
}

#[function_component(WinnerDisplay)]
pub fn winner_display(props: &WinnerDisplayProps) -> Html {
    match &props.winner {
        Some(text) => html! {
            <div class="mt-6 flex justify-center">
                <div class="px-6 py-4 rounded-xl bg-gradient-to-r from-yellow-400 to-orange-500 text-white font-bold text-xl shadow-lg">
                    {format!("Winner: {}", text)}
                </div>
            </div>
        },
        None => html! {},
    }
}
