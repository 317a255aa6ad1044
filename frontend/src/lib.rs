pub mod pages;
pub mod styles;

use yew::prelude::*;
use crate::pages::wheel::WheelPage;

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <div class="min-h-screen w-full">
            <div class="mx-auto">
                <WheelPage />
            </div>
        </div>
    }
}
