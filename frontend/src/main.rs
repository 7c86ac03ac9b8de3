mod api;
mod components;
mod env_variable_utils;
mod models;
mod tracker;
mod utils;

use crate::env_variable_utils::{get_app_name, get_backend_url, POLL_INTERVAL_MS};
use crate::tracker::TrackerPage;
use web_sys::console;
use yew::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <TrackerPage />
    }
}

fn main() {
    yew::Renderer::<App>::new().render();

    console::log_1(
        &format!(
            "NAME: \"{}\", API: \"{}\", POLL: {}ms",
            get_app_name(),
            get_backend_url(),
            *POLL_INTERVAL_MS
        )
        .into(),
    );
}
