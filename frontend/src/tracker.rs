use crate::api::{add_links, load_refresh_status, load_videos, remove_video, trigger_refresh};
use crate::components::{CardList, ErrorMessage, LinkInput, RefreshProgress};
use crate::env_variable_utils::{get_app_name, POLL_INTERVAL_MS};
use crate::models::{RefreshStatus, VideoEntry};
use gloo_timers::callback::Interval;
use web_sys::console;
use yew::prelude::*;

async fn reload(
    entries: UseStateHandle<Vec<VideoEntry>>,
    status: UseStateHandle<Option<RefreshStatus>>,
    error_message: UseStateHandle<Option<String>>,
) {
    match load_videos().await {
        Ok(list) => entries.set(list),
        Err(e) => {
            console::error_1(&format!("Failed to load videos: {e}").into());
            error_message.set(Some(format!("Failed to load videos: {}", e)));
            return;
        }
    }

    match load_refresh_status().await {
        Ok(current) => status.set(Some(current)),
        Err(e) => error_message.set(Some(format!("Failed to load refresh status: {}", e))),
    }
}

#[function_component(TrackerPage)]
pub fn tracker_page() -> Html {
    let entries = use_state(Vec::<VideoEntry>::new);
    let status = use_state(|| None::<RefreshStatus>);
    let link_input = use_state(String::new);
    let loading = use_state(|| false);
    let error_message = use_state(|| None::<String>);

    // Poll the backend for cards and progress while mounted
    {
        let entries = entries.clone();
        let status = status.clone();
        let error_message = error_message.clone();

        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(reload(
                entries.clone(),
                status.clone(),
                error_message.clone(),
            ));

            let interval = Interval::new(*POLL_INTERVAL_MS, move || {
                wasm_bindgen_futures::spawn_local(reload(
                    entries.clone(),
                    status.clone(),
                    error_message.clone(),
                ));
            });

            move || drop(interval)
        });
    }

    let on_input = {
        let link_input = link_input.clone();
        Callback::from(move |value: String| link_input.set(value))
    };

    let on_submit = {
        let link_input = link_input.clone();
        let entries = entries.clone();
        let status = status.clone();
        let loading = loading.clone();
        let error_message = error_message.clone();

        Callback::from(move |_| {
            let input = (*link_input).clone();
            if input.trim().is_empty() {
                return;
            }

            let link_input = link_input.clone();
            let entries = entries.clone();
            let status = status.clone();
            let loading = loading.clone();
            let error_message = error_message.clone();

            loading.set(true);
            error_message.set(None);

            wasm_bindgen_futures::spawn_local(async move {
                match add_links(&input).await {
                    Ok(response) => {
                        link_input.set(String::new());
                        if response.ignored > 0 {
                            console::log_1(
                                &format!("Ignored {} unrecognised link(s)", response.ignored)
                                    .into(),
                            );
                        }
                        reload(entries, status, error_message).await;
                    }
                    Err(e) => {
                        error_message.set(Some(format!("Failed to add videos: {}", e)));
                    }
                }
                loading.set(false);
            });
        })
    };

    let on_refresh = {
        let error_message = error_message.clone();

        Callback::from(move |_| {
            let error_message = error_message.clone();
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(e) = trigger_refresh().await {
                    error_message.set(Some(format!("Failed to refresh: {}", e)));
                }
            });
        })
    };

    let on_remove = {
        let entries = entries.clone();
        let error_message = error_message.clone();

        Callback::from(move |id: u64| {
            let entries = entries.clone();
            let error_message = error_message.clone();

            wasm_bindgen_futures::spawn_local(async move {
                match remove_video(id).await {
                    Ok(_) => {
                        let updated: Vec<VideoEntry> = (*entries)
                            .clone()
                            .into_iter()
                            .filter(|entry| entry.id != id)
                            .collect();
                        entries.set(updated);
                    }
                    Err(e) => {
                        error_message.set(Some(format!("Failed to remove video: {}", e)));
                    }
                }
            });
        })
    };

    html! {
        <div class="min-h-screen bg-gray-700 p-4">
            <div class="max-w-2xl mx-auto">
                <div class="bg-white rounded-lg shadow-lg p-6">
                    <h1 class="text-2xl font-bold text-gray-800 mb-4">{ get_app_name() }</h1>

                    <ErrorMessage error_message={(*error_message).clone()} />

                    <LinkInput
                        value={(*link_input).clone()}
                        loading={*loading}
                        on_input={on_input}
                        on_submit={on_submit}
                        on_refresh={on_refresh}
                    />

                    <CardList entries={(*entries).clone()} on_remove={on_remove} />

                    <RefreshProgress status={(*status).clone()} />
                </div>
            </div>
        </div>
    }
}
