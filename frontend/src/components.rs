use crate::models::{Platform, RefreshPhase, RefreshStatus, VideoEntry};
use crate::utils::{format_count_line, format_time_since, progress_bar_style};
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ErrorMessageProps {
    pub error_message: Option<String>,
}

#[function_component(ErrorMessage)]
pub fn error_message(props: &ErrorMessageProps) -> Html {
    if let Some(msg) = &props.error_message {
        html! {
            <div class="bg-red-100 border border-red-400 text-red-700 px-4 py-3 rounded mb-4">
                { msg }
            </div>
        }
    } else {
        html! {}
    }
}

#[derive(Properties, PartialEq)]
pub struct LinkInputProps {
    pub value: String,
    pub loading: bool,
    pub on_input: Callback<String>,
    pub on_submit: Callback<()>,
    pub on_refresh: Callback<()>,
}

#[function_component(LinkInput)]
pub fn link_input(props: &LinkInputProps) -> Html {
    let on_input = {
        let on_input = props.on_input.clone();
        Callback::from(move |e: InputEvent| {
            on_input.emit(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };

    let on_submit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: web_sys::SubmitEvent| {
            e.prevent_default();
            on_submit.emit(());
        })
    };

    let on_refresh = {
        let on_refresh = props.on_refresh.clone();
        Callback::from(move |_: MouseEvent| on_refresh.emit(()))
    };

    html! {
        <form onsubmit={on_submit} class="flex flex-col gap-2 mb-4">
            <input
                type="text"
                class="w-full p-3 border border-gray-300 rounded-lg focus:outline-none focus:ring-2 focus:ring-blue-500"
                placeholder="Paste YouTube/TikTok links (comma-separated)"
                value={props.value.clone()}
                oninput={on_input}
                disabled={props.loading}
            />
            <div class="flex gap-2">
                <button
                    type="submit"
                    class="flex-1 bg-blue-600 text-white p-2 rounded hover:bg-blue-700 disabled:opacity-50"
                    disabled={props.loading}
                >
                    { if props.loading { "Adding..." } else { "Add Videos" } }
                </button>
                <button
                    type="button"
                    onclick={on_refresh}
                    class="bg-gray-200 text-gray-800 px-4 py-2 rounded hover:bg-gray-300"
                >
                    {"Refresh now"}
                </button>
            </div>
        </form>
    }
}

#[derive(Properties, PartialEq)]
pub struct VideoCardProps {
    pub entry: VideoEntry,
    pub on_remove: Callback<u64>,
}

#[function_component(VideoCard)]
pub fn video_card(props: &VideoCardProps) -> Html {
    let entry = &props.entry;

    let badge_class = match entry.platform {
        Platform::YouTube => "bg-red-600",
        Platform::TikTok => "bg-gray-900",
    };

    let on_remove = {
        let on_remove = props.on_remove.clone();
        let id = entry.id;
        Callback::from(move |_: MouseEvent| on_remove.emit(id))
    };

    let updated = entry
        .updated_at
        .as_deref()
        .map(|date| format!("updated {}", format_time_since(date, chrono::Utc::now())))
        .unwrap_or_else(|| "waiting for first fetch".to_string());

    html! {
        <div class="bg-gray-200 rounded-lg p-4 flex gap-4 items-center">
            <div class={classes!("w-12", "h-12", "rounded-lg", "flex", "items-center", "justify-center", "text-white", "text-xs", "font-bold", badge_class)}>
                { entry.platform.display_name() }
            </div>
            <div class="flex-1 min-w-0">
                <h3 class="text-md font-semibold text-gray-800 break-words">{ &entry.title }</h3>
                <p class="text-sm text-gray-700">{ format_count_line("👀 Views", entry.views, &entry.views_trend) }</p>
                <p class="text-sm text-gray-700">{ format_count_line("👍 Likes", entry.likes, &entry.likes_trend) }</p>
                <p class="text-xs text-gray-500">
                    { updated }
                    {
                        if entry.stale {
                            html! { <span class="ml-2 text-orange-600">{"⚠ last fetch failed"}</span> }
                        } else {
                            html! {}
                        }
                    }
                </p>
                <div class="flex gap-2 mt-1">
                    <a
                        href={entry.url.clone()}
                        target="_blank"
                        class="bg-blue-600 text-white text-sm px-2 py-1 rounded hover:bg-blue-700"
                    >
                        {"Link"}
                    </a>
                    <button
                        onclick={on_remove}
                        class="bg-red-600 text-white text-sm px-2 py-1 rounded hover:bg-red-700"
                    >
                        {"Remove"}
                    </button>
                </div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct CardListProps {
    pub entries: Vec<VideoEntry>,
    pub on_remove: Callback<u64>,
}

#[function_component(CardList)]
pub fn card_list(props: &CardListProps) -> Html {
    if props.entries.is_empty() {
        return html! {
            <p class="text-center text-gray-500 py-8">{"No videos tracked yet."}</p>
        };
    }

    html! {
        <div class="space-y-3 overflow-y-auto max-h-[60vh] pr-1">
            { for props.entries.iter().map(|entry| html! {
                <VideoCard key={entry.id} entry={entry.clone()} on_remove={props.on_remove.clone()} />
            })}
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct RefreshProgressProps {
    pub status: Option<RefreshStatus>,
}

#[function_component(RefreshProgress)]
pub fn refresh_progress(props: &RefreshProgressProps) -> Html {
    let (style, label) = match &props.status {
        Some(status) => {
            let remaining = status
                .interval_secs
                .saturating_sub((status.progress * status.interval_secs as f64) as u64);
            let label = match status.phase {
                RefreshPhase::Fetching => format!("Fetching {} video(s)...", status.in_flight),
                RefreshPhase::Idle => format!("Next refresh in {}s", remaining),
            };
            (progress_bar_style(status.progress, status.color), label)
        }
        None => (progress_bar_style(0.0, [0, 120, 215]), String::new()),
    };

    html! {
        <div class="mt-4">
            <div class="w-full bg-gray-300 rounded h-3 overflow-hidden">
                <div class="h-3 rounded" style={style}></div>
            </div>
            <p class="text-xs text-gray-500 mt-1">{ label }</p>
        </div>
    }
}
