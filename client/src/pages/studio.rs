//! Comic studio page: prompt, loader, comic, continuation, and completion.
//!
//! SYSTEM CONTEXT
//! ==============
//! On mount the page loads (or mints) the browser's session id and fetches
//! the server snapshot, so a reload resumes the comic in progress. Every
//! action then follows the same shape: mirror the expected transition
//! locally, send the request, and replace the mirror with whatever snapshot
//! comes back.

use comic::{ContinueRequest, GenerateRequest};
use leptos::prelude::*;

use crate::components::comic_display::ComicDisplay;
use crate::components::continue_form::ContinueForm;
use crate::components::download_button::DownloadButton;
use crate::components::header::Header;
use crate::components::loader::Loader;
use crate::components::prompt_form::PromptForm;
use crate::state::comic::ComicState;

/// DOM id of the element captured by the PDF export.
pub const COMIC_CONTAINER_ID: &str = "comic-container";

#[cfg(feature = "hydrate")]
const POLL_EVERY: std::time::Duration = std::time::Duration::from_secs(3);

#[component]
pub fn StudioPage() -> impl IntoView {
    let comic = expect_context::<RwSignal<ComicState>>();

    #[cfg(feature = "hydrate")]
    {
        let session_id = crate::util::session_store::load_or_create_session_id();
        comic.update(|c| c.session_id = Some(session_id));
        let alive = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(true));
        let alive_task = alive.clone();
        leptos::task::spawn_local(async move {
            match crate::net::api::fetch_comic(session_id).await {
                Ok(snapshot) => comic.update(|c| c.apply_snapshot(snapshot)),
                Err(e) => log::warn!("could not load comic session {session_id}: {e}"),
            }
            // A batch started elsewhere (another tab, or before a reload) has
            // no request of ours to answer it, so poll until it settles.
            while comic.with_untracked(ComicState::awaiting_server) {
                gloo_timers::future::sleep(POLL_EVERY).await;
                if !alive_task.load(std::sync::atomic::Ordering::Relaxed) {
                    break;
                }
                match crate::net::api::fetch_comic(session_id).await {
                    Ok(snapshot) => comic.update(|c| c.apply_polled_snapshot(snapshot)),
                    Err(e) => log::warn!("could not refresh comic session {session_id}: {e}"),
                }
            }
        });
        on_cleanup(move || alive.store(false, std::sync::atomic::Ordering::Relaxed));
    }

    let is_loading = Signal::derive(move || comic.with(ComicState::is_loading));
    let page = Signal::derive(move || comic.with(ComicState::page));
    let pages = Signal::derive(move || comic.with(ComicState::pages));

    let on_generate = Callback::new(move |(story, character): (String, String)| {
        let Some(session_id) = comic.with_untracked(|c| c.session_id) else {
            return;
        };
        comic.update(ComicState::begin_generation);
        let body = GenerateRequest { story_prompt: story, character_prompt: character };

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let response = crate::net::api::generate_comic(session_id, &body).await;
            comic.update(|c| c.apply_response(response));
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (session_id, body);
    });

    let on_continue = Callback::new(move |next_story_part: String| {
        let Some(session_id) = comic.with_untracked(|c| c.session_id) else {
            return;
        };
        comic.update(ComicState::begin_continuation);
        let body = ContinueRequest { next_story_part };

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let response = crate::net::api::continue_comic(session_id, &body).await;
            comic.update(|c| c.apply_response(response));
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (session_id, body);
    });

    let on_new_comic = move |_: leptos::ev::MouseEvent| {
        let Some(session_id) = comic.with_untracked(|c| c.session_id) else {
            return;
        };
        comic.update(ComicState::begin_reset);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let response = crate::net::api::reset_comic(session_id).await;
            comic.update(|c| c.apply_response(response));
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = session_id;
    };

    view! {
        <div class="studio">
            <div class="studio__column">
                <Header/>
                <main class="studio__main">
                    {move || {
                        comic
                            .with(ComicState::show_prompt_form)
                            .then(|| view! { <PromptForm is_loading=is_loading on_generate=on_generate/> })
                    }}

                    {move || comic.with(ComicState::is_loading).then(|| view! { <Loader/> })}

                    {move || {
                        comic
                            .with(|c| c.error().map(str::to_owned))
                            .map(|message| {
                                view! {
                                    <div class="banner banner--error" role="alert">
                                        <p class="banner__title">"Generation Failed"</p>
                                        <p class="banner__body">{message}</p>
                                    </div>
                                }
                            })
                    }}

                    <div id=COMIC_CONTAINER_ID>
                        <ComicDisplay pages=pages/>
                    </div>

                    {move || {
                        comic
                            .with(ComicState::show_continue_form)
                            .then(|| view! { <ContinueForm page=page is_loading=is_loading on_continue=on_continue/> })
                    }}

                    {move || {
                        comic
                            .with(ComicState::show_completion)
                            .then(|| {
                                view! {
                                    <div class="card card--spaced banner--complete">
                                        <h3 class="card__title card__title--success">"The End!"</h3>
                                        <p class="card__subtitle">
                                            "You've reached the 10-page limit. Your epic comic is complete!"
                                        </p>
                                        <DownloadButton target_id=COMIC_CONTAINER_ID/>
                                    </div>
                                }
                            })
                    }}

                    {move || {
                        comic
                            .with(ComicState::show_new_comic)
                            .then(|| {
                                view! {
                                    <div class="studio__actions">
                                        <button class="btn btn--ghost" on:click=on_new_comic>
                                            "Start a new comic"
                                        </button>
                                    </div>
                                }
                            })
                    }}
                </main>
            </div>
        </div>
    }
}
