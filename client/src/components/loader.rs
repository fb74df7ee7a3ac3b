//! Spinner with a rotating status message while a page is generating.
//!
//! The message advances every two seconds. The timer loop only runs in the
//! browser and stops when the loader is unmounted.

#[cfg(test)]
#[path = "loader_test.rs"]
mod loader_test;

use leptos::prelude::*;

pub const LOADING_MESSAGES: [&str; 7] = [
    "Sketching characters...",
    "Inking the panels...",
    "Coloring the scenes...",
    "Adding dialogue...",
    "Consulting the comic book masters...",
    "Polishing the final frames...",
    "Unleashing creative genius...",
];

#[cfg(feature = "hydrate")]
const ROTATE_EVERY: std::time::Duration = std::time::Duration::from_secs(2);

pub(crate) fn next_message_index(current: usize) -> usize {
    (current + 1) % LOADING_MESSAGES.len()
}

#[component]
pub fn Loader() -> impl IntoView {
    let index = RwSignal::new(0_usize);

    #[cfg(feature = "hydrate")]
    {
        let alive = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(true));
        let alive_task = alive.clone();
        leptos::task::spawn_local(async move {
            loop {
                gloo_timers::future::sleep(ROTATE_EVERY).await;
                if !alive_task.load(std::sync::atomic::Ordering::Relaxed) {
                    break;
                }
                index.update(|i| *i = next_message_index(*i));
            }
        });
        on_cleanup(move || alive.store(false, std::sync::atomic::Ordering::Relaxed));
    }

    view! {
        <div class="loader">
            <div class="loader__spinner" aria-hidden="true"></div>
            <p class="loader__message">{move || LOADING_MESSAGES[index.get()]}</p>
            <p class="loader__hint">"The AI is working its magic. This might take a moment!"</p>
        </div>
    }
}
