//! "What happens next?" form shown between pages.

#[cfg(test)]
#[path = "continue_form_test.rs"]
mod continue_form_test;

use comic::{MAX_PAGES, normalize_prompt};
use leptos::prelude::*;

pub(crate) fn progress_label(page: u32) -> String {
    format!("You are on Page {page} of {MAX_PAGES}. What happens next?")
}

pub(crate) fn submit_label(is_loading: bool) -> &'static str {
    if is_loading { "Generating Next Page..." } else { "Generate Next Page" }
}

/// Continuation form. The input is cleared once a plot is submitted.
#[component]
pub fn ContinueForm(
    #[prop(into)] page: Signal<u32>,
    #[prop(into)] is_loading: Signal<bool>,
    on_continue: Callback<String>,
) -> impl IntoView {
    let next_part = RwSignal::new(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if is_loading.get_untracked() {
            return;
        }
        let Some(plot) = normalize_prompt(&next_part.get_untracked()) else {
            return;
        };
        on_continue.run(plot);
        next_part.set(String::new());
    };

    let submit_disabled = move || is_loading.get() || next_part.with(|p| p.trim().is_empty());

    view! {
        <div class="card card--spaced">
            <h3 class="card__title">"Continue the Story!"</h3>
            <p class="card__subtitle">{move || progress_label(page.get())}</p>
            <form class="form" on:submit=on_submit>
                <div class="form__field">
                    <label for="next-story-part" class="form__label">"Next Story Plot"</label>
                    <textarea
                        id="next-story-part"
                        class="form__input"
                        rows="3"
                        placeholder="e.g., Squeaky discovers the cheese planet is guarded by a giant space cat."
                        aria-label="Next story plot"
                        prop:value=move || next_part.get()
                        on:input=move |ev| next_part.set(event_target_value(&ev))
                        required=true
                    ></textarea>
                </div>
                <button type="submit" class="btn btn--success" disabled=submit_disabled>
                    {move || submit_label(is_loading.get())}
                </button>
            </form>
        </div>
    }
}
