//! Initial story + character prompt form.

#[cfg(test)]
#[path = "prompt_form_test.rs"]
mod prompt_form_test;

use comic::normalize_prompt;
use leptos::prelude::*;

pub const DEFAULT_STORY_PROMPT: &str = "A brave squirrel astronaut explores a planet made entirely of cheese.";
pub const DEFAULT_CHARACTER_PROMPT: &str =
    "A courageous squirrel named Squeaky, wearing a tiny silver space helmet and a determined expression.";

/// Both fields trimmed, or `None` when either is blank.
pub(crate) fn validate_prompts(story: &str, character: &str) -> Option<(String, String)> {
    Some((normalize_prompt(story)?, normalize_prompt(character)?))
}

pub(crate) fn submit_label(is_loading: bool) -> &'static str {
    if is_loading { "Generating Your Masterpiece..." } else { "Create Comic" }
}

/// Form that starts a new comic. Prefilled with an example story.
#[component]
pub fn PromptForm(#[prop(into)] is_loading: Signal<bool>, on_generate: Callback<(String, String)>) -> impl IntoView {
    let story = RwSignal::new(DEFAULT_STORY_PROMPT.to_owned());
    let character = RwSignal::new(DEFAULT_CHARACTER_PROMPT.to_owned());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if is_loading.get_untracked() {
            return;
        }
        if let Some(prompts) = validate_prompts(&story.get_untracked(), &character.get_untracked()) {
            on_generate.run(prompts);
        }
    };

    view! {
        <div class="card">
            <form class="form" on:submit=on_submit>
                <div class="form__field">
                    <label for="story-prompt" class="form__label">"Story Idea"</label>
                    <textarea
                        id="story-prompt"
                        class="form__input"
                        rows="3"
                        placeholder="e.g., A detective cat solves the mystery of the missing tuna."
                        prop:value=move || story.get()
                        on:input=move |ev| story.set(event_target_value(&ev))
                        required=true
                    ></textarea>
                </div>
                <div class="form__field">
                    <label for="character-prompt" class="form__label">"Main Character Description"</label>
                    <input
                        id="character-prompt"
                        class="form__input"
                        type="text"
                        placeholder="e.g., A grumpy cat named Whiskers with a tiny fedora and trench coat."
                        prop:value=move || character.get()
                        on:input=move |ev| character.set(event_target_value(&ev))
                        required=true
                    />
                </div>
                <button type="submit" class="btn btn--primary" disabled=move || is_loading.get()>
                    {move || submit_label(is_loading.get())}
                </button>
            </form>
        </div>
    }
}
