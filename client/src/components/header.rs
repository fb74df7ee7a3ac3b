//! Page header with title and tagline.

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <div class="header__badge" aria-hidden="true">"📖"</div>
            <h1 class="header__title">"AI Comic Creator"</h1>
            <p class="header__tagline">
                "Turn your wildest ideas into stunning comic book panels. Just describe your story and character, and let the AI bring it to life!"
            </p>
        </header>
    }
}
