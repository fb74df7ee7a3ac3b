//! "Download as PDF" button for a finished comic.
//!
//! ERROR HANDLING
//! ==============
//! Export failures are logged and reported with a blocking `alert`, never
//! through the studio's error banner.

use leptos::prelude::*;

#[cfg(test)]
#[path = "download_button_test.rs"]
mod download_button_test;

pub(crate) fn button_label(is_exporting: bool) -> &'static str {
    if is_exporting { "Creating PDF..." } else { "⬇ Download as PDF" }
}

/// Exports the element with id `target_id` to `ai-comic.pdf`.
#[component]
pub fn DownloadButton(target_id: &'static str) -> impl IntoView {
    let exporting = RwSignal::new(false);

    let on_click = move |_: leptos::ev::MouseEvent| {
        if exporting.get_untracked() {
            return;
        }
        exporting.set(true);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            if let Err(e) = crate::util::export::export_to_pdf(target_id).await {
                log::error!("failed to generate PDF: {e}");
                if let Some(window) = web_sys::window() {
                    let _ = window.alert_with_message(crate::util::export::EXPORT_FAILED_MESSAGE);
                }
            }
            exporting.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = target_id;
            exporting.set(false);
        }
    };

    view! {
        <div class="download">
            <button class="btn btn--accent" on:click=on_click disabled=move || exporting.get()>
                {move || button_label(exporting.get())}
            </button>
        </div>
    }
}
