//! Comic pages: four panels per page, each with image and caption.

#[cfg(test)]
#[path = "comic_display_test.rs"]
mod comic_display_test;

use comic::ComicPanel;
use leptos::prelude::*;

pub(crate) fn page_title(page_index: usize) -> String {
    format!("Page {}", page_index + 1)
}

pub(crate) fn panel_label(panel_id: u32) -> String {
    format!("Panel {panel_id}")
}

/// Renders already-grouped pages in order.
#[component]
pub fn ComicDisplay(#[prop(into)] pages: Signal<Vec<Vec<ComicPanel>>>) -> impl IntoView {
    view! {
        <div class="comic">
            {move || {
                pages
                    .get()
                    .into_iter()
                    .enumerate()
                    .map(|(page_index, panels)| {
                        view! {
                            <section class="comic__page">
                                <h2 class="comic__page-title">{page_title(page_index)}</h2>
                                <div class="comic__grid">
                                    {panels.into_iter().map(|panel| view! { <ComicPanelCard panel=panel/> }).collect_view()}
                                </div>
                            </section>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}

#[component]
fn ComicPanelCard(panel: ComicPanel) -> impl IntoView {
    view! {
        <div class="panel">
            <div class="panel__label">{panel_label(panel.id)}</div>
            <div class="panel__image">
                <img src=panel.image_url alt=panel.description/>
            </div>
            <div class="panel__caption">
                <p>{panel.text}</p>
            </div>
        </div>
    }
}
