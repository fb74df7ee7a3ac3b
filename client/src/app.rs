//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Script, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::pages::studio::StudioPage;
use crate::state::comic::ComicState;

const HTML2CANVAS_SRC: &str = "https://cdnjs.cloudflare.com/ajax/libs/html2canvas/1.4.1/html2canvas.min.js";
const JSPDF_SRC: &str = "https://cdnjs.cloudflare.com/ajax/libs/jspdf/2.5.1/jspdf.umd.min.js";

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the comic state context and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let comic = RwSignal::new(ComicState::default());
    provide_context(comic);

    view! {
        <Stylesheet id="leptos" href="/pkg/comic-studio.css"/>
        <Title text="AI Comic Creator"/>
        // PDF export globals: window.html2canvas and window.jspdf.
        <Script src=HTML2CANVAS_SRC/>
        <Script src=JSPDF_SRC/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=StudioPage/>
            </Routes>
        </Router>
    }
}
