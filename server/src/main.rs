#![recursion_limit = "256"]

mod llm;
mod routes;
mod services;
mod state;

use std::sync::Arc;

#[tokio::main]
async fn main() {
    // A missing .env is normal in deployed environments.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    // Without an API key nothing can be generated, so this is fatal.
    let llm = Arc::new(llm::LlmClient::from_env().expect("LLM configuration failed"));
    tracing::info!(model = llm.model(), "LLM client initialized");

    let image_config = services::image::ImageConfig::from_env().expect("image configuration failed");
    tracing::info!(backend = ?image_config.backend, "image resolver initialized");
    let images = services::image::build_resolver(&image_config, Arc::clone(&llm));

    let state = state::AppState::new(llm, images);

    let _sweeper = services::studio::spawn_session_sweeper(state.clone());

    let app = routes::leptos_app(state).expect("leptos app init failed");
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "comic studio listening");
    axum::serve(listener, app).await.expect("server failed");
}
