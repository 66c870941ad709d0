#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

mod api;
pub mod config;
pub mod page;
pub mod state;

use axum::Router;
use tower_http::{services::ServeDir, trace::TraceLayer};

pub use config::ServerConfig;
pub use state::{AppState, Library};

/// Build the full application router: the home page, `/toggle`, and the
/// media root served under `/videos/`.
pub fn app(state: AppState) -> Router {
    let videos = ServeDir::new(&state.config.media_root);

    Router::new()
        .merge(api::router())
        .nest_service("/videos", videos)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
