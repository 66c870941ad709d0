use axum::{extract::State, http::StatusCode, response::Html};

use crate::page;
use crate::state::AppState;

pub async fn home(State(state): State<AppState>) -> Result<Html<String>, (StatusCode, String)> {
    let library = state.library.read().await;
    let html = page::render_home(&library.catalog).map_err(|e| {
        tracing::error!("Failed to encode videos: {}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, format!("Failed to encode videos: {e}"))
    })?;
    Ok(Html(html))
}
