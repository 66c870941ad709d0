use axum::{
    extract::{rejection::FormRejection, rejection::QueryRejection, Query, State},
    response::IntoResponse,
    Form, Json,
};
use serde::Serialize;

use crate::state::AppState;

type Fields = Vec<(String, String)>;

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub status: &'static str,
}

/// First `path` value, looking at the urlencoded body before the query
/// string. Missing or unreadable input yields an empty path.
fn requested_path(body: &[(String, String)], query: &[(String, String)]) -> String {
    body.iter()
        .chain(query)
        .find(|(key, _)| key == "path")
        .map(|(_, value)| value.clone())
        .unwrap_or_default()
}

/// Unknown paths, malformed input and save failures still answer with success.
pub async fn toggle(
    State(state): State<AppState>,
    query: Result<Query<Fields>, QueryRejection>,
    body: Result<Form<Fields>, FormRejection>,
) -> impl IntoResponse {
    let query = query.map(|Query(fields)| fields).unwrap_or_default();
    let body = body.map(|Form(fields)| fields).unwrap_or_default();
    let path = requested_path(&body, &query);

    state.library.write().await.toggle(&path).await;
    Json(ToggleResponse { status: "success" })
}
