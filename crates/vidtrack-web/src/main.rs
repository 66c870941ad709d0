use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vidtrack_web::{AppState, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "vidtrack_web=info,vidtrack_core=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();
    let state = AppState::from_config(config.clone());
    {
        let library = state.library.read().await;
        tracing::info!(
            media_root = %config.media_root.display(),
            progress_file = %config.progress_file.display(),
            videos = library.catalog.len(),
            completed = library.catalog.completed_count(),
            "Loaded video catalog"
        );
    }

    let app = vidtrack_web::app(state);

    tracing::info!("Starting vidtrack on http://{}", config.addr);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
