use std::sync::Arc;

use tokio::sync::RwLock;
use vidtrack_core::{Catalog, ProgressStore};

use crate::config::ServerConfig;

/// The video catalog together with the file its progress is saved to
pub struct Library {
    pub catalog: Catalog,
    pub store: ProgressStore,
}

impl Library {
    pub fn new(catalog: Catalog, store: ProgressStore) -> Self {
        Self { catalog, store }
    }

    /// Scan the media root and merge in any saved progress
    pub fn load(config: &ServerConfig) -> Self {
        let mut catalog = Catalog::scan(&config.media_root);
        let store = ProgressStore::new(&config.progress_file);
        catalog.apply_progress(&store.load());
        Self::new(catalog, store)
    }

    /// Toggle a video and persist the whole catalog.
    ///
    /// Unknown paths leave the catalog as is; the file is rewritten either
    /// way. Save failures are logged, the in-memory flag still changes.
    ///
    /// The write runs on the blocking pool. Callers hold `&mut self` for the
    /// whole call, so saves never overlap.
    pub async fn toggle(&mut self, path: &str) -> Option<bool> {
        let completed = self.catalog.toggle(path);
        match completed {
            Some(completed) => tracing::info!(path, completed, "Toggled video"),
            None => tracing::debug!(path, "Toggle for unknown video"),
        }

        let catalog = self.catalog.clone();
        let store = self.store.clone();
        match tokio::task::spawn_blocking(move || store.save(&catalog)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::error!(
                path = %self.store.path().display(),
                "Error writing progress file: {}",
                e
            ),
            Err(e) => tracing::error!("Progress save task failed: {}", e),
        }

        completed
    }
}

/// Application state shared across all requests
#[derive(Clone)]
pub struct AppState {
    pub library: Arc<RwLock<Library>>,
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(library: Library, config: ServerConfig) -> Self {
        Self {
            library: Arc::new(RwLock::new(library)),
            config,
        }
    }

    pub fn from_config(config: ServerConfig) -> Self {
        let library = Library::load(&config);
        Self::new(library, config)
    }
}
