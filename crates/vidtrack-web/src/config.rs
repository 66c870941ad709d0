use std::net::SocketAddr;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

const DEFAULT_PORT: u16 = 8080;

/// Server configuration
///
/// Paths are resolved against the working directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    /// Directory scanned for videos and served under `/videos/`
    pub media_root: PathBuf,
    pub progress_file: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            media_root: PathBuf::from("videos"),
            progress_file: PathBuf::from("progress.json"),
        }
    }
}

impl ServerConfig {
    /// Defaults, overridden by `VIDTRACK_ADDR`, `VIDTRACK_MEDIA_ROOT` and
    /// `VIDTRACK_PROGRESS_FILE` when set.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(addr) = lookup("VIDTRACK_ADDR") {
            match addr.parse() {
                Ok(addr) => config.addr = addr,
                Err(e) => tracing::error!("Ignoring invalid VIDTRACK_ADDR {:?}: {}", addr, e),
            }
        }
        if let Some(root) = lookup("VIDTRACK_MEDIA_ROOT") {
            config.media_root = root.into();
        }
        if let Some(file) = lookup("VIDTRACK_PROGRESS_FILE") {
            config.progress_file = file.into();
        }

        config
    }
}
