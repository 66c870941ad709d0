#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod catalog;
pub mod error;
pub mod progress;

pub use catalog::{relative_identity, Catalog, Video, SUPPORTED_EXTENSIONS};
pub use error::{Error, Result};
pub use progress::{ProgressRecord, ProgressStore, PROGRESS_SCHEMA_VERSION};
