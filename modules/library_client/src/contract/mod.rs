//! Contract layer - public API of the library client
//!
//! This layer contains transport-agnostic models and the client trait.
//! NO serde derives on models - these are pure domain types.

pub mod client;
pub mod error;
pub mod model;

pub use client::LibraryApi;
pub use error::LibraryError;
pub use model::{
    DeleteMode, Image, ImagePage, ImageSummary, LibraryImport, ListParams, Lora, NsfwMode,
    ParseEnumError, ScanSummary, SortKey, SortOrder, Tag, WatcherStatus, DEFAULT_PAGE,
    DEFAULT_PAGE_SIZE, LIBRARY_FOLDER_KEY, LIBRARY_PATH_KEY,
};
