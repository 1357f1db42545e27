//! Client trait for the image library backend
//!
//! Every method issues exactly one request. Nothing is retried or cached.

use super::{
    error::LibraryError,
    model::{
        DeleteMode, Image, ImagePage, LibraryImport, ListParams, ScanSummary, WatcherStatus,
        LIBRARY_FOLDER_KEY, LIBRARY_PATH_KEY,
    },
};
use async_trait::async_trait;

/// Image library API
#[async_trait]
pub trait LibraryApi: Send + Sync {
    // ===== Image Operations =====

    /// List one page of images
    async fn list_images(&self, params: &ListParams) -> Result<ImagePage, LibraryError>;

    /// Get a single image with tags and generation metadata
    async fn get_image(&self, id: u64) -> Result<Image, LibraryError>;

    /// Delete an image, either to the trash or permanently
    async fn delete_image(&self, id: u64, mode: DeleteMode) -> Result<(), LibraryError>;

    /// Overwrite metadata fields of an image and return the updated record
    async fn update_image_metadata(
        &self,
        id: u64,
        metadata: serde_json::Value,
    ) -> Result<Image, LibraryError>;

    /// Attach tags to an image
    async fn add_tags(&self, id: u64, tags: &[String]) -> Result<Image, LibraryError>;

    /// Detach tags from an image
    async fn remove_tags(&self, id: u64, tags: &[String]) -> Result<Image, LibraryError>;

    // ===== Settings Operations =====

    /// Read a backend setting; unset keys read as an empty string
    async fn get_setting(&self, key: &str) -> Result<String, LibraryError>;

    /// Write a backend setting
    async fn set_setting(&self, key: &str, value: &str) -> Result<(), LibraryError>;

    async fn get_library_path(&self) -> Result<String, LibraryError> {
        self.get_setting(LIBRARY_PATH_KEY).await
    }

    async fn set_library_path(&self, path: &str) -> Result<(), LibraryError> {
        self.set_setting(LIBRARY_PATH_KEY, path).await
    }

    async fn get_library_folder(&self) -> Result<String, LibraryError> {
        self.get_setting(LIBRARY_FOLDER_KEY).await
    }

    async fn set_library_folder(&self, folder: &str) -> Result<(), LibraryError> {
        self.set_setting(LIBRARY_FOLDER_KEY, folder).await
    }

    /// Import a library root; the response is passed through untouched
    async fn import_library(
        &self,
        import: &LibraryImport,
    ) -> Result<serde_json::Value, LibraryError>;

    // ===== Library Maintenance =====

    /// Scan a folder, or the configured library path when `root` is `None`
    async fn scan_library(&self, root: Option<&str>) -> Result<ScanSummary, LibraryError>;

    async fn watcher_status(&self) -> Result<WatcherStatus, LibraryError>;

    async fn start_watcher(&self) -> Result<WatcherStatus, LibraryError>;

    async fn stop_watcher(&self) -> Result<WatcherStatus, LibraryError>;
}
