//! Backend endpoint paths

pub const IMAGES: &str = "/api/images";
pub const SCAN: &str = "/api/scan";
pub const SETTINGS: &str = "/api/settings";
pub const SETTINGS_IMPORT: &str = "/api/settings/import";
pub const WATCHER: &str = "/api/watcher";
pub const WATCHER_START: &str = "/api/watcher/start";
pub const WATCHER_STOP: &str = "/api/watcher/stop";

pub fn image(id: u64) -> String {
    format!("{}/{}", IMAGES, id)
}

pub fn image_file(id: u64) -> String {
    format!("{}/{}/file", IMAGES, id)
}

pub fn image_metadata(id: u64) -> String {
    format!("{}/{}/metadata", IMAGES, id)
}

pub fn image_tags(id: u64) -> String {
    format!("{}/{}/tags", IMAGES, id)
}
