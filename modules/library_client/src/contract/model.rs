//! Contract models for the library client
//!
//! These models are transport-agnostic and used by every caller of the client.
//! NO serde derives - wire shapes live in `api::rest::dto`.

use chrono::{DateTime, FixedOffset};
use std::fmt;
use std::str::FromStr;

/// Settings key holding the library root path
pub const LIBRARY_PATH_KEY: &str = "library_path";

/// Settings key used by backends that store the library folder separately
pub const LIBRARY_FOLDER_KEY: &str = "libraryFolder";

/// Default page requested when none is given
pub const DEFAULT_PAGE: u32 = 1;

/// Default page size requested when none is given
pub const DEFAULT_PAGE_SIZE: u32 = 50;

// ===== Enumerations =====

/// Visibility filter for NSFW images in listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NsfwMode {
    /// Exclude NSFW images
    #[default]
    Hide,
    /// Include everything
    Show,
    /// Only NSFW images
    Only,
}

impl NsfwMode {
    pub const ALL: [NsfwMode; 3] = [NsfwMode::Hide, NsfwMode::Show, NsfwMode::Only];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hide => "hide",
            Self::Show => "show",
            Self::Only => "only",
        }
    }

    /// Interpret a persisted value.
    ///
    /// Only the exact strings "show" and "only" are honoured; anything else
    /// (including a missing value) falls back to `Hide`.
    pub fn from_saved(saved: Option<&str>) -> Self {
        match saved {
            Some("show") => Self::Show,
            Some("only") => Self::Only,
            _ => Self::Hide,
        }
    }
}

/// Sort key accepted by the listing endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    CreatedTime,
    #[default]
    ImportedAt,
    FileName,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CreatedTime => "created_time",
            Self::ImportedAt => "imported_at",
            Self::FileName => "file_name",
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// How an image is removed from the library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeleteMode {
    /// Move the file to the system trash
    #[default]
    Trash,
    /// Remove the file permanently
    Hard,
}

impl DeleteMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trash => "trash",
            Self::Hard => "hard",
        }
    }
}

/// Error returned when a string does not name a known enum variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {} '{}'", self.kind, self.value)
    }
}

impl std::error::Error for ParseEnumError {}

macro_rules! str_enum {
    ($ty:ident, $kind:literal, [$($variant:ident),+ $(,)?]) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let lowered = s.trim().to_ascii_lowercase();
                $(
                    if lowered == $ty::$variant.as_str() {
                        return Ok($ty::$variant);
                    }
                )+
                Err(ParseEnumError {
                    kind: $kind,
                    value: s.to_string(),
                })
            }
        }
    };
}

str_enum!(NsfwMode, "nsfw mode", [Hide, Show, Only]);
str_enum!(SortKey, "sort key", [CreatedTime, ImportedAt, FileName]);
str_enum!(SortOrder, "sort order", [Asc, Desc]);
str_enum!(DeleteMode, "delete mode", [Trash, Hard]);

// ===== Requests =====

/// Parameters for listing images. Absent fields take the listing defaults.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListParams {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    /// Free-text query
    pub q: Option<String>,
    /// Images must carry every tag listed
    pub tags: Vec<String>,
    pub nsfw: Option<NsfwMode>,
    pub sort: Option<SortKey>,
    pub order: Option<SortOrder>,
    pub rating: Option<i32>,
}

impl ListParams {
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn query(mut self, q: impl Into<String>) -> Self {
        self.q = Some(q.into());
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn nsfw(mut self, nsfw: NsfwMode) -> Self {
        self.nsfw = Some(nsfw);
        self
    }

    pub fn sort(mut self, sort: SortKey) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn order(mut self, order: SortOrder) -> Self {
        self.order = Some(order);
        self
    }

    pub fn rating(mut self, rating: i32) -> Self {
        self.rating = Some(rating);
        self
    }
}

/// Request to import a library root into the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryImport {
    /// Filesystem path of the library root
    pub path: String,
    /// Optional sub-folder within the root
    pub folder: Option<String>,
}

// ===== Responses =====

/// One page of the image listing
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePage {
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
    pub items: Vec<ImageSummary>,
}

/// Image entry as returned by the listing endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSummary {
    pub id: u64,
    pub path: String,
    pub file_name: String,
    pub ext: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub model_name: Option<String>,
    pub prompt: Option<String>,
    pub nsfw: bool,
    /// Path of the generated thumbnail, relative to the backend origin
    pub thumb_url: String,
}

/// Full image record
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub id: u64,
    pub path: String,
    pub file_name: String,
    pub ext: String,
    pub size_bytes: u64,
    pub sha256: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub created_time: Option<DateTime<FixedOffset>>,
    pub imported_at: Option<DateTime<FixedOffset>>,
    pub model_name: Option<String>,
    pub prompt: Option<String>,
    pub negative_prompt: Option<String>,
    pub rating: i32,
    pub nsfw: bool,
    pub hidden: bool,
    pub tags: Vec<Tag>,
    pub loras: Vec<Lora>,
    /// Remaining generation metadata, kept as the backend sent it
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Image {
    pub fn tag_names(&self) -> Vec<&str> {
        self.tags.iter().map(|t| t.name.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Lora {
    pub id: u64,
    pub name: String,
    pub hash: Option<String>,
    pub weight: Option<f64>,
}

/// Result of a library scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanSummary {
    /// Number of images processed
    pub count: u64,
}

/// Filesystem watcher state on the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatcherStatus {
    pub running: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nsfw_from_saved_only_accepts_exact_values() {
        assert_eq!(NsfwMode::from_saved(Some("show")), NsfwMode::Show);
        assert_eq!(NsfwMode::from_saved(Some("only")), NsfwMode::Only);
        assert_eq!(NsfwMode::from_saved(Some("hide")), NsfwMode::Hide);
        assert_eq!(NsfwMode::from_saved(Some("SHOW")), NsfwMode::Hide);
        assert_eq!(NsfwMode::from_saved(Some("")), NsfwMode::Hide);
        assert_eq!(NsfwMode::from_saved(None), NsfwMode::Hide);
    }

    #[test]
    fn test_enum_parsing_is_case_insensitive() {
        assert_eq!("Only".parse::<NsfwMode>(), Ok(NsfwMode::Only));
        assert_eq!("file_name".parse::<SortKey>(), Ok(SortKey::FileName));
        assert_eq!(" ASC ".parse::<SortOrder>(), Ok(SortOrder::Asc));
        assert_eq!("hard".parse::<DeleteMode>(), Ok(DeleteMode::Hard));
    }

    #[test]
    fn test_enum_parsing_rejects_unknown() {
        let err = "sometimes".parse::<NsfwMode>().unwrap_err();
        assert_eq!(err.kind, "nsfw mode");
        assert_eq!(err.to_string(), "invalid nsfw mode 'sometimes'");
        assert!("name".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(NsfwMode::default(), NsfwMode::Hide);
        assert_eq!(SortKey::default(), SortKey::ImportedAt);
        assert_eq!(SortOrder::default(), SortOrder::Desc);
        assert_eq!(DeleteMode::default(), DeleteMode::Trash);
    }

    #[test]
    fn test_list_params_builder() {
        let params = ListParams::default()
            .page(3)
            .tags(["a", "b"])
            .nsfw(NsfwMode::Only)
            .rating(4);
        assert_eq!(params.page, Some(3));
        assert_eq!(params.tags, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(params.nsfw, Some(NsfwMode::Only));
        assert_eq!(params.rating, Some(4));
        assert_eq!(params.sort, None);
    }
}
