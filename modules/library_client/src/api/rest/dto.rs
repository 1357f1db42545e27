//! REST DTOs with serde derives for the backend wire format

use serde::{Deserialize, Serialize};

// ===== Image DTOs =====

/// Listing response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePageDto {
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
    #[serde(default)]
    pub items: Vec<ImageSummaryDto>,
}

/// Listing entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSummaryDto {
    pub id: u64,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub ext: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub model_name: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub nsfw: bool,
    #[serde(default)]
    pub thumb_url: String,
}

/// Full image record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageDto {
    pub id: u64,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub ext: String,
    #[serde(default)]
    pub size_bytes: u64,
    #[serde(default)]
    pub sha256: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub created_time: Option<chrono::DateTime<chrono::FixedOffset>>,
    #[serde(default)]
    pub imported_at: Option<chrono::DateTime<chrono::FixedOffset>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub negative_prompt: Option<String>,
    #[serde(default)]
    pub rating: i32,
    #[serde(default)]
    pub nsfw: bool,
    #[serde(default)]
    pub hidden: bool,
    /// `null` is sent for images without tags
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<TagDto>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub loras: Vec<LoraDto>,
    /// Everything else the backend sends
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagDto {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoraDto {
    #[serde(default)]
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

// ===== Request bodies =====

/// Tag add/remove request
#[derive(Debug, Clone, Serialize)]
pub struct TagsRequest<'a> {
    pub tags: &'a [String],
}

/// Hard-delete confirmation; the token is the image id
#[derive(Debug, Clone, Serialize)]
pub struct DeleteTokenRequest {
    pub token: String,
}

/// Scan request with an explicit root
#[derive(Debug, Clone, Serialize)]
pub struct ScanRequest<'a> {
    pub root: &'a str,
}

/// Library import request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryImportDto {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
}

// ===== Settings DTOs =====

/// Setting value, as read and written through `/api/settings/{key}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingValueDto {
    /// Missing on some backend revisions; treated as empty
    #[serde(default)]
    pub value: Option<String>,
}

// ===== Maintenance DTOs =====

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanSummaryDto {
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatcherStatusDto {
    pub running: bool,
}

/// Error payload sent by the backend alongside non-2xx statuses
#[derive(Debug, Clone, Deserialize)]
pub struct BackendErrorDto {
    pub error: String,
}

// Note: conversions live in mapper.rs
