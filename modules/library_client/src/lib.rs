//! Library Client
//!
//! Typed access to the Gen Library image backend: a REST client, the
//! persisted NSFW visibility preference, the client route table and a
//! development server that proxies the backend.

// Public exports
pub mod contract;
pub use contract::{
    client::LibraryApi, error::LibraryError, DeleteMode, Image, ImagePage, ImageSummary,
    LibraryImport, ListParams, NsfwMode, ScanSummary, SortKey, SortOrder, WatcherStatus,
};

pub mod config;
pub use config::Config;

pub mod module;
pub use module::LibraryClientModule;

pub mod api;
pub use api::rest::RestClient;

pub mod domain;
pub use domain::{NsfwPreference, RouteTable, View};

pub mod infra;
