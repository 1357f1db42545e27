//! Module wiring tests

use httpmock::prelude::*;
use library_client::domain::{PreferenceStorage, NSFW_KEY};
use library_client::infra::storage::MemoryStorage;
use library_client::{Config, LibraryApi, LibraryClientModule, ListParams, NsfwMode, View};
use serde_json::json;
use std::sync::Arc;

mod common;
use common::{page_json, print_test_header};

#[tokio::test]
async fn test_module_lists_with_stored_nsfw_mode() {
    print_test_header(
        "test_module_lists_with_stored_nsfw_mode",
        &["The module's API, preference and routes are wired from one Config."],
    );
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/images")
                .query_param("nsfw", "show");
            then.status(200).json_body(page_json(1, 50, &["a.png"]));
        })
        .await;

    let storage = Arc::new(MemoryStorage::new());
    storage.set_item(NSFW_KEY, "show").unwrap();

    let config = Config {
        api_base_url: server.base_url(),
        ..Config::default()
    };
    let module = LibraryClientModule::with_storage(config, storage).unwrap();

    assert_eq!(module.rest().base_url(), server.base_url());
    assert_eq!(module.routes().resolve("/settings"), Some(View::Settings));

    let params = ListParams::default().nsfw(module.nsfw().get());
    let page = module.api().list_images(&params).await.unwrap();

    mock.assert_async().await;
    assert_eq!(page.items[0].file_name, "a.png");
}

#[test]
fn test_empty_base_url_targets_local_backend() {
    let module =
        LibraryClientModule::with_storage(Config::default(), Arc::new(MemoryStorage::new()))
            .unwrap();

    assert_eq!(module.rest().base_url(), "http://localhost:8081");
    assert_eq!(module.nsfw().get(), NsfwMode::Hide);
    assert_eq!(
        module.rest().image_file_url(12).unwrap().as_str(),
        "http://localhost:8081/api/images/12/file"
    );
}

#[test]
fn test_invalid_base_url_fails_init() {
    let config = Config {
        api_base_url: "not a url".to_string(),
        ..Config::default()
    };
    assert!(LibraryClientModule::with_storage(config, Arc::new(MemoryStorage::new())).is_err());
}

#[tokio::test]
async fn test_backend_error_body_is_reported() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/watcher/start");
            then.status(500)
                .json_body(json!({ "error": "library path not configured" }));
        })
        .await;

    let config = Config {
        api_base_url: server.base_url(),
        ..Config::default()
    };
    let module =
        LibraryClientModule::with_storage(config, Arc::new(MemoryStorage::new())).unwrap();

    let err = module.api().start_watcher().await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert!(err.to_string().contains("library path not configured"));
}

#[test]
fn test_corrupt_preferences_file_falls_back_to_hide() {
    print_test_header(
        "test_corrupt_preferences_file_falls_back_to_hide",
        &[
            "A damaged preferences file must not stop the client from starting.",
            "The mode reads as hide and the next change rewrites the file.",
        ],
    );
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("preferences.json");
    std::fs::write(&path, "{ not json").unwrap();

    let config = Config {
        preferences_path: path.clone(),
        ..Config::default()
    };
    let module = LibraryClientModule::init(config).unwrap();
    assert_eq!(module.nsfw().get(), NsfwMode::Hide);
    assert_eq!(module.routes().resolve("/"), Some(View::Library));

    module.nsfw().set(NsfwMode::Only).unwrap();
    let contents: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(contents, json!({ "nsfwMode": "only" }));
}
