//! Common test utilities and shared backend fixtures

#![allow(dead_code)]

use library_client::RestClient;
use serde_json::{json, Value};

pub fn print_test_header(test_name: &str, purpose: &[&str]) {
    println!("\n🧪 TEST: {}", test_name);
    if let Some(first) = purpose.first() {
        println!("📋 PURPOSE: {}", first);
    }
    for line in purpose.iter().skip(1) {
        println!("   {}", line);
    }
}

pub fn client_for(server: &httpmock::MockServer) -> RestClient {
    RestClient::new(&server.base_url()).expect("mock server url is valid")
}

/// Image record shaped like the backend's detail response
pub fn image_json(id: u64, file_name: &str, tags: &[&str]) -> Value {
    let tags: Vec<Value> = tags
        .iter()
        .enumerate()
        .map(|(i, name)| json!({ "id": i + 1, "name": name }))
        .collect();

    json!({
        "id": id,
        "path": format!("2024/{}", file_name),
        "fileName": file_name,
        "ext": "png",
        "sizeBytes": 2048,
        "sha256": format!("sha-{}", id),
        "width": 832,
        "height": 1216,
        "createdTime": null,
        "importedAt": "2024-06-01T12:00:00Z",
        "sourceApp": "ComfyUI",
        "modelId": 3,
        "model": { "id": 3, "name": "juggernaut", "hash": "ab12" },
        "prompt": "a lighthouse at dusk",
        "negativePrompt": "blurry",
        "sampler": "euler",
        "steps": 28,
        "cfgScale": 6.5,
        "seed": "12345",
        "rating": 3,
        "nsfw": false,
        "hidden": false,
        "rawMetadata": { "workflow": {} },
        "loras": [{ "id": 9, "name": "detail-tweaker", "hash": null, "weight": 0.6 }],
        "embeddings": [],
        "tags": tags
    })
}

/// Listing response with one entry per file name
pub fn page_json(page: u32, page_size: u32, names: &[&str]) -> Value {
    let items: Vec<Value> = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            json!({
                "id": i + 1,
                "path": name,
                "fileName": name,
                "ext": "jpg",
                "width": 512,
                "height": 512,
                "modelName": null,
                "prompt": null,
                "nsfw": false,
                "thumbUrl": format!("/thumbs/sha{}_400.jpg", i + 1)
            })
        })
        .collect();

    json!({
        "page": page,
        "pageSize": page_size,
        "total": names.len(),
        "items": items
    })
}
