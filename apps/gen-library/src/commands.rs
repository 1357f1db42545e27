//! Command handlers

use crate::cli::{Command, ImagesCommand, ListArgs, ServeArgs, SettingsCommand, WatcherCommand};
use anyhow::{Context, Result};
use library_client::api::rest::dto::{ImageDto, ImagePageDto, ScanSummaryDto, WatcherStatusDto};
use library_client::{
    Config, LibraryApi, LibraryClientModule, LibraryImport, ListParams, NsfwMode,
};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

pub async fn handle_command(module: &LibraryClientModule, command: Command) -> Result<()> {
    match command {
        Command::Images(cmd) => images(module, cmd).await,
        Command::Settings(cmd) => settings(module, cmd).await,
        Command::Scan { root } => {
            let summary = module
                .api()
                .scan_library(root.as_deref())
                .await
                .context("scan failed")?;
            print_json(&ScanSummaryDto::from(summary))
        }
        Command::Import { path, folder } => {
            let result = module
                .api()
                .import_library(&LibraryImport { path, folder })
                .await
                .context("import failed")?;
            print_json(&result)
        }
        Command::Watcher(cmd) => watcher(module, cmd).await,
        Command::Nsfw { mode } => nsfw(module, mode),
        Command::Route { location } => {
            match module.routes().resolve(&location) {
                Some(view) => println!("{}", view),
                None => anyhow::bail!("no route matches '{}'", location),
            }
            Ok(())
        }
        Command::Serve(_) => serve(module).await,
    }
}

async fn images(module: &LibraryClientModule, command: ImagesCommand) -> Result<()> {
    let api = module.api();
    match command {
        ImagesCommand::List(args) => {
            let params = list_params(args, module.nsfw().get());
            let page = api.list_images(&params).await.context("listing failed")?;
            print_json(&ImagePageDto::from(page))
        }
        ImagesCommand::Get { id } => {
            let image = api
                .get_image(id)
                .await
                .with_context(|| format!("failed to fetch image {}", id))?;
            print_json(&ImageDto::from(image))
        }
        ImagesCommand::Delete { id, mode } => {
            api.delete_image(id, mode)
                .await
                .with_context(|| format!("failed to delete image {}", id))?;
            tracing::info!(id, mode = %mode, "Image deleted");
            Ok(())
        }
        ImagesCommand::Metadata { id, json } => {
            let metadata: serde_json::Value =
                serde_json::from_str(&json).context("metadata must be valid JSON")?;
            let image = api
                .update_image_metadata(id, metadata)
                .await
                .with_context(|| format!("failed to update image {}", id))?;
            print_json(&ImageDto::from(image))
        }
        ImagesCommand::Tag { id, tags } => {
            let image = api
                .add_tags(id, &tags)
                .await
                .with_context(|| format!("failed to tag image {}", id))?;
            print_json(&ImageDto::from(image))
        }
        ImagesCommand::Untag { id, tags } => {
            let image = api
                .remove_tags(id, &tags)
                .await
                .with_context(|| format!("failed to untag image {}", id))?;
            print_json(&ImageDto::from(image))
        }
        ImagesCommand::FileUrl { id } => {
            println!("{}", module.rest().image_file_url(id)?);
            Ok(())
        }
    }
}

async fn settings(module: &LibraryClientModule, command: SettingsCommand) -> Result<()> {
    let api = module.api();
    match command {
        SettingsCommand::Get { key } => {
            let value = api
                .get_setting(&key)
                .await
                .with_context(|| format!("failed to read setting '{}'", key))?;
            println!("{}", value);
        }
        SettingsCommand::Set { key, value } => {
            api.set_setting(&key, &value)
                .await
                .with_context(|| format!("failed to write setting '{}'", key))?;
            tracing::info!(%key, "Setting updated");
        }
    }
    Ok(())
}

async fn watcher(module: &LibraryClientModule, command: WatcherCommand) -> Result<()> {
    let api = module.api();
    let status = match command {
        WatcherCommand::Status => api.watcher_status().await,
        WatcherCommand::Start => api.start_watcher().await,
        WatcherCommand::Stop => api.stop_watcher().await,
    }
    .context("watcher request failed")?;
    print_json(&WatcherStatusDto::from(status))
}

fn nsfw(module: &LibraryClientModule, mode: Option<NsfwMode>) -> Result<()> {
    let preference = module.nsfw();
    if let Some(mode) = mode {
        preference.set(mode)?;
    }

    let current = preference.get();
    let choices: Vec<String> = NsfwMode::ALL
        .iter()
        .map(|m| {
            if *m == current {
                format!("[{}]", m)
            } else {
                m.to_string()
            }
        })
        .collect();
    println!("{}", choices.join(" "));
    Ok(())
}

/// Apply `serve` flags on top of the loaded dev server configuration
pub fn apply_serve_args(config: &mut Config, args: &ServeArgs) {
    let dev = &mut config.dev_server;
    if let Some(host) = &args.host {
        dev.host = host.clone();
    }
    if let Some(port) = args.port {
        dev.port = port;
    }
    if let Some(backend) = &args.backend {
        dev.backend_url = backend.clone();
    }
    if let Some(dir) = &args.static_dir {
        dev.static_dir = Some(dir.clone());
    }
}

async fn serve(module: &LibraryClientModule) -> Result<()> {
    let cancel = CancellationToken::new();
    let shutdown = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown requested");
        }
        shutdown.cancel();
    });

    module.serve(cancel).await
}

/// Listing parameters from CLI flags; the stored mode fills in a missing `--nsfw`
fn list_params(args: ListArgs, stored: NsfwMode) -> ListParams {
    ListParams {
        page: args.page,
        page_size: args.page_size,
        q: args.query,
        tags: args.tags,
        nsfw: Some(args.nsfw.unwrap_or(stored)),
        sort: args.sort,
        order: args.order,
        rating: args.rating,
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
