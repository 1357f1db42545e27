//! Client module wiring: configuration in, ready-to-use components out

use crate::api::{dev_server, rest::RestClient};
use crate::config::Config;
use crate::contract::LibraryApi;
use crate::domain::{NsfwPreference, PreferenceStorage, RouteTable};
use crate::infra::storage::FileStorage;
use anyhow::{Context, Result};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Library client module
///
/// Owns the REST client, the persisted NSFW preference and the route table.
pub struct LibraryClientModule {
    config: Config,
    rest: RestClient,
    preference: NsfwPreference,
    routes: RouteTable,
}

impl LibraryClientModule {
    /// Build every component from configuration, persisting preferences to
    /// `config.preferences_path`.
    ///
    /// An unreadable preferences file is ignored; preferences start from
    /// their defaults and the next change rewrites the file.
    pub fn init(config: Config) -> Result<Self> {
        let storage = match FileStorage::open(&config.preferences_path) {
            Ok(storage) => storage,
            Err(e) => {
                tracing::warn!(
                    error = %format!("{:#}", e),
                    "Ignoring unreadable preferences file, using defaults"
                );
                FileStorage::empty(&config.preferences_path)
            }
        };
        Self::with_storage(config, Arc::new(storage))
    }

    /// Build with a caller-supplied preference store
    pub fn with_storage(config: Config, storage: Arc<dyn PreferenceStorage>) -> Result<Self> {
        let rest = RestClient::from_config(&config).context("failed to create REST client")?;
        let preference = NsfwPreference::load(storage);

        tracing::info!(
            api_base = rest.base_url(),
            nsfw = %preference.get(),
            "Library client initialized"
        );

        Ok(Self {
            config,
            rest,
            preference,
            routes: RouteTable::default(),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Typed backend API
    pub fn api(&self) -> Arc<dyn LibraryApi> {
        Arc::new(self.rest.clone())
    }

    pub fn rest(&self) -> &RestClient {
        &self.rest
    }

    pub fn nsfw(&self) -> &NsfwPreference {
        &self.preference
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Run the development server until `cancel` fires
    pub async fn serve(&self, cancel: CancellationToken) -> Result<()> {
        let http = dev_server::proxy_client(self.config.connect_timeout)
            .context("failed to create proxy client")?;
        dev_server::serve(&self.config.dev_server, http, self.routes.clone(), cancel).await
    }
}
