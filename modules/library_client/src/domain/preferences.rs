//! NSFW visibility preference
//!
//! The current mode lives in a watch channel so views can react to changes.
//! Every change is written through to [`PreferenceStorage`] before
//! subscribers are notified.

use super::repository::PreferenceStorage;
use crate::contract::NsfwMode;
use std::sync::Arc;
use tokio::sync::watch;

/// Storage key of the persisted mode
pub const NSFW_KEY: &str = "nsfwMode";

/// Error type for preference operations
#[derive(Debug, thiserror::Error)]
pub enum PreferenceError {
    #[error("Failed to persist preference '{key}': {source}")]
    Persist {
        key: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Reactive NSFW mode backed by persistent storage
pub struct NsfwPreference {
    storage: Arc<dyn PreferenceStorage>,
    state: watch::Sender<NsfwMode>,
}

impl NsfwPreference {
    /// Initialise from storage.
    ///
    /// A missing, unrecognised or unreadable value yields `NsfwMode::Hide`.
    pub fn load(storage: Arc<dyn PreferenceStorage>) -> Self {
        let saved = match storage.get_item(NSFW_KEY) {
            Ok(saved) => saved,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read stored NSFW mode, using default");
                None
            }
        };
        let mode = NsfwMode::from_saved(saved.as_deref());
        tracing::debug!(mode = %mode, "Loaded NSFW preference");

        let (state, _) = watch::channel(mode);
        Self { storage, state }
    }

    /// Current mode
    pub fn get(&self) -> NsfwMode {
        *self.state.borrow()
    }

    /// Change the mode.
    ///
    /// Setting the current value again is a no-op. Otherwise the value is
    /// persisted first; if that fails the in-memory value is left untouched.
    /// Comparison, write and publish happen under the channel's lock, so
    /// concurrent calls cannot leave memory and storage disagreeing.
    pub fn set(&self, mode: NsfwMode) -> Result<(), PreferenceError> {
        let mut failure = None;
        let changed = self.state.send_if_modified(|current| {
            if *current == mode {
                return false;
            }
            match self.storage.set_item(NSFW_KEY, mode.as_str()) {
                Ok(()) => {
                    *current = mode;
                    true
                }
                Err(e) => {
                    failure = Some(e);
                    false
                }
            }
        });

        if let Some(e) = failure {
            return Err(PreferenceError::Persist {
                key: NSFW_KEY,
                source: e.into(),
            });
        }
        if changed {
            tracing::info!(mode = %mode, "NSFW preference changed");
        }
        Ok(())
    }

    /// Receiver notified on every change
    pub fn subscribe(&self) -> watch::Receiver<NsfwMode> {
        self.state.subscribe()
    }
}
