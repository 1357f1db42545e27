//! Storage traits for client-side state
//!
//! Implementations are in infra/storage.

use anyhow::Result;

/// String key/value store for persisted client preferences
///
/// Calls are synchronous: a write has landed once `set_item` returns.
pub trait PreferenceStorage: Send + Sync {
    /// Read a value
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Create or replace a value
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a value; removing a missing key is not an error
    fn remove_item(&self, key: &str) -> Result<()>;
}
