//! Domain layer - client-side state and navigation

pub mod preferences;
pub mod repository;
pub mod router;

pub use preferences::{NsfwPreference, PreferenceError, NSFW_KEY};
pub use repository::PreferenceStorage;
pub use router::{Route, RouteTable, View};
