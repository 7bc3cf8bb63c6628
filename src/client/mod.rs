//! Client side of the catalog: named intents drive HTTP calls whose results
//! land in replace-only state slices.

pub mod api;
pub mod orchestrator;
pub mod store;

pub use api::{CatalogApi, ClientError};
pub use orchestrator::{Intent, LogNotifier, Navigator, Notifier, Orchestrator};
pub use store::{Action, CatalogState, Store};
