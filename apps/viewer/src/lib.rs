//! Client side of the collection browser.
//!
//! [`Browser`] owns one session's view state: the active filters, the loaded
//! card grid, and the detail overlay. It talks to the API through a
//! [`CollectionSource`]; [`CollectionClient`] is the HTTP implementation.

pub mod browse;
pub mod browser;
pub mod client;
pub mod config;
pub mod debounce;
pub mod error;
pub mod models;
pub mod overlay;

pub use browse::{BrowseState, LoadStatus, PendingList};
pub use browser::Browser;
pub use client::{CollectionClient, CollectionSource};
pub use config::ViewerConfig;
pub use error::ClientError;
pub use overlay::{DetailOverlay, OverlayEvent, OverlayView};
