//! Preview resolution: content and push dispatch, album aggregation, and
//! asynchronous refresh of provisional previews.
mod album;
mod config;
mod engine;
mod notification;
mod previewer;
mod related;
mod service;
mod simple;
mod store;

pub use config::{ConfigError, LookupMode, PreviewConfig};
pub use engine::{RefreshEngine, RefreshEvent, RefreshKey};
pub use preview_logging::{LogDestination, LogSettings};
pub use previewer::{PreviewOptions, Previewer};
pub use store::MessageStore;
