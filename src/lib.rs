//! Core library surface for the QuoteSpark terminal app.
//!
//! The `bin` target only wires these pieces together: the store loads the
//! dataset, the picker chooses from it, and the UI owns the quote on screen.
pub mod config;
pub mod logging;
pub mod models;
pub mod picker;
pub mod share;
pub mod store;
pub mod ui;

pub use config::{Config, ConfigError};
pub use models::{format_quote, Quote};
pub use picker::{pick, EmptyCollectionError, QuotePicker};
pub use share::{ClipboardSink, MailShare, ShareError, ShareSink, SystemClipboard};
pub use store::{load, BundledQuotes, DataLoadError, FileQuotes, QuoteSource, QuoteStore};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
