//! `wedding-rsvp` - An on-device RSVP book for a wedding website
//!
//! Guests submit RSVPs through a form; responses are kept in a local store,
//! rendered as a newest-first list, and can be exported as CSV or cleared.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod csv;
pub mod error;
pub mod export;
pub mod form;
pub mod logging;
pub mod page;
pub mod record;
pub mod render;
pub mod storage;
pub mod store;
pub mod widgets;

pub use config::Config;
pub use error::{Error, Result};
pub use export::{ClearOutcome, Dialogs, Download, ExportController, ExportOutcome, FileDownload};
pub use form::{FormController, FormStatus, RsvpForm, SubmitOutcome};
pub use logging::init_logging;
pub use page::RsvpPage;
pub use record::RsvpRecord;
pub use render::{ListView, Renderer, RsvpCard};
pub use storage::{MemoryStorage, SqliteStorage, StorageBackend, StorageStats};
pub use store::RecordStore;
