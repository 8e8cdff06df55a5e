#![warn(clippy::all, missing_docs)]

//! Read, edit and write the per-mission hook configuration of an
//! X-Wing Alliance installation.
//!
//! A mission's settings live either in one unified `<mission>.ini` file or in
//! the older one-file-per-feature layout. [`HookSession`] loads both, exposes
//! the merged [`ConfigModel`] for editing and always saves the unified form.

pub mod config;
pub mod error;
pub mod format;
pub mod installation;
pub mod legacy;
pub mod map_entry;
pub mod mission;
pub mod models;
pub mod names;
pub mod session;

pub use config::AppConfig;
pub use error::{HookError, IssueKind, LineIssue, MapEntryError};
pub use installation::Installation;
pub use map_entry::{Elevation, MapEntry};
pub use mission::Mission;
pub use models::{ConfigModel, Feature};
pub use session::{HookSession, SaveOutcome, SavePrompt};
