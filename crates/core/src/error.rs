//! Error types shared by the codec and the session layer.

use std::num::ParseIntError;

use thiserror::Error;

use crate::models::Feature;

/// Fatal errors raised while reading or rendering a hook configuration.
#[derive(Debug, Error)]
pub enum HookError {
    /// A mission-tie record points past the end of the flight-group list.
    #[error("flight group {index} does not exist (mission has {count})")]
    UnknownFlightGroup {
        /// Index found in the record.
        index: usize,
        /// Number of flight groups supplied by the mission.
        count: usize,
    },
    /// A markings or IFF display name is missing from its name table.
    #[error("{table} name {name:?} is not in the name table")]
    UnknownName {
        /// Table that was searched (`IFF` or `color`).
        table: &'static str,
        /// Name that failed to resolve.
        name: String,
    },
    /// The mission has never been saved, so no configuration path exists.
    #[error("mission has not been saved yet; save it before assigning hooks")]
    UnsavedMission,
}

/// Reasons a `MapEntry` line cannot be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapEntryError {
    /// Only 6 or 7 comma separated fields are valid.
    #[error("expected 6 or 7 fields, found {0}")]
    FieldCount(usize),
    /// A field was not valid hexadecimal for its width.
    #[error("field {index} ({text:?}) is not valid hexadecimal: {source}")]
    Field {
        /// Zero based field position.
        index: usize,
        /// Offending text.
        text: String,
        /// Parser error.
        #[source]
        source: ParseIntError,
    },
}

/// Non-fatal problems found on a single input line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IssueKind {
    /// `ShuttleAnimation` carried a tag other than right/top/bottom.
    #[error("unrecognised shuttle animation {0:?}, keeping current value")]
    UnknownShuttleAnimation(String),
    /// A recognised key carried a value that does not parse or is out of range.
    #[error("invalid value {value:?} for {key}")]
    InvalidValue {
        /// Setting key, lower-cased.
        key: String,
        /// Raw value text.
        value: String,
    },
}

/// A non-fatal issue tied to the line it came from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{feature} line {line}: {kind}")]
pub struct LineIssue {
    /// Section the line belonged to.
    pub feature: Feature,
    /// One based line number within its source.
    pub line: usize,
    /// What went wrong.
    pub kind: IssueKind,
}
