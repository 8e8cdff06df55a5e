//! Sectioned hook configuration text.
//!
//! The unified file is a list of `[Section]` headers, each followed by the
//! records of one [`Feature`]. Legacy files hold the body of a single
//! section with no header. Both go through the same per-line rules in
//! [`reader::SectionReader`].

pub mod reader;
pub mod writer;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::Feature;

pub use reader::{read_unified, Dialect, SectionReader};
pub use writer::{render_unified, LINE_ENDING};

static HEADER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[(.*)\]$").expect("invalid section header regex"));

/// Whether a line carries no data: blank, `#`, `;` or `////` prefixed.
pub fn is_comment(line: &str) -> bool {
    let line = line.trim();
    line.is_empty() || line.starts_with('#') || line.starts_with(';') || line.starts_with("////")
}

/// Classify a bracketed header line.
///
/// Returns `None` when the line is not a header at all, `Some(None)` for a
/// header naming an unknown section.
pub fn parse_header(line: &str) -> Option<Option<Feature>> {
    HEADER_RE
        .captures(line.trim())
        .and_then(|caps| caps.get(1))
        .map(|name| Feature::from_section_name(name.as_str()))
}

/// Lower-case `line` and drop every whitespace character.
pub(crate) fn compact_lower(line: &str) -> String {
    line.chars()
        .filter(|ch| !ch.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Split `key=value`, requiring exactly one `=`.
pub(crate) fn split_setting(line: &str) -> Option<(&str, &str)> {
    let mut parts = line.split('=');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(key), Some(value), None) => Some((key, value)),
        _ => None,
    }
}
