//! Legacy one-file-per-feature layout.
//!
//! Before the unified `<mission>.ini`, every hook read its own
//! `Missions/<mission><suffix>` text file. Those files hold the body of a
//! single section without a header and are read with the same line rules.

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::{
    error::{HookError, LineIssue},
    format::{is_comment, Dialect, SectionReader},
    installation::Installation,
    models::{ConfigModel, Feature},
};

/// A legacy file that contributed to the loaded model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacySource {
    /// Feature the file configures.
    pub feature: Feature,
    /// Location on disk.
    pub path: PathBuf,
}

impl LegacySource {
    /// Whether a successful unified save makes this file redundant.
    ///
    /// Objects are not written to the unified file, so their legacy file
    /// stays in place.
    pub fn retire_on_save(&self) -> bool {
        self.feature != Feature::Objects
    }
}

/// Apply the body of a legacy `feature` file to `model`.
pub fn read_legacy_text(
    feature: Feature,
    text: &str,
    model: &mut ConfigModel,
    flight_groups: &[String],
) -> Result<Vec<LineIssue>, HookError> {
    let mut reader = SectionReader::new(model, flight_groups, Dialect::Legacy);
    for (index, line) in text.lines().enumerate() {
        if is_comment(line) {
            continue;
        }
        reader.read_line(feature, index + 1, line)?;
    }
    Ok(reader.into_issues())
}

/// Read every legacy file present for `mission_name` into `model`.
///
/// Missing files are skipped. Returns the files that were read together with
/// the non-fatal issues they produced.
pub fn load_legacy(
    installation: &Installation,
    mission_name: &str,
    model: &mut ConfigModel,
    flight_groups: &[String],
) -> Result<(Vec<LegacySource>, Vec<LineIssue>)> {
    let mut sources = Vec::new();
    let mut issues = Vec::new();

    for (feature, path) in installation.existing_legacy_files(mission_name) {
        let text = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let found = read_legacy_text(feature, &text, model, flight_groups)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        info!(%feature, path = %path.display(), "Legacy settings read");
        issues.extend(found);
        sources.push(LegacySource { feature, path });
    }

    Ok((sources, issues))
}
