//! Load and save of one mission's hook configuration.

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::{
    error::{HookError, LineIssue},
    format::{read_unified, render_unified},
    installation::Installation,
    legacy::{load_legacy, LegacySource},
    mission::Mission,
    models::{ConfigModel, Feature, MIN_MAP_ENTRIES},
};

/// Asked before a save that would silently drop an undersized hangar map.
pub trait SavePrompt {
    /// `feature` holds `entries` placements, fewer than needed. Return `true`
    /// to save without it, `false` to abort the whole save.
    fn confirm_drop_map(&mut self, feature: Feature, entries: usize) -> bool;
}

impl<F> SavePrompt for F
where
    F: FnMut(Feature, usize) -> bool,
{
    fn confirm_drop_map(&mut self, feature: Feature, entries: usize) -> bool {
        self(feature, entries)
    }
}

/// Result of [`HookSession::save`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The unified file was (re)written at the given path.
    Written(PathBuf),
    /// Nothing is in use; the unified file no longer exists.
    Removed,
    /// The prompt declined; nothing on disk changed.
    Aborted,
}

/// An edit session over one mission's hook configuration.
///
/// Opening reads the legacy files first and the unified file on top of them.
/// Saving always writes the unified layout and retires the legacy files.
pub struct HookSession {
    mission: Mission,
    installation: Option<Installation>,
    legacy_sources: Vec<LegacySource>,
    model: ConfigModel,
    issues: Vec<LineIssue>,
}

impl HookSession {
    /// Load the configuration for `mission`.
    ///
    /// Legacy files are only looked up when an installation is known.
    pub fn open(mission: Mission, installation: Option<Installation>) -> Result<Self> {
        if mission.is_unsaved() {
            return Err(HookError::UnsavedMission.into());
        }

        let mut model = ConfigModel::default();
        let mut issues = Vec::new();
        let mut legacy_sources = Vec::new();
        let name = mission.name();

        if let Some(installation) = &installation {
            let (sources, found) =
                load_legacy(installation, &name, &mut model, mission.flight_groups())?;
            legacy_sources = sources;
            issues.extend(found);
        }

        let config_path = mission.config_path();
        if config_path.is_file() {
            let text = fs::read_to_string(&config_path)
                .with_context(|| format!("failed to read {}", config_path.display()))?;
            let found = read_unified(&text, &mut model, mission.flight_groups())
                .with_context(|| format!("failed to parse {}", config_path.display()))?;
            issues.extend(found);
        }

        model.enable_populated();
        info!(
            mission = %name,
            legacy_files = legacy_sources.len(),
            issues = issues.len(),
            "Hook settings loaded"
        );

        Ok(Self {
            mission,
            installation,
            legacy_sources,
            model,
            issues,
        })
    }

    /// Mission this session edits.
    pub fn mission(&self) -> &Mission {
        &self.mission
    }

    /// Current in-memory configuration.
    pub fn model(&self) -> &ConfigModel {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut ConfigModel {
        &mut self.model
    }

    /// Non-fatal problems found while loading.
    pub fn issues(&self) -> &[LineIssue] {
        &self.issues
    }

    /// Legacy files that fed the model and have not been retired yet.
    pub fn legacy_sources(&self) -> &[LegacySource] {
        &self.legacy_sources
    }

    /// Whether the hook consuming `feature` is installed. `None` when no
    /// installation is known.
    pub fn hook_available(&self, feature: Feature) -> Option<bool> {
        self.installation
            .as_ref()
            .map(|installation| installation.hook_available(feature))
    }

    /// The unified file as it would be written now.
    pub fn render(&self) -> Result<String, HookError> {
        render_unified(&self.model, &self.mission.name(), self.mission.flight_groups())
    }

    /// Persist the model to the unified file.
    ///
    /// Undersized hangar maps go through `prompt` first. The previous file is
    /// backed up and restored if writing fails; the session stays usable
    /// for another attempt.
    pub fn save(&mut self, prompt: &mut dyn SavePrompt) -> Result<SaveOutcome> {
        if self.model.features.hangars {
            for feature in [Feature::HangarMap, Feature::FamHangarMap] {
                let entries = self.model.map(feature).map_or(0, Vec::len);
                if (1..MIN_MAP_ENTRIES).contains(&entries)
                    && !prompt.confirm_drop_map(feature, entries)
                {
                    info!(%feature, entries, "Save aborted on undersized map");
                    return Ok(SaveOutcome::Aborted);
                }
            }
        }

        let target = self.mission.config_path();
        if !self.model.any_written() {
            if target.exists() {
                fs::remove_file(&target)
                    .with_context(|| format!("failed to remove {}", target.display()))?;
                info!(path = %target.display(), "No hooks in use; unified file removed");
            }
            self.retire_legacy_sources();
            return Ok(SaveOutcome::Removed);
        }

        let text = self.render()?;
        replace_with_backup(&target, &self.mission.backup_path(), |path| {
            write_atomically(path, &text)
        })?;
        info!(path = %target.display(), "Hook settings saved");
        self.retire_legacy_sources();
        Ok(SaveOutcome::Written(target))
    }

    fn retire_legacy_sources(&mut self) {
        self.legacy_sources.retain(|source| {
            if !source.retire_on_save() {
                return true;
            }
            match fs::remove_file(&source.path) {
                Ok(()) => {
                    info!(path = %source.path.display(), "Legacy file retired");
                    false
                }
                Err(err) => {
                    warn!(path = %source.path.display(), "Failed to remove legacy file: {err}");
                    true
                }
            }
        });
    }
}

/// Run `write` against `target`, restoring the previous contents on failure.
fn replace_with_backup<F>(target: &Path, backup: &Path, write: F) -> Result<()>
where
    F: FnOnce(&Path) -> Result<()>,
{
    let had_previous = target.is_file();
    if had_previous {
        fs::copy(target, backup).with_context(|| {
            format!(
                "failed to back up {} to {}",
                target.display(),
                backup.display()
            )
        })?;
    }

    let result = write(target);
    if let Err(err) = &result {
        warn!(path = %target.display(), "Write failed: {err:#}");
        if had_previous {
            fs::copy(backup, target)
                .with_context(|| format!("failed to restore {}", target.display()))?;
            warn!(path = %target.display(), "Restored from backup");
        }
    }

    if had_previous {
        if let Err(err) = fs::remove_file(backup) {
            warn!(path = %backup.display(), "Failed to remove backup: {err}");
        }
    }
    result
}

/// Write `text` to a temporary sibling of `target` and rename it into place.
fn write_atomically(target: &Path, text: &str) -> Result<()> {
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let mut file = NamedTempFile::new_in(&dir)
        .with_context(|| format!("failed to create temporary file in {}", dir.display()))?;
    file.write_all(text.as_bytes())
        .with_context(|| format!("failed to write {}", file.path().display()))?;
    file.as_file()
        .sync_all()
        .with_context(|| format!("failed to flush {}", file.path().display()))?;
    file.persist(target)
        .map_err(|err| err.error)
        .with_context(|| format!("failed to replace {}", target.display()))?;
    Ok(())
}
