//! The mission a hook configuration belongs to.

use std::path::{Path, PathBuf};

use serde::Serialize;

/// Name the host editor gives a mission that has never been saved.
pub const UNSAVED_MISSION_NAME: &str = "NewMission";

/// Mission file location plus the flight-group names the host editor supplies.
#[derive(Debug, Clone, Serialize)]
pub struct Mission {
    path: PathBuf,
    flight_groups: Vec<String>,
}

impl Mission {
    /// Describe the mission stored at `path`.
    pub fn new(path: impl Into<PathBuf>, flight_groups: Vec<String>) -> Self {
        Self {
            path: path.into(),
            flight_groups,
        }
    }

    /// Path of the mission file itself, e.g. `Missions/1b6m1.tie`.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flight-group display names in mission order.
    pub fn flight_groups(&self) -> &[String] {
        &self.flight_groups
    }

    /// File name without its extension.
    pub fn name(&self) -> String {
        self.path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Whether the host editor has not written the mission to disk yet.
    pub fn is_unsaved(&self) -> bool {
        let name = self.name();
        name.is_empty() || name == UNSAVED_MISSION_NAME
    }

    /// Unified configuration file next to the mission.
    pub fn config_path(&self) -> PathBuf {
        self.path.with_extension("ini")
    }

    /// Backup taken while the unified file is being replaced.
    pub fn backup_path(&self) -> PathBuf {
        self.path.with_file_name(format!("{}_ini.bak", self.name()))
    }
}
