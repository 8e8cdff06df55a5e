//! Game installation layout: hook DLLs and the `Missions` folder.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::models::Feature;

/// Folder under the installation root that holds missions and legacy files.
pub const MISSIONS_DIR: &str = "Missions";

/// Root of a game installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Installation {
    root: PathBuf,
}

impl Installation {
    /// Installation rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Installation root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding mission files and legacy hook files.
    pub fn missions_dir(&self) -> PathBuf {
        self.root.join(MISSIONS_DIR)
    }

    /// Whether the hook DLL that consumes `feature` is installed.
    pub fn hook_available(&self, feature: Feature) -> bool {
        self.root.join(feature.hook_dll()).is_file()
    }

    /// Legacy per-feature file path for `mission_name`, whether or not it exists.
    pub fn legacy_path(&self, mission_name: &str, feature: Feature) -> PathBuf {
        self.missions_dir()
            .join(format!("{mission_name}{}", feature.legacy_suffix()))
    }

    /// Legacy files present on disk for `mission_name`, in feature order.
    pub fn existing_legacy_files(&self, mission_name: &str) -> Vec<(Feature, PathBuf)> {
        Feature::ALL
            .into_iter()
            .map(|feature| (feature, self.legacy_path(mission_name, feature)))
            .filter(|(feature, path)| {
                let present = path.is_file();
                if present {
                    debug!(%feature, path = %path.display(), "Found legacy file");
                }
                present
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn finds_hooks_and_legacy_files() -> Result<()> {
        let temp = tempdir()?;
        let install = Installation::new(temp.path());
        fs::create_dir_all(install.missions_dir())?;
        fs::write(temp.path().join("Hook_Hangars.dll"), b"")?;
        fs::write(install.missions_dir().join("1b6m1.txt"), "fg, 0, iff, 1\n")?;
        fs::write(install.missions_dir().join("1b6m1_HangarMap.txt"), "")?;
        fs::write(install.missions_dir().join("other_Sounds.txt"), "")?;

        assert!(install.hook_available(Feature::HangarMap));
        assert!(install.hook_available(Feature::FamHangarCamera));
        assert!(!install.hook_available(Feature::Sounds));

        let found: Vec<Feature> = install
            .existing_legacy_files("1b6m1")
            .into_iter()
            .map(|(feature, _)| feature)
            .collect();
        assert_eq!(found, vec![Feature::MissionTie, Feature::HangarMap]);
        Ok(())
    }

    #[test]
    fn legacy_paths_follow_the_naming_convention() {
        let install = Installation::new("/xwa");
        assert_eq!(
            install.legacy_path("1b6m1", Feature::FamHangarCamera),
            PathBuf::from("/xwa/Missions/1b6m1_FamHangarCamera.txt")
        );
        assert_eq!(
            install.legacy_path("1b6m1", Feature::MissionTie),
            PathBuf::from("/xwa/Missions/1b6m1.txt")
        );
    }
}
