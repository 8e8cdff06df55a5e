#![allow(missing_docs)]

//! In-memory model of a mission's hook configuration.

mod camera;
mod hangar;

use std::fmt;

use serde::Serialize;

pub use camera::{Axis, CameraKind, CameraTable};
pub use hangar::{HangarObjectSettings, ShuttleAnimation, DEFAULT_SHUTTLE_MODEL, MAX_SHUTTLE_MODEL};

pub use crate::map_entry::{Elevation, MapEntry};

/// Minimum number of entries a hangar map needs to be persisted.
pub const MIN_MAP_ENTRIES: usize = 4;

/// One configurable hook subsystem. Each feature owns one section of the
/// unified file and one legacy file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Feature {
    Backdrops,
    MissionTie,
    Sounds,
    Objects,
    HangarObjects,
    HangarCamera,
    FamHangarCamera,
    HangarMap,
    FamHangarMap,
}

impl Feature {
    /// Every feature, in unified-file order.
    pub const ALL: [Feature; 9] = [
        Feature::Backdrops,
        Feature::MissionTie,
        Feature::Sounds,
        Feature::Objects,
        Feature::HangarObjects,
        Feature::HangarCamera,
        Feature::FamHangarCamera,
        Feature::HangarMap,
        Feature::FamHangarMap,
    ];

    /// Section name without brackets.
    pub fn section_name(self) -> &'static str {
        match self {
            Self::Backdrops => "Resdata",
            Self::MissionTie => "Mission_Tie",
            Self::Sounds => "Sounds",
            Self::Objects => "Objects",
            Self::HangarObjects => "HangarObjects",
            Self::HangarCamera => "HangarCamera",
            Self::FamHangarCamera => "FamHangarCamera",
            Self::HangarMap => "HangarMap",
            Self::FamHangarMap => "FamHangarMap",
        }
    }

    /// Case-insensitive lookup of a section name.
    pub fn from_section_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|feature| feature.section_name().eq_ignore_ascii_case(name))
    }

    /// File name suffix appended to the mission name for the legacy layout.
    pub fn legacy_suffix(self) -> &'static str {
        match self {
            Self::Backdrops => "_Resdata.txt",
            Self::MissionTie => ".txt",
            Self::Sounds => "_Sounds.txt",
            Self::Objects => "_Objects.txt",
            Self::HangarObjects => "_HangarObjects.txt",
            Self::HangarCamera => "_HangarCamera.txt",
            Self::FamHangarCamera => "_FamHangarCamera.txt",
            Self::HangarMap => "_HangarMap.txt",
            Self::FamHangarMap => "_FamHangarMap.txt",
        }
    }

    /// Hook DLL that consumes this feature.
    pub fn hook_dll(self) -> &'static str {
        match self {
            Self::Backdrops => "Hook_Backdrops.dll",
            Self::MissionTie => "Hook_Mission_Tie.dll",
            Self::Sounds => "Hook_Engine_Sound.dll",
            Self::Objects => "Hook_Mission_Objects.dll",
            Self::HangarObjects
            | Self::HangarCamera
            | Self::FamHangarCamera
            | Self::HangarMap
            | Self::FamHangarMap => "Hook_Hangars.dll",
        }
    }

    /// Whether the feature is controlled by the shared hangars toggle.
    pub fn is_hangar(self) -> bool {
        matches!(
            self,
            Self::HangarObjects
                | Self::HangarCamera
                | Self::FamHangarCamera
                | Self::HangarMap
                | Self::FamHangarMap
        )
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.section_name())
    }
}

/// What a mission-tie record overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TieKind {
    Markings,
    Iff,
    Pilot,
}

impl TieKind {
    /// Tag used in the unified file.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Markings => "markings",
            Self::Iff => "iff",
            Self::Pilot => "pilotvoice",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "markings" => Some(Self::Markings),
            "iff" => Some(Self::Iff),
            "pilotvoice" => Some(Self::Pilot),
            _ => None,
        }
    }
}

/// Per flight group override of markings, IFF or pilot voice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissionTieOverride {
    /// Index into the mission's flight-group list.
    pub flight_group: usize,
    pub kind: TieKind,
    /// Colour or IFF display name, or the pilot voice text.
    pub value: String,
}

/// User toggles for each group of features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FeatureToggles {
    pub backdrops: bool,
    pub mission_tie: bool,
    pub sounds: bool,
    pub objects: bool,
    /// Shared by all hangar features.
    pub hangars: bool,
}

impl FeatureToggles {
    /// Toggle state that gates `feature`.
    pub fn enabled(&self, feature: Feature) -> bool {
        match feature {
            Feature::Backdrops => self.backdrops,
            Feature::MissionTie => self.mission_tie,
            Feature::Sounds => self.sounds,
            Feature::Objects => self.objects,
            _ => self.hangars,
        }
    }
}

/// Everything a mission's hook configuration can hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigModel {
    pub features: FeatureToggles,
    pub backdrops: Vec<String>,
    pub mission_tie: Vec<MissionTieOverride>,
    pub sounds: Vec<String>,
    pub objects: Vec<String>,
    pub hangar_objects: HangarObjectSettings,
    pub hangar_camera: CameraTable,
    pub family_camera: CameraTable,
    pub hangar_map: Vec<MapEntry>,
    pub family_map: Vec<MapEntry>,
}

impl Default for ConfigModel {
    fn default() -> Self {
        Self {
            features: FeatureToggles::default(),
            backdrops: Vec::new(),
            mission_tie: Vec::new(),
            sounds: Vec::new(),
            objects: Vec::new(),
            hangar_objects: HangarObjectSettings::default(),
            hangar_camera: CameraTable::new(CameraKind::Hangar),
            family_camera: CameraTable::new(CameraKind::Family),
            hangar_map: Vec::new(),
            family_map: Vec::new(),
        }
    }
}

impl ConfigModel {
    /// Whether `feature` holds anything worth persisting.
    ///
    /// List features also require their toggle. Hangar features are judged on
    /// content alone; [`ConfigModel::is_written`] applies the hangars toggle.
    pub fn is_used(&self, feature: Feature) -> bool {
        match feature {
            Feature::Backdrops => self.features.backdrops && !self.backdrops.is_empty(),
            Feature::MissionTie => self.features.mission_tie && !self.mission_tie.is_empty(),
            Feature::Sounds => self.features.sounds && !self.sounds.is_empty(),
            Feature::Objects => self.features.objects && !self.objects.is_empty(),
            Feature::HangarObjects => self.hangar_objects.is_modified(),
            Feature::HangarCamera => self.hangar_camera.is_modified(),
            Feature::FamHangarCamera => self.family_camera.is_modified(),
            Feature::HangarMap => self.hangar_map.len() >= MIN_MAP_ENTRIES,
            Feature::FamHangarMap => self.family_map.len() >= MIN_MAP_ENTRIES,
        }
    }

    /// Whether the unified writer emits a section for `feature`.
    ///
    /// Objects are read but never written back.
    pub fn is_written(&self, feature: Feature) -> bool {
        match feature {
            Feature::Objects => false,
            feature if feature.is_hangar() => self.features.hangars && self.is_used(feature),
            feature => self.is_used(feature),
        }
    }

    /// Whether the unified file would contain any section at all.
    pub fn any_written(&self) -> bool {
        Feature::ALL.into_iter().any(|feature| self.is_written(feature))
    }

    /// Hangar map for either map feature.
    pub fn map(&self, feature: Feature) -> Option<&Vec<MapEntry>> {
        match feature {
            Feature::HangarMap => Some(&self.hangar_map),
            Feature::FamHangarMap => Some(&self.family_map),
            _ => None,
        }
    }

    pub(crate) fn map_mut(&mut self, feature: Feature) -> Option<&mut Vec<MapEntry>> {
        match feature {
            Feature::HangarMap => Some(&mut self.hangar_map),
            Feature::FamHangarMap => Some(&mut self.family_map),
            _ => None,
        }
    }

    pub(crate) fn camera_mut(&mut self, feature: Feature) -> Option<&mut CameraTable> {
        match feature {
            Feature::HangarCamera => Some(&mut self.hangar_camera),
            Feature::FamHangarCamera => Some(&mut self.family_camera),
            _ => None,
        }
    }

    pub(crate) fn lines_mut(&mut self, feature: Feature) -> Option<&mut Vec<String>> {
        match feature {
            Feature::Backdrops => Some(&mut self.backdrops),
            Feature::Sounds => Some(&mut self.sounds),
            Feature::Objects => Some(&mut self.objects),
            _ => None,
        }
    }

    /// Switch toggles on for every feature that carries content.
    pub fn enable_populated(&mut self) {
        self.features.backdrops |= !self.backdrops.is_empty();
        self.features.mission_tie |= !self.mission_tie.is_empty();
        self.features.sounds |= !self.sounds.is_empty();
        self.features.objects |= !self.objects.is_empty();
        self.features.hangars |= [
            Feature::HangarObjects,
            Feature::HangarCamera,
            Feature::FamHangarCamera,
            Feature::HangarMap,
            Feature::FamHangarMap,
        ]
        .into_iter()
        .any(|feature| self.is_used(feature));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entry() -> MapEntry {
        MapEntry {
            model_index: 0x32,
            markings: 0,
            position_x: 0,
            position_y: 0,
            elevation: Elevation::Grounded,
            heading_xy: 0,
            heading_z: 0,
        }
    }

    #[test]
    fn default_model_uses_nothing() {
        let model = ConfigModel::default();
        for feature in Feature::ALL {
            assert!(!model.is_used(feature), "{feature} should be unused");
        }
        assert!(!model.any_written());
    }

    #[test]
    fn list_features_need_their_toggle() {
        let mut model = ConfigModel::default();
        model.sounds.push("a.wav = b.wav".to_string());
        assert!(!model.is_used(Feature::Sounds));

        model.enable_populated();
        assert!(model.features.sounds);
        assert!(model.is_written(Feature::Sounds));
    }

    #[test]
    fn maps_need_four_entries() {
        let mut model = ConfigModel::default();
        model.features.hangars = true;
        model.hangar_map = vec![sample_entry(); 3];
        assert!(!model.is_used(Feature::HangarMap));
        model.hangar_map.push(sample_entry());
        assert!(model.is_written(Feature::HangarMap));
    }

    #[test]
    fn hangar_features_follow_the_shared_toggle() {
        let mut model = ConfigModel::default();
        model.hangar_camera.set(0, Axis::Z, 0);
        assert!(model.is_used(Feature::HangarCamera));
        assert!(!model.is_written(Feature::HangarCamera));

        model.enable_populated();
        assert!(model.features.hangars);
        assert!(model.is_written(Feature::HangarCamera));
    }

    #[test]
    fn objects_are_never_written() {
        let mut model = ConfigModel::default();
        model.objects.push("FlightModels\\a.opt = FlightModels\\b.opt".to_string());
        model.enable_populated();
        assert!(model.is_used(Feature::Objects));
        assert!(!model.any_written());
    }

    #[test]
    fn section_names_match_case_insensitively() {
        assert_eq!(
            Feature::from_section_name("mission_tie"),
            Some(Feature::MissionTie)
        );
        assert_eq!(
            Feature::from_section_name("FAMHANGARMAP"),
            Some(Feature::FamHangarMap)
        );
        assert_eq!(Feature::from_section_name("Weapons"), None);
    }

    #[test]
    fn model_serialises_for_inspection() -> serde_json::Result<()> {
        let value = serde_json::to_value(ConfigModel::default())?;
        assert_eq!(value["hangar_objects"]["shuttle_model_index"], 50);
        assert_eq!(value["hangar_camera"]["kind"], "Hangar");
        Ok(())
    }
}
