//! Rendering of the unified file.

use crate::{
    error::HookError,
    models::{
        Axis, CameraTable, ConfigModel, Feature, HangarObjectSettings, MapEntry, TieKind,
        DEFAULT_SHUTTLE_MODEL,
    },
    names::{self, NameTable},
};

/// Line terminator used for every written file; the hooks run on Windows.
pub const LINE_ENDING: &str = "\r\n";

struct TextBuilder {
    out: String,
}

impl TextBuilder {
    fn line(&mut self, text: impl AsRef<str>) {
        self.out.push_str(text.as_ref());
        self.out.push_str(LINE_ENDING);
    }

    fn blank(&mut self) {
        self.out.push_str(LINE_ENDING);
    }
}

/// Render the unified file for `mission_name`.
///
/// Only features that [`ConfigModel::is_written`] accepts produce a section,
/// and within them only non-default values are emitted. Fails when a
/// mission-tie record cannot be resolved against `flight_groups` or the name
/// tables.
pub fn render_unified(
    model: &ConfigModel,
    mission_name: &str,
    flight_groups: &[String],
) -> Result<String, HookError> {
    let mut text = TextBuilder { out: String::new() };
    text.line(format!(";{mission_name}.ini"));
    text.blank();

    for feature in Feature::ALL {
        if !model.is_written(feature) {
            continue;
        }
        text.line(format!("[{}]", feature.section_name()));
        match feature {
            Feature::Backdrops => write_lines(&mut text, &model.backdrops),
            Feature::Sounds => write_lines(&mut text, &model.sounds),
            Feature::MissionTie => write_mission_tie(&mut text, model, flight_groups)?,
            Feature::HangarObjects => write_hangar_objects(&mut text, &model.hangar_objects),
            Feature::HangarCamera => write_camera(&mut text, &model.hangar_camera),
            Feature::FamHangarCamera => write_camera(&mut text, &model.family_camera),
            Feature::HangarMap => write_map(&mut text, &model.hangar_map),
            Feature::FamHangarMap => write_map(&mut text, &model.family_map),
            Feature::Objects => {}
        }
    }

    Ok(text.out)
}

fn write_lines(text: &mut TextBuilder, lines: &[String]) {
    for line in lines {
        text.line(line);
    }
    text.blank();
}

fn resolve(table: &NameTable, name: &str) -> Result<usize, HookError> {
    table.index_of(name).ok_or_else(|| HookError::UnknownName {
        table: table.label(),
        name: name.to_string(),
    })
}

fn write_mission_tie(
    text: &mut TextBuilder,
    model: &ConfigModel,
    flight_groups: &[String],
) -> Result<(), HookError> {
    for record in &model.mission_tie {
        if record.flight_group >= flight_groups.len() {
            return Err(HookError::UnknownFlightGroup {
                index: record.flight_group,
                count: flight_groups.len(),
            });
        }
        let value = match record.kind {
            TieKind::Markings => resolve(&names::COLORS, &record.value)?.to_string(),
            TieKind::Iff => resolve(&names::IFF, &record.value)?.to_string(),
            TieKind::Pilot => record.value.clone(),
        };
        text.line(format!(
            "fg, {}, {}, {}",
            record.flight_group,
            record.kind.tag(),
            value
        ));
    }
    text.blank();
    Ok(())
}

fn write_hangar_objects(text: &mut TextBuilder, settings: &HangarObjectSettings) {
    if !settings.load_shuttle {
        text.line("LoadShuttle = 0");
    }
    if settings.shuttle_model_index != DEFAULT_SHUTTLE_MODEL {
        text.line(format!("ShuttleModelIndex = {}", settings.shuttle_model_index));
    }
    if settings.shuttle_markings != 0 {
        text.line(format!("ShuttleMarkings = {}", settings.shuttle_markings));
    }
    if !settings.load_droids {
        text.line("LoadDroids = 0");
    }
    if settings.floor_inverted {
        text.line("IsHangarFloorInverted = 1");
    }
    if settings.shuttle_animation != Default::default() {
        text.line(format!("ShuttleAnimation = {}", settings.shuttle_animation));
    }
    if settings.straight_line != 0 {
        text.line(format!(
            "ShuttleAnimationStraightLine = {}",
            settings.straight_line
        ));
    }
    write_lines(text, &settings.extra_lines);
}

fn write_camera(text: &mut TextBuilder, table: &CameraTable) {
    for slot in table.modified_slots() {
        let Some(key) = table.key(slot) else {
            continue;
        };
        for axis in Axis::ALL {
            if let Some(value) = table.get(slot, axis) {
                text.line(format!("Key{key}_{} = {value}", axis.label()));
            }
        }
        text.blank();
    }
}

fn write_map(text: &mut TextBuilder, entries: &[MapEntry]) {
    for entry in entries {
        text.line(entry.encode());
    }
    text.blank();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        format::read_unified,
        models::{MissionTieOverride, ShuttleAnimation},
    };

    fn flight_groups() -> Vec<String> {
        vec!["Red 1".to_string(), "Gold 1".to_string()]
    }

    fn render(model: &ConfigModel) -> String {
        render_unified(model, "1b6m1", &flight_groups()).expect("renders")
    }

    fn lines(text: &str) -> Vec<&str> {
        text.lines().collect()
    }

    #[test]
    fn empty_model_renders_only_the_banner() {
        assert_eq!(lines(&render(&ConfigModel::default())), vec![";1b6m1.ini", ""]);
    }

    #[test]
    fn sections_follow_the_fixed_order() {
        let mut model = ConfigModel::default();
        model.sounds.push("a.wav = b.wav".to_string());
        model.backdrops.push("resdata\\planet.dat".to_string());
        model.objects.push("a.opt = b.opt".to_string());
        model.hangar_objects.load_droids = false;
        model.enable_populated();

        let text = render(&model);
        assert_eq!(
            lines(&text),
            vec![
                ";1b6m1.ini",
                "",
                "[Resdata]",
                "resdata\\planet.dat",
                "",
                "[Sounds]",
                "a.wav = b.wav",
                "",
                "[HangarObjects]",
                "LoadDroids = 0",
                "",
            ]
        );
        assert!(text.ends_with(LINE_ENDING));
    }

    #[test]
    fn disabled_features_are_suppressed() {
        let mut model = ConfigModel::default();
        model.backdrops.push("resdata\\planet.dat".to_string());
        model.hangar_objects.floor_inverted = true;
        let text = render(&model);
        assert!(!text.contains("[Resdata]"));
        assert!(!text.contains("[HangarObjects]"));
    }

    #[test]
    fn mission_tie_writes_table_indices() {
        let mut model = ConfigModel::default();
        model.features.mission_tie = true;
        model.mission_tie = vec![
            MissionTieOverride {
                flight_group: 1,
                kind: TieKind::Markings,
                value: "Blue".to_string(),
            },
            MissionTieOverride {
                flight_group: 0,
                kind: TieKind::Iff,
                value: "IFF #12".to_string(),
            },
            MissionTieOverride {
                flight_group: 0,
                kind: TieKind::Pilot,
                value: "wedge".to_string(),
            },
        ];
        let text = render(&model);
        assert!(text.contains(
            "[Mission_Tie]\r\nfg, 1, markings, 2\r\nfg, 0, iff, 11\r\nfg, 0, pilotvoice, wedge\r\n"
        ));
    }

    #[test]
    fn unresolved_flight_group_is_fatal() {
        let mut model = ConfigModel::default();
        model.features.mission_tie = true;
        model.mission_tie.push(MissionTieOverride {
            flight_group: 2,
            kind: TieKind::Pilot,
            value: "wedge".to_string(),
        });
        let result = render_unified(&model, "m", &flight_groups());
        assert!(matches!(
            result,
            Err(HookError::UnknownFlightGroup { index: 2, count: 2 })
        ));
    }

    #[test]
    fn unresolved_markings_name_is_fatal() {
        let mut model = ConfigModel::default();
        model.features.mission_tie = true;
        model.mission_tie.push(MissionTieOverride {
            flight_group: 0,
            kind: TieKind::Markings,
            value: "Plaid".to_string(),
        });
        assert!(matches!(
            render_unified(&model, "m", &flight_groups()),
            Err(HookError::UnknownName { table: "color", .. })
        ));
    }

    #[test]
    fn hangar_objects_write_only_changed_settings() {
        let mut model = ConfigModel::default();
        model.features.hangars = true;
        let settings = &mut model.hangar_objects;
        settings.load_shuttle = false;
        settings.shuttle_model_index = 7;
        settings.shuttle_markings = 2;
        settings.shuttle_animation = ShuttleAnimation::Top;
        settings.straight_line = 300;
        settings.extra_lines.push("FlightModels\\A.opt = FlightModels\\B.opt".to_string());

        assert_eq!(
            lines(&render(&model))[2..],
            [
                "[HangarObjects]",
                "LoadShuttle = 0",
                "ShuttleModelIndex = 7",
                "ShuttleMarkings = 2",
                "ShuttleAnimation = Top",
                "ShuttleAnimationStraightLine = 300",
                "FlightModels\\A.opt = FlightModels\\B.opt",
                "",
            ]
        );
    }

    #[test]
    fn default_cameras_produce_no_section() {
        let mut model = ConfigModel::default();
        model.features.hangars = true;
        model.hangar_camera.set(1, Axis::X, 1);
        model.hangar_camera.set(1, Axis::X, 1240);
        let text = render(&model);
        assert!(!text.contains("[HangarCamera]"));
        assert!(!text.contains("[FamHangarCamera]"));
    }

    #[test]
    fn cameras_write_only_modified_slots() {
        let mut model = ConfigModel::default();
        model.features.hangars = true;
        model.family_camera.set(5, Axis::Z, -10);
        assert_eq!(
            lines(&render(&model))[2..],
            [
                "[FamHangarCamera]",
                "Key8_X = 8242",
                "Key8_Y = 6500",
                "Key8_Z = -10",
                "",
            ]
        );
    }

    #[test]
    fn rendered_text_reads_back_to_the_same_model() -> Result<(), HookError> {
        let mut model = ConfigModel::default();
        model.sounds.push("a.wav = b.wav".to_string());
        model.hangar_objects.shuttle_animation = ShuttleAnimation::Bottom;
        model.hangar_camera.set(4, Axis::Y, 0);
        model.hangar_map = (0..4)
            .map(|i| MapEntry::decode(&format!("{i:x}, 2, 3, 0x7fffffff, 4, 5")))
            .collect::<Result<_, _>>()
            .expect("valid map lines");
        model.enable_populated();

        let text = render(&model);
        let mut reread = ConfigModel::default();
        read_unified(&text, &mut reread, &flight_groups())?;
        reread.enable_populated();
        assert_eq!(reread, model);
        Ok(())
    }
}
