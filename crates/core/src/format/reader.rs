//! Line-level parsing into a [`ConfigModel`](crate::models::ConfigModel).

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::{
    error::{HookError, IssueKind, LineIssue},
    models::{
        Axis, ConfigModel, Feature, HangarObjectSettings, MapEntry, MissionTieOverride,
        ShuttleAnimation, TieKind, MAX_SHUTTLE_MODEL,
    },
    names,
};

use super::{compact_lower, is_comment, parse_header, split_setting};

static TIE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^fg,(\d+),(markings|iff|pilotvoice),([^,]+)$").expect("invalid mission tie regex")
});

static LEGACY_TIE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+),[^,]*,(markings|iff|pilotvoice),([^,]+)$")
        .expect("invalid legacy mission tie regex")
});

/// Which file layout a line came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// Sectioned `<mission>.ini`.
    Unified,
    /// One-feature-per-file text layout.
    Legacy,
}

/// Applies data lines to a [`ConfigModel`], one feature at a time.
pub struct SectionReader<'a> {
    model: &'a mut ConfigModel,
    flight_groups: &'a [String],
    dialect: Dialect,
    issues: Vec<LineIssue>,
}

impl<'a> SectionReader<'a> {
    /// Reader that resolves mission-tie indices against `flight_groups`.
    pub fn new(model: &'a mut ConfigModel, flight_groups: &'a [String], dialect: Dialect) -> Self {
        Self {
            model,
            flight_groups,
            dialect,
            issues: Vec::new(),
        }
    }

    /// Apply one non-comment data line belonging to `feature`.
    ///
    /// Malformed lines are dropped or reported; only an unresolved flight
    /// group aborts the read.
    pub fn read_line(
        &mut self,
        feature: Feature,
        line_no: usize,
        line: &str,
    ) -> Result<(), HookError> {
        let line = line.trim_end_matches('\r');
        match feature {
            Feature::Backdrops | Feature::Sounds | Feature::Objects => {
                if let Some(lines) = self.model.lines_mut(feature) {
                    lines.push(line.to_string());
                }
            }
            Feature::MissionTie => self.read_mission_tie(line_no, line)?,
            Feature::HangarObjects => self.read_hangar_object(line_no, line),
            Feature::HangarCamera | Feature::FamHangarCamera => {
                self.read_camera(feature, line_no, line)
            }
            Feature::HangarMap | Feature::FamHangarMap => match MapEntry::decode(line) {
                Ok(entry) => {
                    if let Some(map) = self.model.map_mut(feature) {
                        map.push(entry);
                    }
                }
                Err(err) => debug!(%feature, line = line_no, "Skipping map line: {err}"),
            },
        }
        Ok(())
    }

    /// Issues collected so far.
    pub fn issues(&self) -> &[LineIssue] {
        &self.issues
    }

    /// Consume the reader, returning the collected issues.
    pub fn into_issues(self) -> Vec<LineIssue> {
        self.issues
    }

    fn report(&mut self, feature: Feature, line: usize, kind: IssueKind) {
        let issue = LineIssue {
            feature,
            line,
            kind,
        };
        warn!("{issue}");
        self.issues.push(issue);
    }

    fn read_mission_tie(&mut self, line_no: usize, line: &str) -> Result<(), HookError> {
        let compact = compact_lower(line);
        let caps = TIE_RE.captures(&compact).or_else(|| match self.dialect {
            Dialect::Legacy => LEGACY_TIE_RE.captures(&compact),
            Dialect::Unified => None,
        });
        let Some(caps) = caps else {
            debug!("Skipping mission tie line {line_no}: {line:?}");
            return Ok(());
        };

        let Ok(flight_group) = caps[1].parse::<usize>() else {
            return Ok(());
        };
        if flight_group >= self.flight_groups.len() {
            return Err(HookError::UnknownFlightGroup {
                index: flight_group,
                count: self.flight_groups.len(),
            });
        }

        let Some(kind) = TieKind::from_tag(&caps[2]) else {
            return Ok(());
        };
        let raw_value = &caps[3];
        let value = match kind {
            TieKind::Pilot => Some(raw_value.to_string()),
            TieKind::Markings => raw_value
                .parse::<usize>()
                .ok()
                .and_then(|index| names::COLORS.name_at(index)),
            TieKind::Iff => raw_value
                .parse::<usize>()
                .ok()
                .and_then(|index| names::IFF.name_at(index)),
        };

        match value {
            Some(value) => self.model.mission_tie.push(MissionTieOverride {
                flight_group,
                kind,
                value,
            }),
            None => self.report(
                Feature::MissionTie,
                line_no,
                IssueKind::InvalidValue {
                    key: kind.tag().to_string(),
                    value: raw_value.to_string(),
                },
            ),
        }
        Ok(())
    }

    fn read_hangar_object(&mut self, line_no: usize, line: &str) {
        let compact = compact_lower(line);
        let Some((key, value)) = split_setting(&compact) else {
            debug!("Skipping hangar object line {line_no}: {line:?}");
            return;
        };

        let invalid = || IssueKind::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };
        let settings = &mut self.model.hangar_objects;
        let issue = match key {
            "loadshuttle" => {
                settings.load_shuttle = value != "0";
                None
            }
            "loaddroids" => {
                settings.load_droids = value != "0";
                None
            }
            "ishangarfloorinverted" => {
                settings.floor_inverted = value != "0";
                None
            }
            "shuttlemodelindex" => match value.parse::<u16>() {
                Ok(index) if index <= MAX_SHUTTLE_MODEL => {
                    settings.shuttle_model_index = index;
                    None
                }
                _ => Some(invalid()),
            },
            "shuttlemarkings" => match value.parse::<u8>() {
                Ok(markings) => {
                    settings.shuttle_markings = markings;
                    None
                }
                Err(_) => Some(invalid()),
            },
            "shuttleanimation" => match ShuttleAnimation::from_tag(value) {
                Some(animation) => {
                    settings.shuttle_animation = animation;
                    None
                }
                None => Some(IssueKind::UnknownShuttleAnimation(value.to_string())),
            },
            "shuttleanimationstraightline" => straight_line(settings, value, invalid),
            // older tooling wrote the key with a typo
            "shuttleanimiationstraightline" if self.dialect == Dialect::Legacy => {
                straight_line(settings, value, invalid)
            }
            _ => {
                settings.extra_lines.push(line.to_string());
                None
            }
        };

        if let Some(kind) = issue {
            self.report(Feature::HangarObjects, line_no, kind);
        }
    }

    fn read_camera(&mut self, feature: Feature, line_no: usize, line: &str) {
        let compact = compact_lower(line);
        let Some((key, value)) = split_setting(&compact) else {
            return;
        };
        let axis = if key.contains("_x") {
            Axis::X
        } else if key.contains("_y") {
            Axis::Y
        } else if key.contains("_z") {
            Axis::Z
        } else {
            debug!("Skipping {feature} line {line_no}: no axis in {key:?}");
            return;
        };

        let parsed = value.parse::<i32>();
        let Some(table) = self.model.camera_mut(feature) else {
            return;
        };
        let Some(slot) = table.slot_for_key(key) else {
            debug!("Skipping {feature} line {line_no}: unknown view {key:?}");
            return;
        };
        match parsed {
            Ok(value) => {
                table.set(slot, axis, value);
            }
            Err(_) => {
                let kind = IssueKind::InvalidValue {
                    key: key.to_string(),
                    value: value.to_string(),
                };
                self.report(feature, line_no, kind);
            }
        }
    }
}

fn straight_line(
    settings: &mut HangarObjectSettings,
    value: &str,
    invalid: impl FnOnce() -> IssueKind,
) -> Option<IssueKind> {
    match value.parse::<u16>() {
        Ok(distance) => {
            settings.straight_line = distance;
            None
        }
        Err(_) => Some(invalid()),
    }
}

/// Read a unified sectioned document into `model`.
///
/// Content is appended to what the model already holds, so legacy files can
/// be read first. Returns the non-fatal issues found along the way.
pub fn read_unified(
    text: &str,
    model: &mut ConfigModel,
    flight_groups: &[String],
) -> Result<Vec<LineIssue>, HookError> {
    let mut reader = SectionReader::new(model, flight_groups, Dialect::Unified);
    let mut active = None;

    for (index, line) in text.lines().enumerate() {
        if is_comment(line) {
            continue;
        }
        if let Some(section) = parse_header(line) {
            if section.is_none() {
                debug!("Ignoring unknown section {:?}", line.trim());
            }
            active = section;
            continue;
        }
        if let Some(feature) = active {
            reader.read_line(feature, index + 1, line)?;
        }
    }

    Ok(reader.into_issues())
}
