use std::fmt;

use serde::Serialize;

/// Shuttle model loaded when no override is set.
pub const DEFAULT_SHUTTLE_MODEL: u16 = 50;
/// Highest valid shuttle model index.
pub const MAX_SHUTTLE_MODEL: u16 = 399;

/// How the hangar shuttle enters and leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ShuttleAnimation {
    #[default]
    Right,
    Top,
    Bottom,
}

impl ShuttleAnimation {
    /// Case-insensitive lookup of a setting tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "right" => Some(Self::Right),
            "top" => Some(Self::Top),
            "bottom" => Some(Self::Bottom),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Right => "Right",
            Self::Top => "Top",
            Self::Bottom => "Bottom",
        }
    }
}

impl fmt::Display for ShuttleAnimation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hangar object overrides, `[HangarObjects]` in the unified file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HangarObjectSettings {
    pub load_shuttle: bool,
    pub shuttle_model_index: u16,
    pub shuttle_markings: u8,
    pub load_droids: bool,
    pub floor_inverted: bool,
    pub shuttle_animation: ShuttleAnimation,
    pub straight_line: u16,
    /// Unrecognised `key = value` lines, kept verbatim.
    pub extra_lines: Vec<String>,
}

impl Default for HangarObjectSettings {
    fn default() -> Self {
        Self {
            load_shuttle: true,
            shuttle_model_index: DEFAULT_SHUTTLE_MODEL,
            shuttle_markings: 0,
            load_droids: true,
            floor_inverted: false,
            shuttle_animation: ShuttleAnimation::Right,
            straight_line: 0,
            extra_lines: Vec::new(),
        }
    }
}

impl HangarObjectSettings {
    /// Whether anything differs from what the engine does without a file.
    pub fn is_modified(&self) -> bool {
        !self.extra_lines.is_empty()
            || !self.load_shuttle
            || !self.load_droids
            || self.floor_inverted
            || self.shuttle_model_index != DEFAULT_SHUTTLE_MODEL
            || self.shuttle_markings != 0
            || self.shuttle_animation != ShuttleAnimation::Right
            || self.straight_line != 0
    }
}
