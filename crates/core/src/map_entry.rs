//! Hangar static-object placement records.
//!
//! A record is one line of comma separated hexadecimal fields:
//!
//! ```text
//! model[, markings], x, y, z, heading_xy, heading_z
//! ```
//!
//! The markings field only appears when it is nonzero. A grounded object
//! carries [`GROUNDED_SENTINEL`] in the `z` slot instead of a coordinate.

use std::{fmt, str::FromStr};

use serde::Serialize;

use crate::error::MapEntryError;

/// Text written in place of the Z coordinate for grounded objects.
pub const GROUNDED_SENTINEL: &str = "0x7fffffff";

/// Vertical placement of a hangar object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Elevation {
    /// Object sits on the hangar floor; the engine ignores Z.
    Grounded,
    /// Explicit Z coordinate.
    At(i32),
}

/// One hangar static-object placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MapEntry {
    /// Model index of the placed object.
    pub model_index: u32,
    /// Marking colour index; 0 means default.
    pub markings: u8,
    /// X coordinate.
    pub position_x: i32,
    /// Y coordinate.
    pub position_y: i32,
    /// Z coordinate or grounded flag.
    pub elevation: Elevation,
    /// Heading in the XY plane.
    pub heading_xy: i32,
    /// Heading around Z.
    pub heading_z: i32,
}

impl MapEntry {
    /// Whether the Z slot holds the grounded sentinel.
    pub fn is_grounded(&self) -> bool {
        matches!(self.elevation, Elevation::Grounded)
    }

    /// Z coordinate, if the object is not grounded.
    pub fn position_z(&self) -> Option<i32> {
        match self.elevation {
            Elevation::Grounded => None,
            Elevation::At(z) => Some(z),
        }
    }

    /// Encode the entry as a map line.
    pub fn encode(&self) -> String {
        self.to_string()
    }

    /// Decode a map line. Whitespace anywhere in the line is ignored.
    pub fn decode(line: &str) -> Result<Self, MapEntryError> {
        let compact: String = line.chars().filter(|ch| !ch.is_whitespace()).collect();
        let fields: Vec<&str> = compact.split(',').collect();
        let offset = match fields.len() {
            6 => 0,
            7 => 1,
            count => return Err(MapEntryError::FieldCount(count)),
        };

        let markings = if offset == 1 {
            u8::from_str_radix(strip_hex_prefix(fields[1]), 16).map_err(|source| {
                MapEntryError::Field {
                    index: 1,
                    text: fields[1].to_string(),
                    source,
                }
            })?
        } else {
            0
        };

        let z_index = 3 + offset;
        let elevation = if fields[z_index].eq_ignore_ascii_case(GROUNDED_SENTINEL) {
            Elevation::Grounded
        } else {
            Elevation::At(parse_word(&fields, z_index)? as i32)
        };

        Ok(Self {
            model_index: parse_word(&fields, 0)?,
            markings,
            position_x: parse_word(&fields, 1 + offset)? as i32,
            position_y: parse_word(&fields, 2 + offset)? as i32,
            elevation,
            heading_xy: parse_word(&fields, 4 + offset)? as i32,
            heading_z: parse_word(&fields, 5 + offset)? as i32,
        })
    }
}

impl fmt::Display for MapEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:x}, ", self.model_index)?;
        if self.markings != 0 {
            write!(f, "{:x}, ", self.markings)?;
        }
        write!(f, "{:x}, {:x}, ", self.position_x, self.position_y)?;
        match self.elevation {
            Elevation::Grounded => f.write_str(GROUNDED_SENTINEL)?,
            Elevation::At(z) => write!(f, "{z:x}")?,
        }
        write!(f, ", {:x}, {:x}", self.heading_xy, self.heading_z)
    }
}

impl FromStr for MapEntry {
    type Err = MapEntryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

fn strip_hex_prefix(text: &str) -> &str {
    text.strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text)
}

/// Parse a 32-bit hexadecimal word; signed fields reinterpret the bits.
fn parse_word(fields: &[&str], index: usize) -> Result<u32, MapEntryError> {
    let text = fields[index];
    u32::from_str_radix(strip_hex_prefix(text), 16).map_err(|source| MapEntryError::Field {
        index,
        text: text.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(markings: u8, elevation: Elevation) -> MapEntry {
        MapEntry {
            model_index: 0x32,
            markings,
            position_x: -1200,
            position_y: 0x1e,
            elevation,
            heading_xy: 0x5a,
            heading_z: 0,
        }
    }

    #[test]
    fn round_trips_every_shape() {
        for markings in [0, 1, 0xff] {
            for elevation in [
                Elevation::Grounded,
                Elevation::At(0),
                Elevation::At(-850),
                Elevation::At(i32::MAX),
                Elevation::At(i32::MIN),
            ] {
                let original = entry(markings, elevation);
                let decoded = MapEntry::decode(&original.encode()).expect("decodes");
                assert_eq!(decoded, original);
            }
        }
    }

    #[test]
    fn short_form_omits_default_markings() {
        let line = entry(0, Elevation::At(0x64)).encode();
        assert_eq!(line, "32, fffffb50, 1e, 64, 5a, 0");
        assert_eq!(line.split(',').count(), 6);
    }

    #[test]
    fn long_form_carries_markings_second() {
        let line = entry(2, Elevation::Grounded).encode();
        assert_eq!(line, "32, 2, fffffb50, 1e, 0x7fffffff, 5a, 0");
    }

    #[test]
    fn sentinel_is_case_insensitive() -> Result<(), MapEntryError> {
        let short = MapEntry::decode("1, 2, 3, 0X7FFFFFFF, 4, 5")?;
        assert!(short.is_grounded());
        assert_eq!(short.position_z(), None);

        let long: MapEntry = "1, 9, 2, 3, 0x7FffFFff, 4, 5".parse()?;
        assert!(long.is_grounded());
        assert_eq!(long.markings, 9);
        assert_eq!(long.position_x, 2);
        Ok(())
    }

    #[test]
    fn bare_max_value_is_a_coordinate() -> Result<(), MapEntryError> {
        let entry = MapEntry::decode("1, 2, 3, 7fffffff, 4, 5")?;
        assert_eq!(entry.elevation, Elevation::At(i32::MAX));
        Ok(())
    }

    #[test]
    fn rejects_wrong_field_counts() {
        assert_eq!(
            MapEntry::decode("1, 2, 3, 4, 5"),
            Err(MapEntryError::FieldCount(5))
        );
        assert_eq!(
            MapEntry::decode("1, 2, 3, 4, 5, 6, 7, 8"),
            Err(MapEntryError::FieldCount(8))
        );
    }

    #[test]
    fn rejects_non_hex_fields() {
        match MapEntry::decode("1, 2, zz, 4, 5, 6") {
            Err(MapEntryError::Field { index, text, .. }) => {
                assert_eq!(index, 2);
                assert_eq!(text, "zz");
            }
            other => panic!("unexpected result {other:?}"),
        }
        assert!(matches!(
            MapEntry::decode("1, 100, 2, 3, 4, 5, 6"),
            Err(MapEntryError::Field { index: 1, .. })
        ));
    }
}
