use serde::Serialize;

/// Built-in hangar camera presets, `[x, y, z]` per view-slot.
const HANGAR_DEFAULTS: [[i32; 3]; 5] = [
    [1130, -2320, -300],
    [1240, -330, -700],
    [-1120, 1360, -790],
    [-1200, -1530, -850],
    [1070, 4640, -130],
];

/// Built-in family hangar camera presets, `[x, y, z]` per view-slot.
const FAMILY_DEFAULTS: [[i32; 3]; 7] = [
    [780, -6471, -4977],
    [-1970, -8810, -4707],
    [2510, -5391, -5067],
    [1740, -8461, -5047],
    [3180, 2629, -3777],
    [8242, 6500, 10],
    [-13360, 35019, -6537],
];

/// Which camera table a [`CameraTable`] holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CameraKind {
    /// Regular hangar, five view-slots.
    Hangar,
    /// Family base hangar, seven view-slots.
    Family,
}

impl CameraKind {
    /// Keypad keys bound to each view-slot, in slot order.
    pub fn keys(self) -> &'static [&'static str] {
        match self {
            Self::Hangar => &["1", "2", "3", "6", "9"],
            Self::Family => &["1", "2", "3", "6", "7", "8", "9"],
        }
    }

    fn defaults(self) -> &'static [[i32; 3]] {
        match self {
            Self::Hangar => &HANGAR_DEFAULTS,
            Self::Family => &FAMILY_DEFAULTS,
        }
    }
}

/// Camera axis within a view-slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All axes in storage order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }

    /// Upper-case suffix used in `KeyN_X` style keys.
    pub fn label(self) -> &'static str {
        match self {
            Self::X => "X",
            Self::Y => "Y",
            Self::Z => "Z",
        }
    }
}

/// Camera positions per view-slot, with the defaults captured at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CameraTable {
    kind: CameraKind,
    cells: Vec<[i32; 3]>,
    #[serde(skip)]
    defaults: Vec<[i32; 3]>,
}

impl CameraTable {
    /// Table populated with the built-in presets.
    pub fn new(kind: CameraKind) -> Self {
        let defaults = kind.defaults().to_vec();
        Self {
            kind,
            cells: defaults.clone(),
            defaults,
        }
    }

    pub fn kind(&self) -> CameraKind {
        self.kind
    }

    /// Number of view-slots.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Key of a view-slot, e.g. `"6"`.
    pub fn key(&self, slot: usize) -> Option<&'static str> {
        self.kind.keys().get(slot).copied()
    }

    /// Resolve a lower-cased setting key such as `key6_y` to its view-slot.
    pub fn slot_for_key(&self, key: &str) -> Option<usize> {
        self.kind
            .keys()
            .iter()
            .position(|slot_key| key.starts_with(&format!("key{slot_key}")))
    }

    pub fn get(&self, slot: usize, axis: Axis) -> Option<i32> {
        self.cells.get(slot).map(|cell| cell[axis.index()])
    }

    /// Overwrite one cell. Returns `false` if the slot does not exist.
    pub fn set(&mut self, slot: usize, axis: Axis, value: i32) -> bool {
        match self.cells.get_mut(slot) {
            Some(cell) => {
                cell[axis.index()] = value;
                true
            }
            None => false,
        }
    }

    /// The `[x, y, z]` triple of a view-slot.
    pub fn slot(&self, slot: usize) -> Option<[i32; 3]> {
        self.cells.get(slot).copied()
    }

    /// Restore a single view-slot to its preset.
    pub fn reset_slot(&mut self, slot: usize) {
        if let (Some(cell), Some(default)) = (self.cells.get_mut(slot), self.defaults.get(slot)) {
            *cell = *default;
        }
    }

    pub fn slot_modified(&self, slot: usize) -> bool {
        self.cells.get(slot) != self.defaults.get(slot)
    }

    /// Whether any cell differs from the presets.
    pub fn is_modified(&self) -> bool {
        self.cells != self.defaults
    }

    /// View-slots that differ from their presets, in slot order.
    pub fn modified_slots(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.cells.len()).filter(|slot| self.slot_modified(*slot))
    }
}
