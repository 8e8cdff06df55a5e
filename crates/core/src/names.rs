//! IFF and flight-group markings name tables.
//!
//! Both tables hold a short list of known names followed by synthetic
//! labels up to [`TABLE_SIZE`] entries. Lookups are pure, so there is no
//! global table to initialise.

/// Number of addressable entries in every name table.
pub const TABLE_SIZE: usize = 256;

/// IFF names known to the engine.
pub const IFF: NameTable = NameTable {
    label: "IFF",
    base: &["Rebel", "Imperial", "Blue", "Yellow", "Red", "Purple"],
    synthetic_prefix: "IFF #",
};

/// Flight-group marking colours known to the engine.
pub const COLORS: NameTable = NameTable {
    label: "color",
    base: &["Red", "Gold", "Blue", "Green"],
    synthetic_prefix: "Clr #",
};

/// A capped list of display names addressed by index.
#[derive(Debug, Clone, Copy)]
pub struct NameTable {
    label: &'static str,
    base: &'static [&'static str],
    synthetic_prefix: &'static str,
}

impl NameTable {
    /// Short label used in error messages.
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Display name for `index`, or `None` past the end of the table.
    pub fn name_at(&self, index: usize) -> Option<String> {
        if index >= TABLE_SIZE {
            return None;
        }
        Some(match self.base.get(index) {
            Some(name) => (*name).to_string(),
            None => format!("{}{}", self.synthetic_prefix, index + 1),
        })
    }

    /// Reverse lookup of [`NameTable::name_at`], ignoring ASCII case.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        if let Some(index) = self
            .base
            .iter()
            .position(|candidate| candidate.eq_ignore_ascii_case(name))
        {
            return Some(index);
        }

        let prefix = self.synthetic_prefix;
        let rest = match name.get(..prefix.len()) {
            Some(head) if head.eq_ignore_ascii_case(prefix) => &name[prefix.len()..],
            _ => return None,
        };
        let number: usize = rest.parse().ok()?;
        let index = number.checked_sub(1)?;
        (index >= self.base.len() && index < TABLE_SIZE).then_some(index)
    }

    /// Iterate over every name in table order.
    pub fn names(&self) -> impl Iterator<Item = String> + '_ {
        (0..TABLE_SIZE).filter_map(|index| self.name_at(index))
    }
}
