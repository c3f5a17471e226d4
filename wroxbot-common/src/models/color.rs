use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::Error;

/// Palette seeded on every startup (ignore-on-conflict).
pub const DEFAULT_COLORS: [(&str, &str); 14] = [
    ("Red", "#FF0000"),
    ("Blue", "#0000FF"),
    ("Green", "#00FF00"),
    ("Yellow", "#FFFF00"),
    ("Orange", "#FFA500"),
    ("Purple", "#800080"),
    ("Pink", "#FFC0CB"),
    ("White", "#FFFFFF"),
    ("Black", "#000000"),
    ("Gray", "#808080"),
    ("Brown", "#A52A2A"),
    ("Teal", "#008080"),
    ("Maroon", "#800000"),
    ("Gold", "#FFD700"),
];

static HEX_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("hex color pattern is valid"));

/// A validated `#RRGGBB` color. The original spelling is preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexColor {
    raw: String,
    rgb: u32,
}

impl HexColor {
    pub fn is_valid(value: &str) -> bool {
        HEX_PATTERN.is_match(value)
    }

    pub fn parse(value: &str) -> Result<Self, Error> {
        if !Self::is_valid(value) {
            return Err(Error::InvalidColor(format!(
                "`{value}` is not a valid hex code (e.g. `#FF5733`)."
            )));
        }
        let rgb = u32::from_str_radix(&value[1..], 16)
            .map_err(|e| Error::InvalidColor(format!("`{value}`: {e}")))?;
        Ok(Self {
            raw: value.to_string(),
            rgb,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn rgb(&self) -> u32 {
        self.rgb
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// A row of the `colors` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorEntry {
    pub name: String,
    pub hex_color: String,
}

/// In-memory projection of the palette, keyed by lowercased name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorMap {
    entries: BTreeMap<String, String>,
}

impl ColorMap {
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = ColorEntry>,
    {
        let mut map = Self::default();
        for entry in entries {
            map.insert(&entry.name, &entry.hex_color);
        }
        map
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(&name.to_lowercase()).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&name.to_lowercase())
    }

    /// Returns false (and leaves the map untouched) when the name is taken.
    pub fn insert(&mut self, name: &str, hex_color: &str) -> bool {
        let key = name.to_lowercase();
        if self.entries.contains_key(&key) {
            return false;
        }
        self.entries.insert(key, hex_color.to_string());
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
