use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::error::{WorldError, WorldResult};

/// A coarse grouping of ore block types into one material.
///
/// Declaration order is the column order of every result table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OreFamily {
    /// `coal_ore`, `deepslate_coal_ore`.
    Coal,
    /// `copper_ore`, `deepslate_copper_ore`.
    Copper,
    /// `iron_ore`, `deepslate_iron_ore`.
    Iron,
    /// `lapis_ore`, `deepslate_lapis_ore`.
    Lapis,
    /// `redstone_ore`, `deepslate_redstone_ore`.
    Redstone,
    /// `gold_ore`, `deepslate_gold_ore`.
    Gold,
    /// `emerald_ore`, `deepslate_emerald_ore`.
    Emeralds,
    /// `diamond_ore`, `deepslate_diamond_ore`.
    Diamonds,
}

impl OreFamily {
    /// All families in column order.
    pub const ALL: [OreFamily; 8] = [
        Self::Coal,
        Self::Copper,
        Self::Iron,
        Self::Lapis,
        Self::Redstone,
        Self::Gold,
        Self::Emeralds,
        Self::Diamonds,
    ];

    /// The family name used in tables and CSV headers.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Coal => "coal",
            Self::Copper => "copper",
            Self::Iron => "iron",
            Self::Lapis => "lapis",
            Self::Redstone => "redstone",
            Self::Gold => "gold",
            Self::Emeralds => "emeralds",
            Self::Diamonds => "diamonds",
        }
    }
}

impl fmt::Display for OreFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OreFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|family| family.name() == s)
            .ok_or_else(|| format!("unknown ore family \"{s}\""))
    }
}

/// The ore blocks recognized by the standard table.
const STANDARD_ORES: [(&str, OreFamily); 16] = [
    ("iron_ore", OreFamily::Iron),
    ("deepslate_iron_ore", OreFamily::Iron),
    ("gold_ore", OreFamily::Gold),
    ("deepslate_gold_ore", OreFamily::Gold),
    ("diamond_ore", OreFamily::Diamonds),
    ("deepslate_diamond_ore", OreFamily::Diamonds),
    ("copper_ore", OreFamily::Copper),
    ("deepslate_copper_ore", OreFamily::Copper),
    ("redstone_ore", OreFamily::Redstone),
    ("deepslate_redstone_ore", OreFamily::Redstone),
    ("lapis_ore", OreFamily::Lapis),
    ("deepslate_lapis_ore", OreFamily::Lapis),
    ("coal_ore", OreFamily::Coal),
    ("deepslate_coal_ore", OreFamily::Coal),
    ("emerald_ore", OreFamily::Emeralds),
    ("deepslate_emerald_ore", OreFamily::Emeralds),
];

static STANDARD: LazyLock<OreTable> = LazyLock::new(|| {
    OreTable::from_entries(
        STANDARD_ORES
            .iter()
            .map(|&(id, family)| (id.to_string(), family)),
    )
});

/// Maps block identifiers to ore families.
///
/// Membership in the table is what makes a block an ore candidate and what
/// lets a vein grow through it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OreTable {
    entries: HashMap<String, OreFamily>,
}

impl OreTable {
    /// The built-in sixteen-entry table, built once per process.
    pub fn standard() -> &'static OreTable {
        &STANDARD
    }

    /// Build a table from `(block id, family)` pairs. Later pairs win.
    pub fn from_entries(entries: impl IntoIterator<Item = (String, OreFamily)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Parse `block_id:family` lines. Blank lines and `#` comments are skipped.
    pub fn parse(text: &str) -> WorldResult<Self> {
        let mut entries = HashMap::new();
        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (id, family) = line.split_once(':').ok_or_else(|| WorldError::OreTable {
                line: index + 1,
                message: format!("expected `block_id:family`, got \"{line}\""),
            })?;
            let id = id.trim();
            if id.is_empty() {
                return Err(WorldError::OreTable {
                    line: index + 1,
                    message: "empty block id".into(),
                });
            }
            let family = family
                .trim()
                .parse::<OreFamily>()
                .map_err(|message| WorldError::OreTable {
                    line: index + 1,
                    message,
                })?;
            entries.insert(id.to_string(), family);
        }
        Ok(Self { entries })
    }

    /// Read and parse an ore table file.
    pub fn load(path: &Path) -> WorldResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| WorldError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// The family of `id`, if it is a recognized ore.
    pub fn family_of(&self, id: &str) -> Option<OreFamily> {
        self.entries.get(id).copied()
    }

    /// Whether `id` is a recognized ore.
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Number of recognized block identifiers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table recognizes nothing.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
