//! The normalised guidance catalog.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::normalize::{ListField, normalize_direction_key, normalize_zone};
use crate::error::{Error, Result};
use crate::model::{DirectionLabel, RoomCategory};

/// Guidance for one room category in one direction.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GuidanceEntry {
    /// Zone text, e.g. `Best`, `Good`, `Not Ideal`.
    pub zone: String,
    pub element: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub planet: String,
    pub effects: Vec<String>,
    pub remedies_primary: Vec<String>,
    pub remedies_secondary: Vec<String>,
    pub colors_favorable: Vec<String>,
    pub colors_avoid: Vec<String>,
}

impl GuidanceEntry {
    /// Primary remedies followed by secondary ones.
    pub fn remedies(&self) -> impl Iterator<Item = &String> {
        self.remedies_primary.iter().chain(&self.remedies_secondary)
    }
}

/// A raw record as found in guidance files. Every field is optional.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(default)]
    compass_direction: Option<String>,
    #[serde(default)]
    direction: Option<String>,
    #[serde(default)]
    zone: Option<String>,
    #[serde(default)]
    element: Option<Value>,
    #[serde(default)]
    planet: Option<String>,
    #[serde(default, alias = "effects")]
    effect: Option<ListField>,
    #[serde(default, alias = "remedies")]
    remedies_primary: Option<ListField>,
    #[serde(default)]
    remedies_secondary: Option<ListField>,
    #[serde(default, alias = "colors_favorable")]
    colors: Option<ListField>,
    #[serde(default, alias = "colors_avoid")]
    avoid: Option<ListField>,
}

impl RawRecord {
    /// Direction text carried inside list-shaped records.
    fn embedded_direction(&self) -> Option<&str> {
        self.compass_direction
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.direction.as_deref())
    }

    fn into_entry(self) -> GuidanceEntry {
        let element = match self.element {
            Some(Value::String(s)) => s,
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };
        GuidanceEntry {
            zone: normalize_zone(self.zone.as_deref()),
            element,
            planet: self.planet.unwrap_or_default(),
            effects: self.effect.map(ListField::into_items).unwrap_or_default(),
            remedies_primary: self.remedies_primary.map(ListField::into_items).unwrap_or_default(),
            remedies_secondary: self
                .remedies_secondary
                .map(ListField::into_items)
                .unwrap_or_default(),
            colors_favorable: self.colors.map(ListField::into_items).unwrap_or_default(),
            colors_avoid: self.avoid.map(ListField::into_items).unwrap_or_default(),
        }
    }
}

/// Entries of one guidance set, keyed by normalised direction.
pub type GuidanceSet = BTreeMap<String, GuidanceEntry>;

/// Directional guidance for every room category, `catalog[category][direction]`.
///
/// Constructed once at startup and handed to the scoring engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GuidanceCatalog {
    sets: BTreeMap<String, GuidanceSet>,
}

impl GuidanceCatalog {
    /// An empty catalog. Every lookup misses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalise one named set and add it, replacing any set with the same name.
    ///
    /// `raw` must be either an array of records carrying their own direction or
    /// an object keyed by direction text. Records that fail to parse or have no
    /// direction are skipped. Returns the number of entries kept.
    pub fn insert_set(&mut self, name: &str, raw: &Value) -> Result<usize> {
        let mut entries = GuidanceSet::new();
        match raw {
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    let Some(record) = parse_record(name, &i.to_string(), item) else {
                        continue;
                    };
                    let key = normalize_direction_key(record.embedded_direction().unwrap_or_default());
                    if key.is_empty() {
                        log::warn!("Guidance set '{}': record {} has no direction, skipped", name, i);
                        continue;
                    }
                    entries.insert(key, record.into_entry());
                }
            }
            Value::Object(map) => {
                for (dir, item) in map {
                    let key = normalize_direction_key(dir);
                    if key.is_empty() {
                        log::warn!("Guidance set '{}': empty direction key, skipped", name);
                        continue;
                    }
                    let Some(record) = parse_record(name, dir, item) else {
                        continue;
                    };
                    entries.insert(key, record.into_entry());
                }
            }
            other => {
                return Err(Error::invalid_guidance_set(
                    name,
                    format!("expected a list or a mapping, found {}", json_kind(other)),
                ));
            }
        }

        let count = entries.len();
        log::debug!("Guidance set '{}': {} entries", name, count);
        self.sets.insert(name.to_string(), entries);
        Ok(count)
    }

    /// Build a catalog from named raw sets.
    ///
    /// Sets with the wrong overall shape are skipped with a warning. Fails only
    /// when no entries at all could be loaded.
    pub fn from_sets<I, S>(sets: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Value)>,
        S: AsRef<str>,
    {
        let mut catalog = Self::new();
        for (name, raw) in sets {
            if let Err(e) = catalog.insert_set(name.as_ref(), &raw) {
                log::warn!("{}", e);
            }
        }
        catalog.ensure_not_empty()?;
        Ok(catalog)
    }

    /// The data set compiled into the binary.
    pub fn builtin() -> Result<Self> {
        let sets = BUILTIN_SETS
            .iter()
            .map(|(name, json)| Ok((*name, serde_json::from_str::<Value>(json)?)))
            .collect::<Result<Vec<_>>>()?;
        Self::from_sets(sets)
    }

    /// Load every `*.json` file in `dir`; each file is one set named after its stem.
    ///
    /// Files that cannot be read or parsed are skipped with a warning.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(Error::GuidanceDirNotFound {
                path: dir.to_path_buf(),
            });
        }

        let mut paths: Vec<_> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && path
                        .extension()
                        .and_then(|ext| ext.to_str())
                        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
            })
            .collect();
        // Sort for a deterministic override order when stems collide.
        paths.sort();

        let mut sets = Vec::with_capacity(paths.len());
        for path in paths {
            let Some(name) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string) else {
                continue;
            };
            let raw = match std::fs::read_to_string(&path) {
                Ok(text) => text,
                Err(e) => {
                    log::warn!("Failed to read guidance file {:?}: {}", path, e);
                    continue;
                }
            };
            match serde_json::from_str::<Value>(&raw) {
                Ok(value) => sets.push((name, value)),
                Err(e) => log::warn!("Failed to parse guidance file {:?}: {}", path, e),
            }
        }

        let catalog = Self::from_sets(sets)?;
        log::info!(
            "Loaded {} guidance sets ({} entries) from {:?}",
            catalog.set_count(),
            catalog.entry_count(),
            dir
        );
        Ok(catalog)
    }

    fn ensure_not_empty(&self) -> Result<()> {
        if self.entry_count() == 0 {
            Err(Error::NoGuidanceLoaded)
        } else {
            Ok(())
        }
    }

    /// Entries for a set name, if loaded.
    pub fn set(&self, name: &str) -> Option<&GuidanceSet> {
        self.sets.get(name)
    }

    /// Entries for a scoring category, if loaded.
    pub fn category(&self, category: RoomCategory) -> Option<&GuidanceSet> {
        self.set(category.name())
    }

    /// Exact lookup, no fallback.
    pub fn get(&self, category: RoomCategory, direction: DirectionLabel) -> Option<&GuidanceEntry> {
        self.category(category)?.get(direction.as_str())
    }

    /// Names of all loaded sets, sorted.
    pub fn set_names(&self) -> impl Iterator<Item = &str> {
        self.sets.keys().map(String::as_str)
    }

    pub fn set_count(&self) -> usize {
        self.sets.len()
    }

    /// Total entries across all sets.
    pub fn entry_count(&self) -> usize {
        self.sets.values().map(BTreeMap::len).sum()
    }

    /// Zone text for every category in a direction, for side-by-side display.
    pub fn zones_for_direction(&self, direction: DirectionLabel) -> Vec<(RoomCategory, &str)> {
        RoomCategory::all()
            .iter()
            .filter_map(|&cat| self.get(cat, direction).map(|e| (cat, e.zone.as_str())))
            .collect()
    }
}

fn parse_record(set: &str, key: &str, item: &Value) -> Option<RawRecord> {
    match RawRecord::deserialize(item) {
        Ok(record) => Some(record),
        Err(e) => {
            log::warn!("Guidance set '{}': record {} skipped: {}", set, key, e);
            None
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}

const BUILTIN_SETS: [(&str, &str); 5] = [
    ("Bedroom", include_str!("../../data/guidance/Bedroom.json")),
    ("Kitchen", include_str!("../../data/guidance/Kitchen.json")),
    ("Dining", include_str!("../../data/guidance/Dining.json")),
    ("Toilet", include_str!("../../data/guidance/Toilet.json")),
    ("Living Room", include_str!("../../data/guidance/Living Room.json")),
];
