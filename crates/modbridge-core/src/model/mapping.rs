use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{HashMap, HashSet};
use std::fmt;

use super::element::{ElementKey, MissingElement};

/// Operator-approved replacements: missing key -> surviving key
///
/// Iteration and serialization follow resolution order. Equality is
/// order-insensitive: two mappings are equal when they hold the same pairs.
#[derive(Debug, Clone, Default)]
pub struct ReplacementMapping {
    entries: Vec<(ElementKey, ElementKey)>,
    index: HashMap<ElementKey, usize>,
}

impl ReplacementMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a replacement; re-resolving a key overwrites its value in place
    pub fn insert(&mut self, missing: ElementKey, replacement: ElementKey) {
        match self.index.get(&missing) {
            Some(&pos) => self.entries[pos].1 = replacement,
            None => {
                self.index.insert(missing.clone(), self.entries.len());
                self.entries.push((missing, replacement));
            }
        }
    }

    pub fn get(&self, missing: &str) -> Option<&ElementKey> {
        self.index.get(missing).map(|&pos| &self.entries[pos].1)
    }

    pub fn contains_key(&self, missing: &str) -> bool {
        self.index.contains_key(missing)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ElementKey, &ElementKey)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Keys that do not name any element of `missing`
    pub fn stale_keys<'a>(&'a self, missing: &[MissingElement]) -> Vec<&'a ElementKey> {
        let known: HashSet<ElementKey> = missing.iter().map(MissingElement::key).collect();
        self.entries
            .iter()
            .map(|(k, _)| k)
            .filter(|k| !known.contains(*k))
            .collect()
    }
}

impl PartialEq for ReplacementMapping {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(k, v)| other.get(k.as_str()) == Some(v))
    }
}

impl Eq for ReplacementMapping {}

impl FromIterator<(ElementKey, ElementKey)> for ReplacementMapping {
    fn from_iter<I: IntoIterator<Item = (ElementKey, ElementKey)>>(iter: I) -> Self {
        let mut mapping = ReplacementMapping::new();
        for (k, v) in iter {
            mapping.insert(k, v);
        }
        mapping
    }
}

impl Serialize for ReplacementMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

struct MappingVisitor;

impl<'de> Visitor<'de> for MappingVisitor {
    type Value = ReplacementMapping;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object mapping missing ids to replacement ids")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut mapping = ReplacementMapping::new();
        while let Some((k, v)) = access.next_entry::<ElementKey, ElementKey>()? {
            mapping.insert(k, v);
        }
        Ok(mapping)
    }
}

impl<'de> Deserialize<'de> for ReplacementMapping {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(MappingVisitor)
    }
}

/// Durable partial progress: the mapping so far plus what is left to decide
///
/// Always rebuilt from scratch before a save, never patched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressCheckpoint {
    pub mapping: ReplacementMapping,
    #[serde(default)]
    pub remaining: Vec<MissingElement>,
}

impl ProgressCheckpoint {
    /// Snapshot `mapping`; `remaining` is every missing element not yet mapped, in queue order
    pub fn compute(all_missing: &[MissingElement], mapping: &ReplacementMapping) -> Self {
        Self {
            mapping: mapping.clone(),
            remaining: remaining_elements(all_missing, mapping),
        }
    }
}

/// Elements of `all_missing` whose key is not in `mapping`, preserving order
pub fn remaining_elements(
    all_missing: &[MissingElement],
    mapping: &ReplacementMapping,
) -> Vec<MissingElement> {
    all_missing
        .iter()
        .filter(|m| !mapping.contains_key(m.key().as_str()))
        .cloned()
        .collect()
}
