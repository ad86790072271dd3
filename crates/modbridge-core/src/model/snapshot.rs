use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use super::element::{Element, ElementKey};
use crate::errors::BridgeError;

/// Kind of registered content; each is diffed and correlated independently
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Blocks,
    Items,
    Entities,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Blocks, Category::Items, Category::Entities];

    /// Name used both on the command line and as the element-list key in snapshot JSON
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Blocks => "blocks",
            Category::Items => "items",
            Category::Entities => "entities",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "blocks" | "block" => Ok(Category::Blocks),
            "items" | "item" => Ok(Category::Items),
            "entities" | "entity" => Ok(Category::Entities),
            other => Err(BridgeError::UnknownCategory {
                name: other.to_string(),
            }),
        }
    }
}

/// One mod's entry in a snapshot
///
/// Extraction writes one file per category, so normally only one of the
/// three element lists is populated; absent lists read as empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModEntry {
    pub name: String,
    #[serde(default)]
    pub creator: String,
    pub modid: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub blocks: Vec<Element>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<Element>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entities: Vec<Element>,
}

impl ModEntry {
    pub fn new(modid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            creator: String::new(),
            modid: modid.into(),
            blocks: Vec::new(),
            items: Vec::new(),
            entities: Vec::new(),
        }
    }

    /// Builder-style: set the element list for `category`
    pub fn with_elements(mut self, category: Category, elements: Vec<Element>) -> Self {
        *self.elements_mut(category) = elements;
        self
    }

    pub fn elements(&self, category: Category) -> &[Element] {
        match category {
            Category::Blocks => &self.blocks,
            Category::Items => &self.items,
            Category::Entities => &self.entities,
        }
    }

    fn elements_mut(&mut self, category: Category) -> &mut Vec<Element> {
        match category {
            Category::Blocks => &mut self.blocks,
            Category::Items => &mut self.items,
            Category::Entities => &mut self.entities,
        }
    }
}

/// An existing element viewed as a correlation candidate
#[derive(Debug, Clone, Copy)]
pub struct PoolEntry<'a> {
    pub modid: &'a str,
    pub mod_name: &'a str,
    pub element: &'a Element,
}

impl PoolEntry<'_> {
    pub fn key(&self) -> ElementKey {
        ElementKey::new(self.modid, &self.element.id)
    }
}

/// Registered content of one modpack, keyed by modid, in extraction order
///
/// Mod order is significant: diff output follows it. JSON objects are read
/// through an order-preserving visitor rather than a hash map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    mods: Vec<(String, ModEntry)>,
    index: HashMap<String, usize>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a mod, keeping the original position on replace
    pub fn insert(&mut self, modid: impl Into<String>, entry: ModEntry) {
        let modid = modid.into();
        match self.index.get(&modid) {
            Some(&pos) => self.mods[pos].1 = entry,
            None => {
                self.index.insert(modid.clone(), self.mods.len());
                self.mods.push((modid, entry));
            }
        }
    }

    /// Builder-style insert keyed by the entry's own modid
    pub fn with_mod(mut self, entry: ModEntry) -> Self {
        let modid = entry.modid.clone();
        self.insert(modid, entry);
        self
    }

    pub fn get(&self, modid: &str) -> Option<&ModEntry> {
        self.index.get(modid).map(|&pos| &self.mods[pos].1)
    }

    pub fn contains_mod(&self, modid: &str) -> bool {
        self.index.contains_key(modid)
    }

    /// Mods in snapshot order, with their map keys
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ModEntry)> {
        self.mods.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.mods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mods.is_empty()
    }

    /// Every element of `category`, flattened in mod order then element order
    pub fn pool(&self, category: Category) -> impl Iterator<Item = PoolEntry<'_>> {
        self.mods.iter().flat_map(move |(_, entry)| {
            entry.elements(category).iter().map(move |element| PoolEntry {
                modid: entry.modid.as_str(),
                mod_name: entry.name.as_str(),
                element,
            })
        })
    }

    /// Number of elements of `category` across all mods
    pub fn element_count(&self, category: Category) -> usize {
        self.mods
            .iter()
            .map(|(_, entry)| entry.elements(category).len())
            .sum()
    }
}

impl Serialize for Snapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.mods.len()))?;
        for (modid, entry) in &self.mods {
            map.serialize_entry(modid, entry)?;
        }
        map.end()
    }
}

struct SnapshotVisitor;

impl<'de> Visitor<'de> for SnapshotVisitor {
    type Value = Snapshot;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object mapping modid to mod entries")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Snapshot, A::Error> {
        let mut snapshot = Snapshot::new();
        while let Some((modid, entry)) = access.next_entry::<String, ModEntry>()? {
            snapshot.insert(modid, entry);
        }
        Ok(snapshot)
    }
}

impl<'de> Deserialize<'de> for Snapshot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(SnapshotVisitor)
    }
}
