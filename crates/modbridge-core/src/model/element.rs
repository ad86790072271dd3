use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Blockstate properties of a block: property name -> observed values
///
/// Only blocks carry this; items and entities never do.
pub type VariantInfo = BTreeMap<String, BTreeSet<String>>;

/// Identity key of a registered element: `modid:id`
///
/// Keys are unique across a whole snapshot. The wrapper keeps raw strings
/// (display names, file paths) from being confused with identities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementKey(String);

impl ElementKey {
    /// Build the key for `id` registered by `modid`
    pub fn new(modid: &str, id: &str) -> Self {
        Self(format!("{}:{}", modid, id))
    }

    /// Wrap an already-formatted key (e.g. operator input or a checkpoint entry)
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ElementKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::borrow::Borrow<str> for ElementKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A block, item or entity as listed under its mod in a snapshot
///
/// The owning mod is implied by where the element sits; see [`MissingElement`]
/// for the self-contained form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: String,

    /// Localized name; extraction may not resolve one
    #[serde(default)]
    pub display_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_info: Option<VariantInfo>,
}

impl Element {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: Some(display_name.into()),
            variant_info: None,
        }
    }

    /// Attach blockstate variants
    pub fn with_variants(mut self, variants: VariantInfo) -> Self {
        self.variant_info = Some(variants);
        self
    }

    /// Display name, or the empty string when extraction found none
    pub fn name_or_empty(&self) -> &str {
        self.display_name.as_deref().unwrap_or("")
    }
}

/// An origin-snapshot element with no counterpart in the final snapshot
///
/// Produced by the diff engine and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingElement {
    pub id: String,

    #[serde(default)]
    pub display_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_info: Option<VariantInfo>,

    pub modid: String,
}

impl MissingElement {
    /// Copy an origin element, tagging it with its owning mod
    pub fn from_element(modid: &str, element: &Element) -> Self {
        Self {
            id: element.id.clone(),
            display_name: element.display_name.clone(),
            variant_info: element.variant_info.clone(),
            modid: modid.to_string(),
        }
    }

    pub fn key(&self) -> ElementKey {
        ElementKey::new(&self.modid, &self.id)
    }

    pub fn name_or_empty(&self) -> &str {
        self.display_name.as_deref().unwrap_or("")
    }

    /// True when the element has blockstate variants worth visualizing
    pub fn has_variants(&self) -> bool {
        self.variant_info
            .as_ref()
            .map(|v| !v.is_empty())
            .unwrap_or(false)
    }
}
