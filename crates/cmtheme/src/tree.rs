//! The accumulated result of one conversion.

use indexmap::IndexMap;
use plist::Value;
use serde::{Serialize, Serializer};

use crate::style::StyleAttributes;

/// Property name → value for one selector, in insertion order.
pub type Declarations = IndexMap<String, String>;

/// Label recorded for global settings without a mapping.
pub const GLOBAL_STYLING: &str = "Global styling";

/// Why a scope did not make it into the stylesheet.
#[derive(Debug, Clone, PartialEq)]
pub enum Unsupported {
    /// A key of the global settings entry with no mapping.
    GlobalStyling,
    /// A scoped entry with no mapping, kept whole for inspection.
    Entry(UnsupportedEntry),
}

/// A scoped settings entry that could not be mapped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnsupportedEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    pub settings: StyleAttributes,
}

impl Serialize for Unsupported {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Unsupported::GlobalStyling => serializer.serialize_str(GLOBAL_STYLING),
            Unsupported::Entry(entry) => entry.serialize(serializer),
        }
    }
}

/// Selector tree built by the theme walker and handed to the CSS writer.
///
/// `metadata` and `unsupported` are informational; only `children` reaches
/// the stylesheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OutputTree {
    metadata: IndexMap<String, Value>,
    children: IndexMap<String, Declarations>,
    unsupported: IndexMap<String, Unsupported>,
}

impl OutputTree {
    /// Start a tree for one theme.
    ///
    /// Every top-level key of the theme document except `settings` is copied
    /// into the metadata; `children` and `unsupported` start out empty.
    pub fn new<I>(metadata: I) -> Self
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        Self {
            metadata: metadata
                .into_iter()
                .filter(|(key, _)| !key.eq_ignore_ascii_case("settings"))
                .collect(),
            children: IndexMap::new(),
            unsupported: IndexMap::new(),
        }
    }

    /// Set `property: value` on `selector`, replacing any earlier value.
    pub fn write(&mut self, selector: &str, property: &str, value: &str) {
        self.children
            .entry(selector.to_string())
            .or_default()
            .insert(property.to_string(), value.to_string());
    }

    /// Record a scope without a mapping. Later records for the same scope win.
    pub fn mark_unsupported(&mut self, scope: &str, reason: Unsupported) {
        self.unsupported.insert(scope.to_string(), reason);
    }

    pub fn metadata(&self) -> &IndexMap<String, Value> {
        &self.metadata
    }

    pub fn children(&self) -> &IndexMap<String, Declarations> {
        &self.children
    }

    pub fn unsupported(&self) -> &IndexMap<String, Unsupported> {
        &self.unsupported
    }

    /// Declarations written for `selector`, if any.
    pub fn selector(&self, selector: &str) -> Option<&Declarations> {
        self.children.get(selector)
    }

    /// The value of `property` on `selector`, if written.
    pub fn get(&self, selector: &str, property: &str) -> Option<&str> {
        self.children
            .get(selector)
            .and_then(|d| d.get(property))
            .map(String::as_str)
    }
}
