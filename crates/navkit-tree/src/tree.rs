//! Sidebar set: the full navigation tree keyed by sidebar id.
//!
//! A docs site carries several independent sidebars (guide content vs. API
//! reference) that must not cross-contaminate. [`SidebarSet`] keeps them as
//! an ordered list of `(key, nodes)` entries: declaration order is the order
//! the navbar presents them, and duplicate keys are rejected at parse time
//! instead of being silently collapsed the way a plain map would.

use std::fmt;

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::error::TreeError;
use crate::node::NavNode;

/// Ordered mapping from sidebar key to its root node sequence.
///
/// Immutable once built; rebuilding the site rebuilds the set wholesale.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SidebarSet {
    entries: Vec<(String, Vec<NavNode>)>,
}

impl SidebarSet {
    /// Build a set from `(key, nodes)` entries.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::DuplicateSidebarKey`] if two entries share a key.
    /// Nothing is kept from a rejected input.
    pub fn from_entries(entries: Vec<(String, Vec<NavNode>)>) -> Result<Self, TreeError> {
        for (i, (key, _)) in entries.iter().enumerate() {
            if entries[..i].iter().any(|(seen, _)| seen == key) {
                return Err(TreeError::DuplicateSidebarKey { key: key.clone() });
            }
        }
        Ok(Self { entries })
    }

    /// Parse an authored sidebar definition from YAML.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::Yaml`] for malformed input and
    /// [`TreeError::DuplicateSidebarKey`] for repeated top-level keys.
    pub fn from_yaml(source: &str) -> Result<Self, TreeError> {
        let raw: RawSidebars = serde_yaml::from_str(source)?;
        Self::from_entries(raw.0)
    }

    /// Root node sequence for a sidebar key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&[NavNode]> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, nodes)| nodes.as_slice())
    }

    /// Whether a sidebar key exists.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Iterate entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[NavNode])> {
        self.entries
            .iter()
            .map(|(k, nodes)| (k.as_str(), nodes.as_slice()))
    }

    /// Sidebar keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Number of sidebars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the set has no sidebars.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total node count across all sidebars.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.entries
            .iter()
            .flat_map(|(_, nodes)| nodes)
            .map(NavNode::subtree_len)
            .sum()
    }

    /// Consume the set, yielding the entries.
    ///
    /// Used by [`merge`](crate::merge::merge) which rebuilds the set after
    /// splicing.
    pub(crate) fn into_entries(self) -> Vec<(String, Vec<NavNode>)> {
        self.entries
    }

    /// Rebuild from entries known to be duplicate-free.
    pub(crate) fn from_checked_entries(entries: Vec<(String, Vec<NavNode>)>) -> Self {
        Self { entries }
    }
}

impl Serialize for SidebarSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, nodes) in &self.entries {
            map.serialize_entry(key, nodes)?;
        }
        map.end()
    }
}

/// Raw parse target: collects map entries without rejecting duplicates, so
/// the duplicate check can produce a typed [`TreeError`] instead of a serde
/// message.
struct RawSidebars(Vec<(String, Vec<NavNode>)>);

impl<'de> Deserialize<'de> for RawSidebars {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RawVisitor;

        impl<'de> Visitor<'de> for RawVisitor {
            type Value = RawSidebars;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a mapping from sidebar key to a list of navigation nodes")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, nodes)) = access.next_entry::<String, Vec<NavNode>>()? {
                    entries.push((key, nodes));
                }
                Ok(RawSidebars(entries))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                // An empty YAML document parses as unit; treat it as no sidebars.
                Ok(RawSidebars(Vec::new()))
            }
        }

        deserializer.deserialize_any(RawVisitor)
    }
}
