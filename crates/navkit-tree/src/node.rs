//! Navigation node types.
//!
//! A sidebar is an ordered sequence of [`NavNode`] values. Nodes are pure
//! data: nothing here resolves documents or renders anything, which is what
//! lets [`validate`](crate::validate) run without touching the renderer.
//!
//! # Authoring format
//!
//! In YAML a bare string is shorthand for a document reference:
//!
//! ```yaml
//! - intro
//! - type: category
//!   label: API Documentation
//!   collapsed: false
//!   link: api/index
//!   items:
//!     - api/quickstart
//! ```

use serde::de::{Deserializer, Error as DeError};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

/// Leaf node referencing a content document by stable identifier.
///
/// The id is resolved against the known document set at validation time,
/// never here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocRef {
    /// Stable document identifier (e.g., `"api/quickstart"`).
    pub id: String,
    /// Display label override. `None` means the renderer uses the
    /// document's own title.
    pub label: Option<String>,
    /// CSS class for presentational styling (e.g., `"api-method get"`).
    pub class_name: Option<String>,
}

/// External or absolute link, not resolved against the document set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkNode {
    /// Link target (external URL or absolute site path).
    pub href: String,
    /// Display label.
    pub label: String,
}

/// Named grouping of nodes, nestable to arbitrary depth.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Category {
    /// Display label. Labels are presentational; insertion points are
    /// addressed by `link`, not label.
    pub label: String,
    /// Whether the category renders collapsed by default. Round-trips
    /// through serialization unchanged.
    pub collapsed: bool,
    /// Landing document id. A category with a link acts as the insertion
    /// point for a generated fragment configured with that id.
    pub link: Option<String>,
    /// Child nodes. Order is significant and preserved verbatim.
    pub items: Vec<NavNode>,
}

/// A single navigation tree node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavNode {
    /// Document reference leaf.
    Doc(DocRef),
    /// External/absolute link leaf.
    Link(LinkNode),
    /// Nested grouping.
    Category(Category),
}

impl NavNode {
    /// Create a plain document reference node.
    #[must_use]
    pub fn doc(id: impl Into<String>) -> Self {
        Self::Doc(DocRef {
            id: id.into(),
            label: None,
            class_name: None,
        })
    }

    /// Create an external link node.
    #[must_use]
    pub fn link(href: impl Into<String>, label: impl Into<String>) -> Self {
        Self::Link(LinkNode {
            href: href.into(),
            label: label.into(),
        })
    }

    /// Display label for this node, if it has one.
    ///
    /// Plain document references have no label of their own; the renderer
    /// falls back to the document title.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Doc(doc) => doc.label.as_deref(),
            Self::Link(link) => Some(&link.label),
            Self::Category(cat) => Some(&cat.label),
        }
    }

    /// Count of nodes in this subtree, including self.
    #[must_use]
    pub fn subtree_len(&self) -> usize {
        match self {
            Self::Doc(_) | Self::Link(_) => 1,
            Self::Category(cat) => 1 + cat.items.iter().map(NavNode::subtree_len).sum::<usize>(),
        }
    }
}

impl Category {
    /// Create a category with the docs-site default of rendering collapsed.
    #[must_use]
    pub fn new(label: impl Into<String>, items: Vec<NavNode>) -> Self {
        Self {
            label: label.into(),
            collapsed: true,
            link: None,
            items,
        }
    }

    /// Set the expanded-by-default presentation.
    #[must_use]
    pub fn expanded(mut self) -> Self {
        self.collapsed = false;
        self
    }

    /// Set the landing document id.
    #[must_use]
    pub fn with_link(mut self, id: impl Into<String>) -> Self {
        self.link = Some(id.into());
        self
    }
}

/// Categories render collapsed unless the author says otherwise.
fn default_collapsed() -> bool {
    true
}

/// Tagged wire form for nodes that need more than the string shorthand.
#[derive(Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum TaggedNode {
    Doc {
        id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        #[serde(
            default,
            rename = "className",
            skip_serializing_if = "Option::is_none"
        )]
        class_name: Option<String>,
    },
    Link {
        href: String,
        label: String,
    },
    Category {
        label: String,
        #[serde(default = "default_collapsed")]
        collapsed: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        link: Option<String>,
        #[serde(default)]
        items: Vec<NavNode>,
    },
}

/// Either the string shorthand or a tagged map.
#[derive(Deserialize)]
#[serde(untagged)]
enum NodeRepr {
    Shorthand(String),
    Tagged(TaggedNode),
}

impl<'de> Deserialize<'de> for NavNode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let repr = NodeRepr::deserialize(deserializer)?;
        match repr {
            NodeRepr::Shorthand(id) => {
                if id.is_empty() {
                    return Err(D::Error::custom("document id cannot be empty"));
                }
                Ok(Self::doc(id))
            }
            NodeRepr::Tagged(TaggedNode::Doc {
                id,
                label,
                class_name,
            }) => Ok(Self::Doc(DocRef {
                id,
                label,
                class_name,
            })),
            NodeRepr::Tagged(TaggedNode::Link { href, label }) => Ok(Self::Link(LinkNode { href, label })),
            NodeRepr::Tagged(TaggedNode::Category {
                label,
                collapsed,
                link,
                items,
            }) => Ok(Self::Category(Category {
                label,
                collapsed,
                link,
                items,
            })),
        }
    }
}

impl Serialize for NavNode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            // Plain doc references serialize back to the string shorthand,
            // so authored files round-trip without noise.
            Self::Doc(doc) if doc.label.is_none() && doc.class_name.is_none() => {
                serializer.serialize_str(&doc.id)
            }
            Self::Doc(doc) => {
                let mut map = serializer.serialize_map(None)?;
                map.serialize_entry("type", "doc")?;
                map.serialize_entry("id", &doc.id)?;
                if let Some(label) = &doc.label {
                    map.serialize_entry("label", label)?;
                }
                if let Some(class_name) = &doc.class_name {
                    map.serialize_entry("className", class_name)?;
                }
                map.end()
            }
            Self::Link(link) => {
                let mut map = serializer.serialize_map(None)?;
                map.serialize_entry("type", "link")?;
                map.serialize_entry("href", &link.href)?;
                map.serialize_entry("label", &link.label)?;
                map.end()
            }
            Self::Category(cat) => {
                let mut map = serializer.serialize_map(None)?;
                map.serialize_entry("type", "category")?;
                map.serialize_entry("label", &cat.label)?;
                // Always emitted: collapsed must round-trip unchanged.
                map.serialize_entry("collapsed", &cat.collapsed)?;
                if let Some(link) = &cat.link {
                    map.serialize_entry("link", link)?;
                }
                map.serialize_entry("items", &cat.items)?;
                map.end()
            }
        }
    }
}
