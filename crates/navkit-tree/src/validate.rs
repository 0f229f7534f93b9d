//! Referential integrity checks.
//!
//! Validation is a pure pass over an assembled [`SidebarSet`]: no mutation,
//! no I/O, same input always yields the same report. It runs inside every
//! build and standalone via `navkit check`, so authors can lint navigation
//! changes without a full site build.

use std::collections::BTreeSet;

use crate::error::ValidationError;
use crate::node::NavNode;
use crate::tree::SidebarSet;

/// The set of document ids that exist at build time.
///
/// Built from the scanned docs source tree plus the ids emitted by fragment
/// generators. Generated ids are prefixed with their fragment source name,
/// so the two namespaces cannot collide and a single set is sound.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DocumentIds(BTreeSet<String>);

impl DocumentIds {
    /// Empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a document id.
    pub fn insert(&mut self, id: impl Into<String>) {
        self.0.insert(id.into());
    }

    /// Register many document ids.
    pub fn extend<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0.extend(ids.into_iter().map(Into::into));
    }

    /// Whether an id resolves to a known document.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    /// Number of known documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if no documents are known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate ids in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for DocumentIds {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Check every document reference in the set against the known documents.
///
/// Returns one [`ValidationError::DanglingDoc`] per unresolved id, each
/// carrying the sidebar path at which it occurs. An empty report means the
/// tree is safe to hand to the renderer. `Link` nodes are never checked;
/// they point outside the document set by definition.
#[must_use]
pub fn validate(set: &SidebarSet, known: &DocumentIds) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (key, nodes) in set.iter() {
        let mut path = vec![key];
        validate_nodes(nodes, known, &mut path, &mut errors);
    }
    errors
}

/// Check navbar sidebar references against the set's keys.
///
/// A dangling reference here is the historical failure mode this model
/// exists to catch: the navbar names a sidebar that was renamed or removed.
#[must_use]
pub fn validate_navbar_refs(set: &SidebarSet, refs: &[String]) -> Vec<ValidationError> {
    refs.iter()
        .filter(|key| !set.contains_key(key))
        .map(|key| ValidationError::UnknownSidebar { key: key.clone() })
        .collect()
}

fn validate_nodes<'a>(
    nodes: &'a [NavNode],
    known: &DocumentIds,
    path: &mut Vec<&'a str>,
    errors: &mut Vec<ValidationError>,
) {
    for node in nodes {
        match node {
            NavNode::Doc(doc) => {
                if !known.contains(&doc.id) {
                    errors.push(ValidationError::DanglingDoc {
                        id: doc.id.clone(),
                        path: path.join(" > "),
                    });
                }
            }
            NavNode::Link(_) => {}
            NavNode::Category(cat) => {
                // The landing doc is a reference like any other.
                if let Some(link) = &cat.link
                    && !known.contains(link)
                {
                    errors.push(ValidationError::DanglingDoc {
                        id: link.clone(),
                        path: path.join(" > "),
                    });
                }
                path.push(&cat.label);
                validate_nodes(&cat.items, known, path, errors);
                path.pop();
            }
        }
    }
}
