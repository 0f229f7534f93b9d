//! Search-index feed.
//!
//! The search collaborator ranks page titles by nesting depth; this module
//! turns the flattened tree into one record per document reference with a
//! depth-derived weight attached.

use serde::Serialize;

use navkit_tree::{FlatEntry, NavNode};

/// One document entry in the search feed.
#[derive(Debug, PartialEq, Serialize)]
pub struct SearchRecord {
    /// Document id.
    pub id: String,
    /// Label override, if the sidebar carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Sidebar the document appears in.
    pub sidebar: String,
    /// Ancestor category labels, outermost first.
    pub breadcrumbs: Vec<String>,
    /// Nesting depth.
    pub depth: usize,
    /// Ranking weight; shallower entries rank higher.
    pub weight: f64,
}

/// Depth-derived ranking weight.
#[allow(clippy::cast_precision_loss)]
fn weight_for_depth(depth: usize) -> f64 {
    1.0 / (1.0 + depth as f64)
}

/// Build the search feed from a flattened tree.
///
/// Only document references produce records: categories and links have no
/// page of their own to index. Order follows the flattened walk, so the
/// feed is deterministic for a given tree.
#[must_use]
pub fn search_feed(entries: &[FlatEntry<'_>]) -> Vec<SearchRecord> {
    entries
        .iter()
        .filter_map(|entry| {
            let NavNode::Doc(doc) = entry.node else {
                return None;
            };
            Some(SearchRecord {
                id: doc.id.clone(),
                label: doc.label.clone(),
                sidebar: entry.sidebar.to_owned(),
                breadcrumbs: entry.breadcrumbs.iter().map(|s| (*s).to_owned()).collect(),
                depth: entry.depth(),
                weight: weight_for_depth(entry.depth()),
            })
        })
        .collect()
}
