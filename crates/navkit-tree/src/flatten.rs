//! Depth-first flattening with breadcrumb paths.
//!
//! The flattened view feeds two consumers: breadcrumb rendering and the
//! search-index builder, which weights page titles by nesting depth. The
//! walk is depth-first and order-preserving, and visits every node exactly
//! once, categories included.

use serde::Serialize;

use crate::node::NavNode;
use crate::tree::SidebarSet;

/// One visited node with its position in the tree.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct FlatEntry<'a> {
    /// Sidebar the node belongs to.
    pub sidebar: &'a str,
    /// Ancestor category labels, outermost first. Empty for root items.
    pub breadcrumbs: Vec<&'a str>,
    /// The node itself.
    pub node: &'a NavNode,
}

impl FlatEntry<'_> {
    /// Nesting depth: number of ancestor categories.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.breadcrumbs.len()
    }

    /// Breadcrumb path as a single `" > "`-joined string.
    #[must_use]
    pub fn breadcrumb_path(&self) -> String {
        self.breadcrumbs.join(" > ")
    }
}

/// Flatten every sidebar into a single ordered sequence.
///
/// Sidebars appear in declaration order; within a sidebar the order is the
/// rendered order.
#[must_use]
pub fn flatten(set: &SidebarSet) -> Vec<FlatEntry<'_>> {
    let mut entries = Vec::with_capacity(set.node_count());
    for (sidebar, nodes) in set.iter() {
        let mut breadcrumbs = Vec::new();
        walk(sidebar, nodes, &mut breadcrumbs, &mut entries);
    }
    entries
}

fn walk<'a>(
    sidebar: &'a str,
    nodes: &'a [NavNode],
    breadcrumbs: &mut Vec<&'a str>,
    entries: &mut Vec<FlatEntry<'a>>,
) {
    for node in nodes {
        entries.push(FlatEntry {
            sidebar,
            breadcrumbs: breadcrumbs.clone(),
            node,
        });
        if let NavNode::Category(cat) = node {
            breadcrumbs.push(&cat.label);
            walk(sidebar, &cat.items, breadcrumbs, entries);
            breadcrumbs.pop();
        }
    }
}
