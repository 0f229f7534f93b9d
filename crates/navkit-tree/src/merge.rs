//! Fragment splicing.
//!
//! Generated reference sub-trees are injected into the authored tree by an
//! explicit, pure merge rather than by file-system side effects, so the
//! merge is testable without running the real doc generator. The insertion
//! point is the category whose landing document id matches the fragment's
//! configured `insert_at`; labels are display-only and deliberately not
//! used for addressing.

use crate::error::TreeError;
use crate::node::NavNode;
use crate::tree::SidebarSet;

/// Where fragment nodes land relative to the category's existing items.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MergePosition {
    /// After the existing items (the default).
    #[default]
    Append,
    /// Before the existing items.
    Prepend,
}

/// Instructions for splicing one fragment.
#[derive(Debug)]
pub struct MergeSpec<'a> {
    /// Fragment source name, used only in error messages.
    pub fragment: &'a str,
    /// Landing document id of the insertion category.
    pub insert_at: &'a str,
    /// Append or prepend relative to existing items.
    pub position: MergePosition,
}

/// Splice `nodes` into the category addressed by `spec`.
///
/// Sibling order inside the insertion category is undisturbed: the fragment
/// lands as one contiguous run in its original order. The set is consumed
/// and returned so an error leaves no partially merged tree behind.
///
/// # Errors
///
/// Returns [`TreeError::InsertionPointNotFound`] if no category in any
/// sidebar carries a link equal to `spec.insert_at`.
pub fn merge(
    set: SidebarSet,
    nodes: Vec<NavNode>,
    spec: &MergeSpec<'_>,
) -> Result<SidebarSet, TreeError> {
    let mut entries = set.into_entries();

    let Some((sidebar_idx, path)) = entries
        .iter()
        .enumerate()
        .find_map(|(i, (_, roots))| insertion_path(roots, spec.insert_at).map(|p| (i, p)))
    else {
        return Err(TreeError::InsertionPointNotFound {
            insert_at: spec.insert_at.to_owned(),
            fragment: spec.fragment.to_owned(),
        });
    };

    let items = items_at(&mut entries[sidebar_idx].1, &path);
    match spec.position {
        MergePosition::Append => items.extend(nodes),
        MergePosition::Prepend => {
            items.splice(0..0, nodes);
        }
    }

    Ok(SidebarSet::from_checked_entries(entries))
}

/// Depth-first search for the first category whose link matches `insert_at`.
///
/// Returns the index path from the sidebar roots to that category.
fn insertion_path(nodes: &[NavNode], insert_at: &str) -> Option<Vec<usize>> {
    for (i, node) in nodes.iter().enumerate() {
        if let NavNode::Category(cat) = node {
            if cat.link.as_deref() == Some(insert_at) {
                return Some(vec![i]);
            }
            if let Some(mut rest) = insertion_path(&cat.items, insert_at) {
                rest.insert(0, i);
                return Some(rest);
            }
        }
    }
    None
}

/// Descend by index path to the target category's items.
///
/// The path comes from [`insertion_path`] over the same tree, so every step
/// lands on a category.
fn items_at<'a>(roots: &'a mut Vec<NavNode>, path: &[usize]) -> &'a mut Vec<NavNode> {
    let mut items = roots;
    for &idx in path {
        let NavNode::Category(cat) = &mut items[idx] else {
            unreachable!("insertion path steps through categories only");
        };
        items = &mut cat.items;
    }
    items
}
