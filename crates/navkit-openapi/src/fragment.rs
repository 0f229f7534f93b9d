//! Generated fragment loading.
//!
//! The OpenAPI doc generator runs as a prior build step and leaves one JSON
//! artifact per configured source. This module reads that artifact - never
//! the OpenAPI document itself - and turns it into navigation nodes plus
//! the set of generated document ids.
//!
//! # Artifact format
//!
//! ```json
//! {
//!   "source": "api-reference",
//!   "title": "DeFi Aggregator API",
//!   "entries": [
//!     { "kind": "doc", "id": "api-reference/overview", "label": "Overview" },
//!     { "kind": "operation", "method": "GET", "path": "/v1/positions/{address}",
//!       "tag": "Lending", "summary": "Retrieve aggregated lending positions." }
//!   ]
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use navkit_tree::{Category, DocRef, NavNode};

use crate::id::operation_id;

/// Error loading a generator artifact.
#[derive(Debug, thiserror::Error)]
pub enum FragmentError {
    /// The artifact file could not be read.
    #[error("cannot read fragment artifact {}: {source}", .path.display())]
    Io {
        /// Artifact path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The artifact is not valid JSON for the expected shape. The upstream
    /// generator failed; its error is surfaced unchanged, not reinterpreted.
    #[error("malformed fragment artifact: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// One entry in the generator artifact.
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum ArtifactEntry {
    /// A pre-built reference page (e.g., the spec's info/landing page).
    Doc {
        id: String,
        #[serde(default)]
        label: Option<String>,
    },
    /// One API operation; becomes a leaf under its tag's category.
    Operation {
        method: String,
        path: String,
        tag: String,
        #[serde(default)]
        summary: Option<String>,
    },
}

/// Raw artifact shape.
#[derive(Debug, Deserialize)]
struct Artifact {
    source: String,
    #[serde(default)]
    title: Option<String>,
    entries: Vec<ArtifactEntry>,
}

/// A navigation sub-tree produced from an API contract document.
///
/// Immutable once loaded: the build pipeline merges `nodes` into the static
/// tree and unions `doc_ids` into the known document set.
#[derive(Debug)]
pub struct Fragment {
    source: String,
    title: Option<String>,
    nodes: Vec<NavNode>,
    doc_ids: Vec<String>,
}

impl Fragment {
    /// Parse an artifact from JSON text.
    ///
    /// Operations are grouped into one category per tag, expanded by
    /// default; group order is the order of each tag's first appearance,
    /// and operations keep their artifact order within the group. Non-
    /// operation docs stay at their position between groups.
    ///
    /// # Errors
    ///
    /// Returns [`FragmentError::Malformed`] for any shape mismatch.
    pub fn from_json(json: &str) -> Result<Self, FragmentError> {
        let artifact: Artifact = serde_json::from_str(json)?;
        Ok(Self::from_artifact(artifact))
    }

    /// Read and parse an artifact file.
    ///
    /// # Errors
    ///
    /// Returns [`FragmentError::Io`] if the file cannot be read and
    /// [`FragmentError::Malformed`] if it cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, FragmentError> {
        let json = std::fs::read_to_string(path).map_err(|source| FragmentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    fn from_artifact(artifact: Artifact) -> Self {
        let source = artifact.source;
        let mut nodes: Vec<NavNode> = Vec::new();
        let mut doc_ids = Vec::new();
        // Tag label -> index of its category in `nodes`.
        let mut group_index: Vec<(String, usize)> = Vec::new();

        for entry in artifact.entries {
            match entry {
                ArtifactEntry::Doc { id, label } => {
                    doc_ids.push(id.clone());
                    nodes.push(NavNode::Doc(DocRef {
                        id,
                        label,
                        class_name: None,
                    }));
                }
                ArtifactEntry::Operation {
                    method,
                    path,
                    tag,
                    summary,
                } => {
                    let id = operation_id(&source, &method, &path, &tag);
                    doc_ids.push(id.clone());

                    let method_upper = method.to_ascii_uppercase();
                    let leaf = NavNode::Doc(DocRef {
                        id,
                        label: Some(
                            summary.unwrap_or_else(|| format!("{method_upper} {path}")),
                        ),
                        class_name: Some(format!(
                            "api-method {}",
                            method.to_ascii_lowercase()
                        )),
                    });

                    let idx = match group_index.iter().find(|(t, _)| *t == tag) {
                        Some(&(_, idx)) => idx,
                        None => {
                            nodes.push(NavNode::Category(Category::new(tag.clone(), vec![]).expanded()));
                            let idx = nodes.len() - 1;
                            group_index.push((tag, idx));
                            idx
                        }
                    };
                    let NavNode::Category(group) = &mut nodes[idx] else {
                        unreachable!("group index points at categories only");
                    };
                    group.items.push(leaf);
                }
            }
        }

        Self {
            source,
            title: artifact.title,
            nodes,
            doc_ids,
        }
    }

    /// Fragment source name (the generator configuration key).
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Spec title, if the generator recorded one.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Navigation nodes in merge order.
    #[must_use]
    pub fn nodes(&self) -> &[NavNode] {
        &self.nodes
    }

    /// Generated document ids, in artifact order.
    #[must_use]
    pub fn doc_ids(&self) -> &[String] {
        &self.doc_ids
    }

    /// Consume the fragment, yielding its nodes for merging.
    #[must_use]
    pub fn into_nodes(self) -> Vec<NavNode> {
        self.nodes
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const SAMPLE: &str = r#"{
        "source": "api-reference",
        "title": "DeFi Aggregator API",
        "entries": [
            { "kind": "doc", "id": "api-reference/overview", "label": "API Overview" },
            { "kind": "operation", "method": "GET", "path": "/v1/positions/{address}",
              "tag": "Lending", "summary": "Retrieve aggregated lending positions." },
            { "kind": "operation", "method": "GET", "path": "/v1/health",
              "tag": "Meta" },
            { "kind": "operation", "method": "POST", "path": "/v1/risk-profile",
              "tag": "Lending", "summary": "Compute a risk profile." }
        ]
    }"#;

    #[test]
    fn test_groups_operations_by_tag() {
        let fragment = Fragment::from_json(SAMPLE).unwrap();

        assert_eq!(fragment.source(), "api-reference");
        assert_eq!(fragment.title(), Some("DeFi Aggregator API"));

        let nodes = fragment.nodes();
        assert_eq!(nodes.len(), 3); // overview doc, Lending group, Meta group

        let NavNode::Doc(overview) = &nodes[0] else {
            panic!("expected doc node");
        };
        assert_eq!(overview.id, "api-reference/overview");
        assert_eq!(overview.label.as_deref(), Some("API Overview"));

        let NavNode::Category(lending) = &nodes[1] else {
            panic!("expected Lending category");
        };
        assert_eq!(lending.label, "Lending");
        assert!(!lending.collapsed);
        assert_eq!(lending.items.len(), 2);

        let NavNode::Category(meta) = &nodes[2] else {
            panic!("expected Meta category");
        };
        assert_eq!(meta.label, "Meta");
        assert_eq!(meta.items.len(), 1);
    }

    #[test]
    fn test_operation_leaf_shape() {
        let fragment = Fragment::from_json(SAMPLE).unwrap();
        let NavNode::Category(lending) = &fragment.nodes()[1] else {
            panic!("expected category");
        };
        let NavNode::Doc(leaf) = &lending.items[0] else {
            panic!("expected doc leaf");
        };

        assert_eq!(leaf.id, "api-reference/lending/get-v1-positions-address");
        assert_eq!(
            leaf.label.as_deref(),
            Some("Retrieve aggregated lending positions.")
        );
        assert_eq!(leaf.class_name.as_deref(), Some("api-method get"));
    }

    #[test]
    fn test_missing_summary_falls_back_to_method_and_path() {
        let fragment = Fragment::from_json(SAMPLE).unwrap();
        let NavNode::Category(meta) = &fragment.nodes()[2] else {
            panic!("expected category");
        };
        let NavNode::Doc(leaf) = &meta.items[0] else {
            panic!("expected doc leaf");
        };
        assert_eq!(leaf.label.as_deref(), Some("GET /v1/health"));
    }

    #[test]
    fn test_doc_ids_in_artifact_order() {
        let fragment = Fragment::from_json(SAMPLE).unwrap();
        assert_eq!(
            fragment.doc_ids(),
            &[
                "api-reference/overview".to_owned(),
                "api-reference/lending/get-v1-positions-address".to_owned(),
                "api-reference/meta/get-v1-health".to_owned(),
                "api-reference/lending/post-v1-risk-profile".to_owned(),
            ]
        );
    }

    #[test]
    fn test_ids_stable_across_reloads() {
        let first = Fragment::from_json(SAMPLE).unwrap();
        let second = Fragment::from_json(SAMPLE).unwrap();
        assert_eq!(first.doc_ids(), second.doc_ids());
    }

    #[test]
    fn test_malformed_artifact() {
        let err = Fragment::from_json("{\"entries\": 42}").unwrap_err();
        assert!(matches!(err, FragmentError::Malformed(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Fragment::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, FragmentError::Io { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("api-reference.json");
        std::fs::write(&path, SAMPLE).unwrap();

        let fragment = Fragment::load(&path).unwrap();
        assert_eq!(fragment.source(), "api-reference");
        assert_eq!(fragment.nodes().len(), 3);
    }

    #[test]
    fn test_empty_entries() {
        let fragment =
            Fragment::from_json(r#"{ "source": "api-reference", "entries": [] }"#).unwrap();
        assert!(fragment.nodes().is_empty());
        assert!(fragment.doc_ids().is_empty());
    }
}
