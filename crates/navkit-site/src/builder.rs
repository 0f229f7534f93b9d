//! Navigation build pipeline.
//!
//! Ties the pieces together: parse the sidebar declaration, merge generated
//! fragments into it, scan the content tree for document ids, and validate
//! the result. The whole pipeline is one-shot and synchronous; a build
//! either produces a [`BuiltNav`] or fails with the first fatal error.

use std::fs;
use std::io;
use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, info};

use navkit_config::{Config, FragmentPosition};
use navkit_openapi::{Fragment, FragmentError};
use navkit_tree::{
    DocumentIds, FlatEntry, MergePosition, MergeSpec, SidebarSet, TreeError, ValidationError,
    flatten, merge, validate, validate_navbar_refs,
};

use crate::scanner::scan_document_ids;

/// Fatal build failure.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The sidebar declaration file could not be read.
    #[error("failed to read sidebar declaration {path}")]
    ReadSidebars {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The sidebar declaration could not be parsed, or a merge failed.
    #[error(transparent)]
    Tree(#[from] TreeError),

    /// A fragment artifact could not be loaded.
    #[error("failed to load fragment '{name}'")]
    Fragment {
        name: String,
        #[source]
        source: FragmentError,
    },

    /// The merged tree did not validate. Carries the full report so the
    /// caller can print every offending reference, not just the first.
    #[error("navigation validation failed with {} error(s)", .0.len())]
    Validation(Vec<ValidationError>),
}

/// Summary of one merged fragment, for build reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergedFragment {
    /// Fragment source name.
    pub name: String,
    /// Title carried by the generator artifact (the spec's title).
    pub title: Option<String>,
    /// Number of generated document ids the fragment contributed.
    pub documents: usize,
}

/// A fully built and validated navigation tree.
#[derive(Debug, Clone, Serialize)]
pub struct BuiltNav {
    /// The merged sidebar set.
    pub sidebars: SidebarSet,
    /// Every document id the build knew about, scanned and generated.
    #[serde(skip)]
    pub known_ids: DocumentIds,
    /// Fragments merged into the set, in merge order.
    pub fragments: Vec<MergedFragment>,
}

impl BuiltNav {
    /// Flattened view of the tree, declaration order preserved.
    #[must_use]
    pub fn flatten(&self) -> Vec<FlatEntry<'_>> {
        flatten(&self.sidebars)
    }
}

fn merge_position(position: FragmentPosition) -> MergePosition {
    match position {
        FragmentPosition::Append => MergePosition::Append,
        FragmentPosition::Prepend => MergePosition::Prepend,
    }
}

/// Run the full build pipeline for a resolved configuration.
///
/// Fragments are merged in declaration order; a fragment whose insertion
/// point does not exist fails the build before any output is produced.
/// Validation runs last, against the union of scanned and generated ids,
/// and reports every dangling reference at once.
pub fn build(config: &Config) -> Result<BuiltNav, BuildError> {
    let sidebars_path = &config.docs_resolved.sidebars_path;
    let source =
        fs::read_to_string(sidebars_path).map_err(|source| BuildError::ReadSidebars {
            path: sidebars_path.clone(),
            source,
        })?;
    let mut sidebars = SidebarSet::from_yaml(&source)?;
    debug!(
        sidebars = sidebars.len(),
        path = %sidebars_path.display(),
        "parsed sidebar declaration"
    );

    let mut known_ids = scan_document_ids(&config.docs_resolved.source_dir);
    debug!(documents = known_ids.len(), "scanned content tree");

    let mut fragments = Vec::with_capacity(config.fragments_resolved.len());
    for fragment_config in &config.fragments_resolved {
        let fragment =
            Fragment::load(&fragment_config.artifact).map_err(|source| BuildError::Fragment {
                name: fragment_config.name.clone(),
                source,
            })?;
        known_ids.extend(fragment.doc_ids().iter().cloned());
        fragments.push(MergedFragment {
            name: fragment_config.name.clone(),
            title: fragment.title().map(ToOwned::to_owned),
            documents: fragment.doc_ids().len(),
        });

        let spec = MergeSpec {
            fragment: &fragment_config.name,
            insert_at: &fragment_config.insert_at,
            position: merge_position(fragment_config.position),
        };
        sidebars = merge(sidebars, fragment.into_nodes(), &spec)?;
        info!(
            fragment = %fragment_config.name,
            insert_at = %fragment_config.insert_at,
            "merged fragment"
        );
    }

    let mut errors = validate(&sidebars, &known_ids);
    errors.extend(validate_navbar_refs(&sidebars, &config.navbar_sidebar_refs()));
    if !errors.is_empty() {
        return Err(BuildError::Validation(errors));
    }

    info!(
        sidebars = sidebars.len(),
        nodes = sidebars.node_count(),
        "navigation built"
    );
    Ok(BuiltNav {
        sidebars,
        known_ids,
        fragments,
    })
}
