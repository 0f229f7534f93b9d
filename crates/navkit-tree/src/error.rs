//! Tree construction error types.

use thiserror::Error;

/// Fatal error raised while assembling a sidebar set.
///
/// All variants abort the build; there is no partial tree to recover.
#[derive(Debug, Error)]
pub enum TreeError {
    /// Two top-level sidebars share a key.
    #[error("duplicate sidebar key: {key:?}")]
    DuplicateSidebarKey {
        /// The repeated key.
        key: String,
    },

    /// A generated fragment's configured insertion category does not exist.
    #[error("insertion point {insert_at:?} for fragment {fragment:?} not found in any sidebar")]
    InsertionPointNotFound {
        /// The landing document id the fragment was configured to splice at.
        insert_at: String,
        /// Fragment source name, for the error message only.
        fragment: String,
    },

    /// The sidebar definition file is not valid YAML.
    #[error("sidebar parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// A referential integrity failure found by [`validate`](crate::validate).
///
/// Validation collects every failure instead of stopping at the first so a
/// single check run reports the whole damage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A document reference has no matching content document.
    #[error("dangling document id {id:?} at {path}")]
    DanglingDoc {
        /// The unresolved document id.
        id: String,
        /// Sidebar key plus ancestor category labels, `" > "`-joined.
        path: String,
    },

    /// A navbar item references a sidebar key that does not exist.
    #[error("navbar references unknown sidebar {key:?}")]
    UnknownSidebar {
        /// The missing sidebar key.
        key: String,
    },
}
