//! Site-level navigation assembly.
//!
//! This crate owns everything between configuration and output: scanning
//! the content tree for document ids, loading generator fragments, merging
//! them into the declared sidebars, validating the result, and shaping the
//! search feed. The data model itself lives in `navkit-tree`.

mod builder;
mod feed;
mod scanner;

pub use builder::{BuildError, BuiltNav, MergedFragment, build};
pub use feed::{SearchRecord, search_feed};
pub use scanner::scan_document_ids;

#[cfg(test)]
mod auto_traits {
    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(BuiltNav: Send, Sync, Clone);
    assert_impl_all!(BuildError: Send, Sync);
}
