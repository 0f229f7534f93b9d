//! OpenAPI doc-generator fragment support for navkit.
//!
//! The doc generator consumes the OpenAPI document and emits one reference
//! page per operation plus a JSON navigation artifact. This crate loads
//! that artifact into [`Fragment`] values and derives the stable document
//! ids - keyed on (HTTP method, path, tag) - that keep hand-authored
//! references into the generated tree from breaking across regenerations.

mod fragment;
mod id;

pub use fragment::{Fragment, FragmentError};
pub use id::{operation_id, slug};
