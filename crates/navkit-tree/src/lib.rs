//! Navigation tree model for navkit.
//!
//! The tree is pure, declarative data: a [`SidebarSet`] maps sidebar keys to
//! ordered sequences of [`NavNode`] values, with no behavior attached to
//! nodes. That keeps the three operations the build pipeline needs -
//! [`merge`] (splice a generated fragment), [`validate`] (referential
//! integrity against the known document set), and [`flatten`] (depth-first
//! breadcrumb walk) - independently testable without any rendering.
//!
//! Construction is one-shot per site build: parse, merge, validate, freeze.
//! Nothing mutates a built set afterwards; a rebuild starts from scratch.

mod error;
mod flatten;
mod merge;
mod node;
mod tree;
mod validate;

pub use error::{TreeError, ValidationError};
pub use flatten::{FlatEntry, flatten};
pub use merge::{MergePosition, MergeSpec, merge};
pub use node::{Category, DocRef, LinkNode, NavNode};
pub use tree::SidebarSet;
pub use validate::{DocumentIds, validate, validate_navbar_refs};
