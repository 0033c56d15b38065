//! Navigation tree data model for generated documentation sites.
//!
//! This crate provides:
//! - [`NavTree`]: the navigation hierarchy with source-order traversal
//! - [`AnchorIndex`]: the flat index of page and fragment references
//! - [`NavTreeData`]: a complete document with license header and tooltips
//! - [`validate`]: structural rule checking at configurable levels
//!
//! The file format reader and writer live in the `navtree-data` crate.
//!
//! # Example
//!
//! ```
//! use navtree_model::{AnchorIndex, NavTreeBuilder, NavTreeData};
//!
//! let mut builder = NavTreeBuilder::new();
//! let root = builder.add_node("Main Page".to_owned(), Some("index.html".to_owned()), None);
//! builder.add_node("Classes".to_owned(), Some("annotated.html".to_owned()), Some(root));
//!
//! let mut index = AnchorIndex::new();
//! index.push("index.html".parse()?);
//!
//! let data = NavTreeData::new(builder.build(), index);
//! assert_eq!(data.tree.len(), 2);
//! # Ok::<(), navtree_model::AnchorError>(())
//! ```

pub(crate) mod anchor;
pub(crate) mod doc;
pub(crate) mod lint;
pub(crate) mod tree;

pub use anchor::{AnchorError, AnchorIndex, AnchorRef};
pub use doc::{NavTreeData, SyncMessages};
pub use lint::{
    Diagnostic, LintConfig, LintLevel, LintRule, UnknownLintLevel, UnknownLintRule, validate,
};
pub use tree::{NavNode, NavTree, NavTreeBuilder, OutlineItem, Walk};
