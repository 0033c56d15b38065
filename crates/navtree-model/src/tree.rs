//! Navigation tree storage.
//!
//! The navigation hierarchy of a generated documentation site: labeled
//! entries pointing at pages, nested to arbitrary depth, with some
//! entries delegating their subtree to an external data file.
//!
//! # Architecture
//!
//! Nodes are stored in a flat `Vec<NavNode>` with parent/children
//! relationships tracked by indices. This provides:
//! - O(1) node access by index
//! - O(1) link lookups via a precomputed index
//! - Source-order traversal without recursion
//!
//! Trees are built once via [`NavTreeBuilder`] and immutable afterwards;
//! node indices are assigned in source order and stay stable for the
//! lifetime of the tree.

use std::collections::HashMap;
use std::ops::Index;

use serde::Serialize;

/// One entry in the navigation hierarchy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavNode {
    /// Display label.
    pub label: String,
    /// Link target page (e.g. "index.html"), `None` for entries without
    /// a page of their own.
    pub link: Option<String>,
    /// Stem of the external data file holding this entry's subtree
    /// (e.g. "annotated_dup"). Mutually exclusive with in-tree children.
    pub subtree_ref: Option<String>,
}

/// Nested navigation view for JSON export.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OutlineItem {
    /// Display label.
    pub label: String,
    /// Link target page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// External subtree reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtree_ref: Option<String>,
    /// Child items in source order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<OutlineItem>,
}

/// Navigation hierarchy with efficient link lookups.
#[derive(Debug)]
pub struct NavTree {
    nodes: Vec<NavNode>,
    children: Vec<Vec<usize>>,
    parents: Vec<Option<usize>>,
    roots: Vec<usize>,
    link_index: HashMap<String, Vec<usize>>,
}

impl NavTree {
    /// Create a new tree from builder components.
    fn new(
        nodes: Vec<NavNode>,
        children: Vec<Vec<usize>>,
        parents: Vec<Option<usize>>,
        roots: Vec<usize>,
    ) -> Self {
        let mut link_index: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, node) in nodes.iter().enumerate() {
            if let Some(link) = &node.link {
                link_index.entry(link.clone()).or_default().push(i);
            }
        }

        Self {
            nodes,
            children,
            parents,
            roots,
            link_index,
        }
    }

    /// Number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if the tree has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get a node by index.
    #[must_use]
    pub fn get(&self, idx: usize) -> Option<&NavNode> {
        self.nodes.get(idx)
    }

    /// Indices of the top-level entries in source order.
    #[must_use]
    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    /// Child indices of a node in source order.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is out of bounds.
    #[must_use]
    pub fn children_of(&self, idx: usize) -> &[usize] {
        &self.children[idx]
    }

    /// Parent index of a node, `None` for top-level entries.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is out of bounds.
    #[must_use]
    pub fn parent_of(&self, idx: usize) -> Option<usize> {
        self.parents[idx]
    }

    /// Indices of all nodes linking to the given page, in source order.
    ///
    /// This answers the viewer's synchronization query: which tree rows
    /// correspond to the page currently displayed.
    #[must_use]
    pub fn nodes_linking_to(&self, link: &str) -> &[usize] {
        self.link_index.get(link).map_or(&[], Vec::as_slice)
    }

    /// Depth-first traversal in source order.
    ///
    /// Yields `(depth, index, node)` with parents before children and
    /// siblings in insertion order. Top-level entries have depth 0.
    pub fn walk(&self) -> Walk<'_> {
        let stack = self.roots.iter().rev().map(|&idx| (idx, 0)).collect();
        Walk { tree: self, stack }
    }

    /// Build the nested outline view of the whole tree.
    #[must_use]
    pub fn to_outline(&self) -> Vec<OutlineItem> {
        self.roots.iter().map(|&idx| self.outline_item(idx)).collect()
    }

    fn outline_item(&self, idx: usize) -> OutlineItem {
        let node = &self.nodes[idx];
        OutlineItem {
            label: node.label.clone(),
            link: node.link.clone(),
            subtree_ref: node.subtree_ref.clone(),
            children: self.children[idx]
                .iter()
                .map(|&child| self.outline_item(child))
                .collect(),
        }
    }
}

impl Index<usize> for NavTree {
    type Output = NavNode;

    fn index(&self, idx: usize) -> &NavNode {
        &self.nodes[idx]
    }
}

/// Iterator over a [`NavTree`] in depth-first source order.
///
/// Created by [`NavTree::walk`].
pub struct Walk<'a> {
    tree: &'a NavTree,
    // (node index, depth), top of stack is visited next
    stack: Vec<(usize, usize)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, usize, &'a NavNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (idx, depth) = self.stack.pop()?;
        // Children pushed in reverse so the first child is popped first
        for &child in self.tree.children[idx].iter().rev() {
            self.stack.push((child, depth + 1));
        }
        Some((depth, idx, &self.tree.nodes[idx]))
    }
}

/// Builder for constructing [`NavTree`] instances.
pub struct NavTreeBuilder {
    nodes: Vec<NavNode>,
    children: Vec<Vec<usize>>,
    parents: Vec<Option<usize>>,
    roots: Vec<usize>,
}

impl NavTreeBuilder {
    /// Create a new tree builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            children: Vec::new(),
            parents: Vec::new(),
            roots: Vec::new(),
        }
    }

    /// Add a node to the tree.
    ///
    /// # Arguments
    ///
    /// * `label` - Display label
    /// * `link` - Link target page, `None` for entries without a page
    /// * `parent` - Index of the parent node, `None` for top-level entries
    ///
    /// # Returns
    ///
    /// Index of the added node.
    ///
    /// # Panics
    ///
    /// Panics if `parent` is not an index returned by a previous call,
    /// or if the parent delegates its subtree to an external data file.
    pub fn add_node(
        &mut self,
        label: String,
        link: Option<String>,
        parent: Option<usize>,
    ) -> usize {
        self.push(
            NavNode {
                label,
                link,
                subtree_ref: None,
            },
            parent,
        )
    }

    /// Add a node whose subtree lives in an external data file.
    ///
    /// # Arguments
    ///
    /// * `label` - Display label
    /// * `link` - Link target page, `None` for entries without a page
    /// * `reference` - Stem of the external data file (e.g. "annotated_dup")
    /// * `parent` - Index of the parent node, `None` for top-level entries
    ///
    /// # Returns
    ///
    /// Index of the added node.
    ///
    /// # Panics
    ///
    /// Panics if `parent` is not an index returned by a previous call,
    /// or if the parent delegates its subtree to an external data file.
    pub fn add_subtree_ref(
        &mut self,
        label: String,
        link: Option<String>,
        reference: String,
        parent: Option<usize>,
    ) -> usize {
        self.push(
            NavNode {
                label,
                link,
                subtree_ref: Some(reference),
            },
            parent,
        )
    }

    fn push(&mut self, node: NavNode, parent: Option<usize>) -> usize {
        let idx = self.nodes.len();

        if let Some(parent) = parent {
            // A node holds its children in-file or in an external data
            // file, never both
            assert!(
                self.nodes[parent].subtree_ref.is_none(),
                "node {parent} delegates its subtree to an external data file"
            );
        }

        self.nodes.push(node);
        self.children.push(Vec::new());
        self.parents.push(parent);

        if let Some(parent) = parent {
            self.children[parent].push(idx);
        } else {
            self.roots.push(idx);
        }

        idx
    }

    /// Build the [`NavTree`] instance.
    #[must_use]
    pub fn build(self) -> NavTree {
        NavTree::new(self.nodes, self.children, self.parents, self.roots)
    }
}

impl Default for NavTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
