//! Assembled navigation documents.

use crate::anchor::AnchorIndex;
use crate::tree::NavTree;

/// Tooltip strings for the navigation panel synchronization toggle.
///
/// Defaults match the strings the generator ships.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyncMessages {
    /// Tooltip shown while panel synchronization is enabled.
    pub sync_on: String,
    /// Tooltip shown while panel synchronization is disabled.
    pub sync_off: String,
}

impl Default for SyncMessages {
    fn default() -> Self {
        Self {
            sync_on: "click to disable panel synchronisation".to_owned(),
            sync_off: "click to enable panel synchronisation".to_owned(),
        }
    }
}

/// A complete navigation data document.
///
/// Holds everything a navigation data file carries: the hierarchy, the
/// flat anchor index, the synchronization tooltips, and the license
/// header comment when one is present.
#[derive(Debug)]
pub struct NavTreeData {
    /// License comment block kept verbatim, `None` when absent.
    pub license: Option<String>,
    /// Navigation hierarchy.
    pub tree: NavTree,
    /// Flat anchor index in file order.
    pub index: AnchorIndex,
    /// Panel synchronization tooltips.
    pub messages: SyncMessages,
}

impl NavTreeData {
    /// Create a document with default tooltips and no license header.
    #[must_use]
    pub fn new(tree: NavTree, index: AnchorIndex) -> Self {
        Self {
            license: None,
            tree,
            index,
            messages: SyncMessages::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::tree::NavTreeBuilder;

    use super::*;

    #[test]
    fn test_sync_messages_defaults() {
        let messages = SyncMessages::default();

        assert_eq!(messages.sync_on, "click to disable panel synchronisation");
        assert_eq!(messages.sync_off, "click to enable panel synchronisation");
    }

    #[test]
    fn test_new_uses_defaults() {
        let mut builder = NavTreeBuilder::new();
        builder.add_node("Docs".to_owned(), Some("index.html".to_owned()), None);

        let data = NavTreeData::new(builder.build(), AnchorIndex::new());

        assert_eq!(data.license, None);
        assert_eq!(data.messages, SyncMessages::default());
        assert_eq!(data.tree.len(), 1);
        assert!(data.index.is_empty());
    }
}
