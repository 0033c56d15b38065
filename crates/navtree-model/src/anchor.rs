//! Anchor references for the flat navigation index.
//!
//! Index entries locate a position in the documentation: either a whole
//! page (`classes.html`) or a fragment within one
//! (`functions.html#a1b2c3`). The index is an ordered list; viewers
//! rely on its order when splitting it into chunks, so order is
//! preserved through parsing and emission.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

static ANCHOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z0-9_.-]+\.html)(?:#([A-Za-z0-9_.-]+))?$").unwrap());

/// Error produced when parsing an anchor reference.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AnchorError {
    /// Entry is the empty string.
    #[error("anchor reference is empty")]
    Empty,
    /// Entry does not have the `<file>.html` or `<file>.html#<anchor>` form.
    #[error("invalid anchor reference: {0}")]
    Invalid(String),
}

/// Reference to a page or a fragment within a page.
///
/// The rendered form is `<file>.html` or `<file>.html#<anchor>`.
/// Ordering follows the rendered form: by file, then by anchor.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct AnchorRef {
    /// Target page file name, including the `.html` suffix.
    pub file: String,
    /// Fragment within the page, `None` for whole-page entries.
    pub anchor: Option<String>,
}

impl fmt::Display for AnchorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.anchor {
            Some(anchor) => write!(f, "{}#{anchor}", self.file),
            None => f.write_str(&self.file),
        }
    }
}

impl FromStr for AnchorRef {
    type Err = AnchorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(AnchorError::Empty);
        }
        let caps = ANCHOR_RE
            .captures(s)
            .ok_or_else(|| AnchorError::Invalid(s.to_owned()))?;

        Ok(Self {
            file: caps[1].to_owned(),
            anchor: caps.get(2).map(|m| m.as_str().to_owned()),
        })
    }
}

/// Ordered collection of index entries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnchorIndex {
    entries: Vec<AnchorRef>,
}

impl AnchorIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append an entry, keeping insertion order.
    pub fn push(&mut self, entry: AnchorRef) {
        self.entries.push(entry);
    }

    /// All entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[AnchorRef] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the index has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Position of the first entry that breaks ascending order.
    ///
    /// Returns `None` when the index is sorted.
    #[must_use]
    pub fn first_unsorted_at(&self) -> Option<usize> {
        self.entries
            .windows(2)
            .position(|pair| pair[0] > pair[1])
            .map(|i| i + 1)
    }

    /// True if entries are in ascending order.
    #[must_use]
    pub fn is_sorted(&self) -> bool {
        self.first_unsorted_at().is_none()
    }
}
