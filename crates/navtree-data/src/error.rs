//! Error types for reading navigation data files.

use std::path::PathBuf;

use navtree_model::AnchorError;

/// Error produced while parsing a navigation data file.
///
/// All syntax errors carry 1-based line and column positions.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A character outside the accepted subset.
    #[error("line {line}, column {column}: unexpected character {found:?}")]
    UnexpectedChar {
        /// 1-based line of the character.
        line: u32,
        /// 1-based column of the character.
        column: u32,
        /// The offending character.
        found: char,
    },

    /// A string literal with no closing quote.
    #[error("line {line}, column {column}: unterminated string literal")]
    UnterminatedString {
        /// 1-based line where the literal starts.
        line: u32,
        /// 1-based column where the literal starts.
        column: u32,
    },

    /// A block comment with no closing `*/`.
    #[error("line {line}, column {column}: unterminated block comment")]
    UnterminatedComment {
        /// 1-based line where the comment starts.
        line: u32,
        /// 1-based column where the comment starts.
        column: u32,
    },

    /// An escape sequence the generator never emits.
    #[error("line {line}, column {column}: invalid escape sequence \\{found}")]
    InvalidEscape {
        /// 1-based line of the escape.
        line: u32,
        /// 1-based column of the escape.
        column: u32,
        /// Character following the backslash.
        found: char,
    },

    /// A token where a different one was required.
    #[error("line {line}, column {column}: expected {expected}, found {found}")]
    UnexpectedToken {
        /// 1-based line of the token.
        line: u32,
        /// 1-based column of the token.
        column: u32,
        /// What the grammar required.
        expected: &'static str,
        /// What was found instead.
        found: String,
    },

    /// Input ended mid-declaration.
    #[error("unexpected end of file, expected {expected}")]
    UnexpectedEnd {
        /// What the grammar required.
        expected: &'static str,
    },

    /// An entry that is not a `[label, link, children]` tuple.
    #[error("line {line}, column {column}: navigation entry must be a [label, link, children] tuple")]
    MalformedEntry {
        /// 1-based line of the entry.
        line: u32,
        /// 1-based column of the entry.
        column: u32,
    },

    /// An empty array in the children slot. Leaves are written as `null`
    /// or a subtree reference, never as `[]`.
    #[error("line {line}, column {column}: empty children list; leaves use null or a subtree reference")]
    EmptyChildren {
        /// 1-based line of the list.
        line: u32,
        /// 1-based column of the list.
        column: u32,
    },

    /// A required top-level declaration is absent.
    #[error("missing declaration: {0}")]
    MissingDeclaration(&'static str),

    /// A known declaration bound to a value of the wrong type.
    #[error("line {line}, column {column}: {name} must be {expected}")]
    WrongType {
        /// 1-based line of the value.
        line: u32,
        /// 1-based column of the value.
        column: u32,
        /// Declaration name.
        name: String,
        /// Type the declaration requires.
        expected: &'static str,
    },

    /// An index entry that is not a valid anchor reference.
    #[error("line {line}, column {column}: {source}")]
    InvalidAnchor {
        /// 1-based line of the entry.
        line: u32,
        /// 1-based column of the entry.
        column: u32,
        /// Underlying anchor parse error.
        #[source]
        source: AnchorError,
    },
}

/// Error produced when reading a navigation data file from disk.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    /// File could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// File content failed to parse.
    #[error("{0}")]
    Parse(#[from] ParseError),
}
