//! Reader and writer for navigation data files.
//!
//! Documentation generators describe a site's navigation panel in a
//! JavaScript data file: a `NAVTREE` hierarchy of `[label, link,
//! children]` tuples, a flat `NAVTREEINDEX` of anchor references, and
//! two tooltip strings, preceded by a license header comment. This
//! crate parses that format into [`navtree_model::NavTreeData`] and
//! emits it back in the generator's exact layout, so a parse/emit
//! round trip of generator output is byte-identical.
//!
//! # Example
//!
//! ```
//! let input = "var NAVTREE = [ [ \"Docs\", \"index.html\", null ] ];\n\
//!              var NAVTREEINDEX = [\"index.html\"];";
//!
//! let parsed = navtree_data::parse(input)?;
//! assert_eq!(parsed.data.tree[0].label, "Docs");
//!
//! let rendered = navtree_data::emit(&parsed.data);
//! assert!(rendered.starts_with("var NAVTREE =\n"));
//! # Ok::<(), navtree_data::ParseError>(())
//! ```

pub(crate) mod error;
pub(crate) mod lexer;
pub(crate) mod parser;
pub(crate) mod writer;

use std::path::Path;

pub use error::{ParseError, ReadError};
pub use parser::{Parsed, parse};
pub use writer::emit;

use navtree_model::NavTreeData;

/// Read and parse a navigation data file.
///
/// # Errors
///
/// Returns [`ReadError`] when the file cannot be read or its content
/// fails to parse.
pub fn read_file(path: &Path) -> Result<Parsed, ReadError> {
    let content = std::fs::read_to_string(path).map_err(|source| ReadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse(&content)?)
}

/// Render a document and write it to a file.
///
/// # Errors
///
/// Returns the underlying I/O error when the file cannot be written.
pub fn write_file(path: &Path, data: &NavTreeData) -> std::io::Result<()> {
    std::fs::write(path, emit(data))
}
