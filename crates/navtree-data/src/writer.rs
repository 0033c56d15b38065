//! Emitter for navigation data files.
//!
//! Reproduces the generator's textual layout exactly: two-space
//! indentation per tree depth, interior nodes opening `[ "label",
//! "link", [` with their `] ]` closer on its own line, single-line
//! leaves, index entries at column zero, and single-quoted tooltip
//! strings. Parsing a generator-produced file and emitting it again
//! yields the input byte for byte, which also means the output ends
//! without a trailing newline.

use std::fmt::Write as _;

use navtree_model::{NavTree, NavTreeData};

/// Render a document in the generator's layout.
#[must_use]
pub fn emit(data: &NavTreeData) -> String {
    let mut out = String::new();

    if let Some(license) = &data.license {
        out.push_str(license);
        out.push('\n');
    }

    out.push_str("var NAVTREE =\n[\n");
    write_siblings(&data.tree, data.tree.roots(), 1, &mut out);
    out.push_str("\n];\n");

    out.push_str("\nvar NAVTREEINDEX =\n[\n");
    for (i, entry) in data.index.entries().iter().enumerate() {
        if i > 0 {
            out.push_str(",\n");
        }
        push_quoted(&mut out, &entry.to_string(), '"');
    }
    out.push_str("\n];\n");

    out.push_str("\nvar SYNCONMSG = ");
    push_quoted(&mut out, &data.messages.sync_on, '\'');
    out.push_str(";\nvar SYNCOFFMSG = ");
    push_quoted(&mut out, &data.messages.sync_off, '\'');
    out.push(';');

    out
}

fn write_siblings(tree: &NavTree, indices: &[usize], depth: usize, out: &mut String) {
    for (i, &idx) in indices.iter().enumerate() {
        if i > 0 {
            out.push_str(",\n");
        }
        write_node(tree, idx, depth, out);
    }
}

fn write_node(tree: &NavTree, idx: usize, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    let node = &tree[idx];

    out.push_str(&indent);
    out.push_str("[ ");
    push_quoted(out, &node.label, '"');
    out.push_str(", ");
    match &node.link {
        Some(link) => push_quoted(out, link, '"'),
        None => out.push_str("null"),
    }
    out.push_str(", ");

    let children = tree.children_of(idx);
    if children.is_empty() {
        match &node.subtree_ref {
            Some(reference) => push_quoted(out, reference, '"'),
            None => out.push_str("null"),
        }
        out.push_str(" ]");
    } else {
        // A node with children has no subtree reference: the builder
        // rejects the combination and the parser's tuple grammar cannot
        // produce it
        out.push_str("[\n");
        write_siblings(tree, children, depth + 1, out);
        out.push('\n');
        out.push_str(&indent);
        out.push_str("] ]");
    }
}

/// Append a quoted string literal, escaping for the given quote style.
fn push_quoted(out: &mut String, s: &str, quote: char) {
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", u32::from(c));
            }
            c => out.push(c),
        }
    }
    out.push(quote);
}

#[cfg(test)]
mod tests {
    use navtree_model::{AnchorIndex, NavTreeBuilder};
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample_data() -> NavTreeData {
        let mut builder = NavTreeBuilder::new();
        let root = builder.add_node("Docs".to_owned(), Some("index.html".to_owned()), None);
        builder.add_subtree_ref(
            "Classes".to_owned(),
            Some("annotated.html".to_owned()),
            "annotated_dup".to_owned(),
            Some(root),
        );
        builder.add_node("Files".to_owned(), Some("files.html".to_owned()), Some(root));

        let mut index = AnchorIndex::new();
        index.push("annotated.html".parse().unwrap());
        index.push("files.html#a1b2".parse().unwrap());

        NavTreeData::new(builder.build(), index)
    }

    #[test]
    fn test_emit_generator_layout() {
        let rendered = emit(&sample_data());

        assert_eq!(
            rendered,
            "var NAVTREE =\n\
             [\n\
             \x20 [ \"Docs\", \"index.html\", [\n\
             \x20   [ \"Classes\", \"annotated.html\", \"annotated_dup\" ],\n\
             \x20   [ \"Files\", \"files.html\", null ]\n\
             \x20 ] ]\n\
             ];\n\
             \n\
             var NAVTREEINDEX =\n\
             [\n\
             \"annotated.html\",\n\
             \"files.html#a1b2\"\n\
             ];\n\
             \n\
             var SYNCONMSG = 'click to disable panel synchronisation';\n\
             var SYNCOFFMSG = 'click to enable panel synchronisation';"
        );
    }

    #[test]
    fn test_emit_preserves_subtree_references() {
        let data = sample_data();

        let rendered = emit(&data);

        for (_, _, node) in data.tree.walk() {
            if let Some(reference) = &node.subtree_ref {
                assert!(
                    rendered.contains(&format!("\"{reference}\"")),
                    "reference {reference} missing from output"
                );
            }
        }
    }

    #[test]
    fn test_emit_license_comes_first() {
        let mut data = sample_data();
        data.license = Some("/* MIT */".to_owned());

        let rendered = emit(&data);

        assert!(rendered.starts_with("/* MIT */\nvar NAVTREE =\n"));
    }

    #[test]
    fn test_emit_deep_nesting_indents_two_per_level() {
        let mut builder = NavTreeBuilder::new();
        let a = builder.add_node("A".to_owned(), None, None);
        let b = builder.add_node("B".to_owned(), None, Some(a));
        builder.add_node("C".to_owned(), None, Some(b));
        let data = NavTreeData::new(builder.build(), AnchorIndex::new());

        let rendered = emit(&data);

        assert!(rendered.contains("  [ \"A\", null, [\n"));
        assert!(rendered.contains("    [ \"B\", null, [\n"));
        assert!(rendered.contains("      [ \"C\", null, null ]\n"));
        assert!(rendered.contains("\n    ] ]\n  ] ]\n];\n"));
    }

    #[test]
    fn test_emit_escapes_double_quoted_strings() {
        let mut builder = NavTreeBuilder::new();
        builder.add_node("say \"hi\"\\now".to_owned(), None, None);
        let data = NavTreeData::new(builder.build(), AnchorIndex::new());

        let rendered = emit(&data);

        assert!(rendered.contains(r#"[ "say \"hi\"\\now", null, null ]"#));
    }

    #[test]
    fn test_emit_escapes_single_quoted_messages() {
        let mut data = sample_data();
        data.messages.sync_on = "don't".to_owned();

        let rendered = emit(&data);

        assert!(rendered.contains(r"var SYNCONMSG = 'don\'t';"));
    }

    #[test]
    fn test_emit_has_no_trailing_newline() {
        let rendered = emit(&sample_data());

        assert!(rendered.ends_with("';"));
    }
}
