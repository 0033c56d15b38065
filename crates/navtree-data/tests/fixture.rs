//! Integration tests against a real generator-produced data file.

use navtree_model::{LintConfig, validate};
use pretty_assertions::assert_eq;

const FIXTURE: &str = include_str!("fixtures/navtreedata.js");

#[test]
fn parses_fixture_without_warnings() {
    let parsed = navtree_data::parse(FIXTURE).unwrap();

    assert!(parsed.warnings.is_empty(), "{:?}", parsed.warnings);
    assert_eq!(parsed.data.tree.len(), 20);
    assert_eq!(parsed.data.index.len(), 17);
}

#[test]
fn fixture_root_is_the_firmware_index() {
    let parsed = navtree_data::parse(FIXTURE).unwrap();
    let tree = &parsed.data.tree;

    assert_eq!(tree.roots().len(), 1);
    let root = &tree[tree.roots()[0]];
    assert_eq!(root.label, "ESPixelStick Firmware");
    assert_eq!(root.link.as_deref(), Some("index.html"));
}

#[test]
fn fixture_walk_visits_classes_before_files() {
    let parsed = navtree_data::parse(FIXTURE).unwrap();

    let labels: Vec<String> = parsed
        .data
        .tree
        .walk()
        .map(|(_, _, node)| node.label.clone())
        .collect();

    let classes = labels.iter().position(|l| l == "Classes").unwrap();
    let files = labels.iter().position(|l| l == "Files").unwrap();
    assert!(classes < files, "source order not preserved: {labels:?}");
}

#[test]
fn fixture_keeps_license_header_verbatim() {
    let parsed = navtree_data::parse(FIXTURE).unwrap();

    let license = parsed.data.license.unwrap();
    assert!(license.starts_with("/*\n @licstart"));
    assert!(license.ends_with("in this file\n*/"));
    assert!(license.contains("The MIT License (MIT)"));
}

#[test]
fn fixture_subtree_references_are_leaves() {
    let parsed = navtree_data::parse(FIXTURE).unwrap();
    let tree = &parsed.data.tree;

    let (_, idx, node) = tree
        .walk()
        .find(|(_, _, node)| node.label == "Class List")
        .unwrap();
    assert_eq!(node.subtree_ref.as_deref(), Some("annotated_dup"));
    assert!(tree.children_of(idx).is_empty());
}

#[test]
fn fixture_round_trips_byte_identically() {
    let parsed = navtree_data::parse(FIXTURE).unwrap();

    assert_eq!(navtree_data::emit(&parsed.data), FIXTURE);
}

#[test]
fn fixture_passes_default_lints() {
    let parsed = navtree_data::parse(FIXTURE).unwrap();

    let diagnostics = validate(&parsed.data, &LintConfig::new());

    assert_eq!(diagnostics, vec![]);
    assert!(parsed.data.index.is_sorted());
}

#[test]
fn swapping_index_entries_trips_the_sorted_lint() {
    let mut parsed = navtree_data::parse(FIXTURE).unwrap();

    let mut entries: Vec<_> = parsed.data.index.entries().to_vec();
    entries.swap(0, 1);
    let mut index = navtree_model::AnchorIndex::new();
    for entry in entries {
        index.push(entry);
    }
    parsed.data.index = index;

    let diagnostics = validate(&parsed.data, &LintConfig::new());

    assert!(
        diagnostics
            .iter()
            .any(|d| d.rule == navtree_model::LintRule::SortedIndex)
    );
}

#[test]
fn fixture_round_trips_through_the_filesystem() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("navtreedata.js");
    std::fs::write(&path, FIXTURE).unwrap();

    let parsed = navtree_data::read_file(&path).unwrap();
    navtree_data::write_file(&path, &parsed.data).unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), FIXTURE);
}
