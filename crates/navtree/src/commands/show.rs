//! `navtree show` command implementation.

use std::io::Write as _;
use std::path::PathBuf;

use clap::Args;
use navtree_model::NavTreeData;
use tracing::info;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the show command.
#[derive(Args)]
pub(crate) struct ShowArgs {
    /// Navigation data file to inspect.
    file: PathBuf,

    /// Emit the tree as JSON instead of an outline.
    #[arg(long)]
    json: bool,

    /// Include link targets in the outline.
    #[arg(long)]
    links: bool,
}

impl ShowArgs {
    /// Execute the show command.
    ///
    /// # Errors
    ///
    /// Returns an error if reading, parsing, or printing fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let parsed = navtree_data::read_file(&self.file)?;
        info!(
            "loaded {} nodes from {}",
            parsed.data.tree.len(),
            self.file.display()
        );
        for warning in &parsed.warnings {
            output.warning(&format!("warning: {warning}"));
        }

        let mut stdout = std::io::stdout().lock();
        if self.json {
            let json = serde_json::to_string_pretty(&parsed.data.tree.to_outline())?;
            writeln!(stdout, "{json}")?;
        } else {
            write_outline(&mut stdout, &parsed.data, self.links)?;
        }
        Ok(())
    }
}

/// Print the tree as an indented outline plus a document summary.
fn write_outline(
    out: &mut impl std::io::Write,
    data: &NavTreeData,
    links: bool,
) -> std::io::Result<()> {
    for (depth, idx, node) in data.tree.walk() {
        let indent = "  ".repeat(depth);
        write!(out, "{indent}{}", node.label)?;
        if links {
            match &node.link {
                Some(link) => write!(out, " -> {link}")?,
                None => write!(out, " -> (no page)")?,
            }
        }
        if let Some(reference) = &node.subtree_ref {
            write!(out, " [subtree: {reference}]")?;
        }
        let child_count = data.tree.children_of(idx).len();
        if child_count > 0 && !links {
            write!(out, " ({child_count})")?;
        }
        writeln!(out)?;
    }

    writeln!(out)?;
    writeln!(
        out,
        "{} nodes, {} index entries ({})",
        data.tree.len(),
        data.index.len(),
        if data.index.is_sorted() {
            "sorted"
        } else {
            "unsorted"
        }
    )?;
    writeln!(out, "sync on:  {:?}", data.messages.sync_on)?;
    writeln!(out, "sync off: {:?}", data.messages.sync_off)?;
    Ok(())
}
