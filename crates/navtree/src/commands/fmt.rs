//! `navtree fmt` command implementation.

use std::io::Write as _;
use std::path::PathBuf;

use clap::Args;
use tracing::info;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the fmt command.
#[derive(Args)]
pub(crate) struct FmtArgs {
    /// Navigation data file to reformat.
    file: PathBuf,

    /// Exit nonzero when the file is not already canonically formatted.
    #[arg(long)]
    check: bool,

    /// Rewrite the file in place instead of printing to stdout.
    #[arg(long, conflicts_with = "check")]
    write: bool,
}

impl FmtArgs {
    /// Execute the fmt command.
    ///
    /// # Errors
    ///
    /// Returns an error if reading, parsing, or writing fails, or under
    /// `--check` when the file is not canonical.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let content = std::fs::read_to_string(&self.file)?;
        info!("read {} bytes from {}", content.len(), self.file.display());
        let parsed = navtree_data::parse(&content)?;
        for warning in &parsed.warnings {
            output.warning(&format!("warning: {warning}"));
        }

        let formatted = navtree_data::emit(&parsed.data);

        if self.check {
            if formatted == content {
                output.success(&format!("{} is canonically formatted", self.file.display()));
                Ok(())
            } else {
                Err(CliError::Validation(format!(
                    "{} is not canonically formatted",
                    self.file.display()
                )))
            }
        } else if self.write {
            if formatted == content {
                output.info(&format!("{} unchanged", self.file.display()));
            } else {
                std::fs::write(&self.file, &formatted)?;
                output.success(&format!("reformatted {}", self.file.display()));
            }
            Ok(())
        } else {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(formatted.as_bytes())?;
            stdout.write_all(b"\n")?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const CANONICAL: &str = "var NAVTREE =\n\
        [\n\
        \x20 [ \"Docs\", \"index.html\", null ]\n\
        ];\n\
        \n\
        var NAVTREEINDEX =\n\
        [\n\
        \"index.html\"\n\
        ];\n\
        \n\
        var SYNCONMSG = 'click to disable panel synchronisation';\n\
        var SYNCOFFMSG = 'click to enable panel synchronisation';";

    const COMPACT: &str = "var NAVTREE = [ [ \"Docs\", \"index.html\", null ] ];\n\
        var NAVTREEINDEX = [\"index.html\"];";

    fn file_with(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("navtreedata.js");
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_check_passes_on_canonical_file() {
        let (_dir, file) = file_with(CANONICAL);

        let result = FmtArgs {
            file,
            check: true,
            write: false,
        }
        .execute();

        assert!(result.is_ok());
    }

    #[test]
    fn test_check_fails_on_noncanonical_file() {
        let (_dir, file) = file_with(COMPACT);

        let err = FmtArgs {
            file,
            check: true,
            write: false,
        }
        .execute()
        .unwrap_err();

        assert!(matches!(err, CliError::Validation(_)));
        assert!(err.to_string().contains("not canonically formatted"));
    }

    #[test]
    fn test_write_reformats_in_place() {
        let (_dir, file) = file_with(COMPACT);

        FmtArgs {
            file: file.clone(),
            check: false,
            write: true,
        }
        .execute()
        .unwrap();

        assert_eq!(std::fs::read_to_string(&file).unwrap(), CANONICAL);
    }
}
