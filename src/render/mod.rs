pub mod markdown;
pub mod table;
pub mod tsv;

use crate::error::Result;
use crate::types::Repository;
use clap::ValueEnum;
use std::io;
use std::path::{Path, PathBuf};

pub use markdown::generate_markdown_file;
pub use table::print_table;
pub use tsv::generate_tsv_file;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Tab-separated file
    #[default]
    File,
    /// Table on stdout
    Table,
    /// Markdown file
    Markdown,
}

/// Run the one renderer `format` selects. Returns the written path, if any.
pub fn render(
    format: OutputFormat,
    repos: &[Repository],
    output_dir: &Path,
) -> Result<Option<PathBuf>> {
    match format {
        OutputFormat::Table => {
            print_table(repos, &mut io::stdout().lock())?;
            Ok(None)
        }
        OutputFormat::File => generate_tsv_file(repos, output_dir).map(Some),
        OutputFormat::Markdown => generate_markdown_file(repos, output_dir).map(Some),
    }
}

/// Strip characters that would break a single-line cell.
pub(crate) fn flatten(value: &str) -> String {
    value.replace(['\t', '\r', '\n'], " ")
}

pub(crate) fn count(value: Option<u64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
