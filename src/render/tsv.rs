use super::{count, flatten};
use crate::error::{RankError, Result};
use crate::types::Repository;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const TSV_FILE_NAME: &str = "repositories.tsv";
const HEADER: [&str; 4] = ["name", "full_name", "html_url", "stargazers_count"];

pub fn write_tsv(repos: &[Repository], out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", HEADER.join("\t"))?;
    for repo in repos {
        writeln!(
            out,
            "{}\t{}\t{}\t{}",
            flatten(&repo.name),
            repo.full_name.as_deref().map(flatten).unwrap_or_default(),
            repo.html_url.as_deref().map(flatten).unwrap_or_default(),
            count(repo.stargazers_count)
        )?;
    }
    Ok(())
}

/// Write `repositories.tsv` into `dir` and return its path.
pub fn generate_tsv_file(repos: &[Repository], dir: &Path) -> Result<PathBuf> {
    let path = dir.join(TSV_FILE_NAME);
    let mut contents = Vec::new();
    write_tsv(repos, &mut contents)?;

    fs::write(&path, contents).map_err(|source| RankError::Write {
        path: path.clone(),
        source,
    })?;
    debug!(path = %path.display(), rows = repos.len(), "wrote tsv");
    Ok(path)
}
