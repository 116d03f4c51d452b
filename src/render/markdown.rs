use super::{count, flatten};
use crate::error::{RankError, Result};
use crate::types::Repository;
use chrono::{DateTime, SecondsFormat, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const MARKDOWN_FILE_NAME: &str = "repositories.md";

fn escape(value: &str) -> String {
    flatten(value).replace('|', "\\|")
}

/// Percent-encode what would end the link target or split the table cell.
fn escape_url(url: &str) -> String {
    let mut escaped = String::with_capacity(url.len());
    for c in url.chars() {
        match c {
            '(' => escaped.push_str("%28"),
            ')' => escaped.push_str("%29"),
            '|' => escaped.push_str("%7C"),
            ' ' => escaped.push_str("%20"),
            '<' => escaped.push_str("%3C"),
            '>' => escaped.push_str("%3E"),
            '\t' | '\r' | '\n' => {}
            _ => escaped.push(c),
        }
    }
    escaped
}

fn link(repo: &Repository) -> String {
    match &repo.html_url {
        Some(url) => format!("[{}]({})", escape(&repo.name), escape_url(url)),
        None => escape(&repo.name),
    }
}

pub fn format_markdown(repos: &[Repository], generated_at: DateTime<Utc>) -> String {
    let mut doc = String::new();
    doc.push_str("# Repositories ranked by stars\n\n");
    doc.push_str(&format!(
        "Generated at {}.\n\n",
        generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    ));
    doc.push_str("| # | Repository | Stars |\n");
    doc.push_str("| ---: | --- | ---: |\n");
    for (i, repo) in repos.iter().enumerate() {
        doc.push_str(&format!(
            "| {} | {} | {} |\n",
            i + 1,
            link(repo),
            count(repo.stargazers_count)
        ));
    }
    doc
}

/// Write `repositories.md` into `dir` and return its path.
pub fn generate_markdown_file(repos: &[Repository], dir: &Path) -> Result<PathBuf> {
    let path = dir.join(MARKDOWN_FILE_NAME);
    fs::write(&path, format_markdown(repos, Utc::now())).map_err(|source| RankError::Write {
        path: path.clone(),
        source,
    })?;
    debug!(path = %path.display(), rows = repos.len(), "wrote markdown");
    Ok(path)
}
