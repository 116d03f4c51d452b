use super::{count, flatten};
use crate::types::Repository;
use std::io::{self, Write};
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Tabled)]
struct RepositoryRow {
    #[tabled(rename = "(index)")]
    index: usize,
    name: String,
    full_name: String,
    html_url: String,
    stargazers_count: String,
    forks: String,
    watchers: String,
    subscribers_count: String,
    archived: String,
}

impl RepositoryRow {
    fn new(index: usize, repo: &Repository) -> Self {
        RepositoryRow {
            index,
            name: flatten(&repo.name),
            full_name: repo.full_name.as_deref().map(flatten).unwrap_or_default(),
            html_url: repo.html_url.clone().unwrap_or_default(),
            stargazers_count: count(repo.stargazers_count),
            forks: count(repo.forks),
            watchers: count(repo.watchers),
            subscribers_count: count(repo.subscribers_count),
            archived: repo.archived.map(|a| a.to_string()).unwrap_or_default(),
        }
    }
}

pub fn format_table(repos: &[Repository]) -> String {
    let rows: Vec<RepositoryRow> = repos
        .iter()
        .enumerate()
        .map(|(i, repo)| RepositoryRow::new(i, repo))
        .collect();

    Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()))
        .to_string()
}

pub fn print_table(repos: &[Repository], out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", format_table(repos))
}
