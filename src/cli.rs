use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::AsyncReadExt;

use crate::domain::CheckKind;

#[derive(Debug, Parser)]
#[command(name = "site-signal-checker", version)]
#[command(about = "Check web pages for client portals, donation pages, or React jobs in the US")]
pub struct Cli {
    /// Which signal to look for (defaults to DEFAULT_CHECK, then portal)
    #[arg(short, long, value_enum)]
    pub check: Option<CheckKind>,

    /// File with one URL per line; stdin is read when neither this nor URLs are given
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    pub urls: Vec<String>,
}

impl Cli {
    pub async fn read_urls(&self) -> Result<Vec<String>> {
        if !self.urls.is_empty() {
            return Ok(parse_url_list(&self.urls.join("\n")));
        }
        let text = match &self.input {
            Some(path) => tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("failed to read {}", path.display()))?,
            None => {
                let mut buf = String::new();
                tokio::io::stdin()
                    .read_to_string(&mut buf)
                    .await
                    .context("failed to read URLs from stdin")?;
                buf
            }
        };
        Ok(parse_url_list(&text))
    }
}

/// One URL per line; surrounding whitespace trimmed, blank lines dropped.
pub fn parse_url_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
