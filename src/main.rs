mod app;
mod classify;
mod cli;
mod config;
mod domain;
mod extract;
mod infrastructure;
mod report;
mod tasks;
mod web_content;

use std::io;

use anyhow::Result;
use clap::Parser;
use infrastructure::{directories, logging};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = cli::Cli::parse();
    let config = config::load_config()?;
    let paths = directories::ensure_directories(&config.directories)?;
    logging::init_tracing(&config, &paths)?;

    let urls = cli.read_urls().await?;
    if urls.is_empty() {
        tracing::warn!(target: "app", "Please enter at least one URL.");
        eprintln!("Please enter at least one URL.");
        return Ok(());
    }

    let kind = cli.check.unwrap_or(config.default_check);
    let app = app::SiteCheckApp::initialize(&config, kind)?;
    let report = app.run(&urls, &mut io::stderr()).await?;

    if cli.json {
        println!("{}", report.render_json()?);
    } else {
        print!("{}", report.render_text());
    }
    Ok(())
}
