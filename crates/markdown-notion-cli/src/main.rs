use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use markdown_notion_client::Client;
use markdown_notion_config::Config;

mod sync;

/// Sync a directory of markdown files to Notion page hierarchies.
#[derive(Parser)]
#[command(name = "markdown-notion", version, about)]
struct Args {
    /// Notion API token
    #[arg(short, long)]
    token: Option<String>,

    /// Id of the page everything is created under
    #[arg(short = 'P', long)]
    parent_page_id: Option<String>,

    /// Path to the markdown files
    #[arg(short, long)]
    path: Option<PathBuf>,

    /// Alternative config file location
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    }
    .unwrap_or_default();

    // Flags win over the config file.
    let token = args
        .token
        .or(config.api_token)
        .context("no API token: pass --token or set api_token in the config file")?;
    let parent_page_id = args
        .parent_page_id
        .or(config.parent_page_id)
        .context("no parent page id: pass --parent-page-id or set parent_page_id in the config file")?;
    let notes_path = args
        .path
        .or(config.notes_path)
        .context("no notes path: pass --path or set notes_path in the config file")?;

    let client = Client::new(token);
    sync::sync_directory(&client, &parent_page_id, &notes_path)
}
