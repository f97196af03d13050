use crate::client::ForemClient;
use crate::prelude::{println, *};
use colored::Colorize;
use foremtools_core::query::QueryValue;
use serde::{Deserialize, Serialize};

#[derive(Debug, clap::Parser)]
#[command(name = "readinglist")]
#[command(about = "The authenticated user's reading list")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// List bookmarked articles
    #[clap(name = "list")]
    List(ListOptions),
}

#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct ListOptions {
    /// Pagination page number
    #[arg(short, long)]
    pub page: Option<u32>,

    /// Number of items per page (default 30)
    #[arg(long)]
    pub per_page: Option<u32>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    match app.command {
        Commands::List(options) => reading_list(options, global).await,
    }
}

/// Public data function - used by both CLI and MCP
pub async fn reading_list_data(
    client: &ForemClient,
    page: Option<u32>,
    per_page: Option<u32>,
) -> Result<serde_json::Value> {
    Ok(client
        .get(
            "/readinglist",
            &[
                ("page", page.map(QueryValue::from)),
                ("per_page", per_page.map(QueryValue::from)),
            ],
            true,
        )
        .await?)
}

async fn reading_list(options: ListOptions, global: crate::Global) -> Result<()> {
    let client = ForemClient::from_env()?;

    if global.verbose {
        println!("Fetching reading list...");
    }

    let items = reading_list_data(&client, options.page, options.per_page).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    let entries = items
        .as_array()
        .ok_or_eyre("Expected an array of reading list items")?;
    if entries.is_empty() {
        println!("Your reading list is empty.");
        return Ok(());
    }

    let mut table = new_table();
    table.add_row(prettytable::row![
        "SAVED".bold().cyan(),
        "TITLE".bold().cyan(),
        "AUTHOR".bold().cyan()
    ]);
    for entry in entries {
        table.add_row(prettytable::row![
            entry
                .get("created_at")
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .bright_black(),
            entry
                .pointer("/article/title")
                .and_then(|v| v.as_str())
                .unwrap_or("(untitled)"),
            entry
                .pointer("/article/user/username")
                .and_then(|v| v.as_str())
                .unwrap_or("(unknown)")
                .bright_magenta()
        ]);
    }
    table.printstd();

    Ok(())
}
