use crate::client::ForemClient;
use crate::prelude::{println, *};
use colored::Colorize;
use foremtools_core::query::QueryValue;
use serde::{Deserialize, Serialize};

#[derive(Debug, clap::Parser)]
#[command(name = "followers")]
#[command(about = "The authenticated user's followers")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// List followers
    #[clap(name = "list")]
    List(ListOptions),
}

#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct ListOptions {
    /// Pagination page number
    #[arg(short, long)]
    pub page: Option<u32>,

    /// Number of followers per page (default 80)
    #[arg(long)]
    pub per_page: Option<u32>,

    /// Sort followers by field (created_at)
    #[arg(short, long)]
    pub sort: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    match app.command {
        Commands::List(options) => list_followers(options, global).await,
    }
}

/// Public data function - used by both CLI and MCP
pub async fn list_followers_data(
    client: &ForemClient,
    options: &ListOptions,
) -> Result<serde_json::Value> {
    Ok(client
        .get(
            "/followers/users",
            &[
                ("page", options.page.map(QueryValue::from)),
                ("per_page", options.per_page.map(QueryValue::from)),
                ("sort", options.sort.clone().map(QueryValue::from)),
            ],
            true,
        )
        .await?)
}

async fn list_followers(options: ListOptions, global: crate::Global) -> Result<()> {
    let client = ForemClient::from_env()?;

    if global.verbose {
        println!("Fetching followers...");
    }

    let followers = list_followers_data(&client, &options).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&followers)?);
        return Ok(());
    }

    let items = followers
        .as_array()
        .ok_or_eyre("Expected an array of followers")?;
    if items.is_empty() {
        println!("You have no followers yet.");
        return Ok(());
    }

    let mut table = new_table();
    table.add_row(prettytable::row![
        "USERNAME".bold().cyan(),
        "NAME".bold().cyan(),
        "FOLLOWING SINCE".bold().cyan()
    ]);
    for follower in items {
        table.add_row(prettytable::row![
            follower
                .get("username")
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .bright_magenta(),
            follower.get("name").and_then(|v| v.as_str()).unwrap_or(""),
            follower
                .get("created_at")
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .bright_black()
        ]);
    }
    table.printstd();

    Ok(())
}
