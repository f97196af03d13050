use crate::client::ForemClient;
use crate::prelude::{println, *};
use colored::Colorize;
use foremtools_core::query::QueryValue;
use serde::{Deserialize, Serialize};

#[derive(Debug, clap::Parser)]
#[command(name = "tags")]
#[command(about = "Tags on the Forem instance")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// List available tags
    #[clap(name = "list")]
    List(ListOptions),

    /// List the tags followed by the authenticated user
    #[clap(name = "followed")]
    Followed(FollowedOptions),
}

#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct ListOptions {
    /// Pagination page number
    #[arg(short, long)]
    pub page: Option<u32>,

    /// Number of tags per page (default 10)
    #[arg(long)]
    pub per_page: Option<u32>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct FollowedOptions {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    match app.command {
        Commands::List(options) => list_tags(options, global).await,
        Commands::Followed(options) => followed_tags(options, global).await,
    }
}

/// Public data function - used by both CLI and MCP
pub async fn list_tags_data(
    client: &ForemClient,
    page: Option<u32>,
    per_page: Option<u32>,
) -> Result<serde_json::Value> {
    Ok(client
        .get(
            "/tags",
            &[
                ("page", page.map(QueryValue::from)),
                ("per_page", per_page.map(QueryValue::from)),
            ],
            true,
        )
        .await?)
}

/// Public data function - used by both CLI and MCP
pub async fn followed_tags_data(client: &ForemClient) -> Result<serde_json::Value> {
    Ok(client.get("/follows/tags", &[], true).await?)
}

async fn list_tags(options: ListOptions, global: crate::Global) -> Result<()> {
    let client = ForemClient::from_env()?;

    if global.verbose {
        println!("Fetching tags...");
    }

    let tags = list_tags_data(&client, options.page, options.per_page).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&tags)?);
        return Ok(());
    }

    let items = tags.as_array().ok_or_eyre("Expected an array of tags")?;
    if items.is_empty() {
        println!("No tags found.");
        return Ok(());
    }

    let mut table = new_table();
    table.add_row(prettytable::row!["ID".bold().cyan(), "NAME".bold().cyan()]);
    for tag in items {
        table.add_row(prettytable::row![
            tag.get("id").and_then(|v| v.as_i64()).unwrap_or_default().to_string().bright_black(),
            tag.get("name").and_then(|v| v.as_str()).unwrap_or("").bright_green()
        ]);
    }

    table.printstd();
    Ok(())
}

async fn followed_tags(options: FollowedOptions, global: crate::Global) -> Result<()> {
    let client = ForemClient::from_env()?;
    let tags = followed_tags_data(&client).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&tags)?);
        return Ok(());
    }

    let items = tags.as_array().ok_or_eyre("Expected an array of tags")?;
    if items.is_empty() {
        println!("You are not following any tags.");
        return Ok(());
    }

    let mut table = new_table();
    table.add_row(prettytable::row![
        "ID".bold().cyan(),
        "NAME".bold().cyan(),
        "POINTS".bold().cyan()
    ]);
    for tag in items {
        table.add_row(prettytable::row![
            tag.get("id").and_then(|v| v.as_i64()).unwrap_or_default().to_string().bright_black(),
            tag.get("name").and_then(|v| v.as_str()).unwrap_or("").bright_green(),
            tag.get("points").and_then(|v| v.as_f64()).unwrap_or_default()
        ]);
    }

    table.printstd();
    Ok(())
}
