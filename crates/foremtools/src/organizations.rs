use crate::client::ForemClient;
use crate::prelude::{println, *};
use colored::Colorize;
use foremtools_core::query::QueryValue;
use serde::{Deserialize, Serialize};

#[derive(Debug, clap::Parser)]
#[command(name = "organizations")]
#[command(about = "Organizations on the Forem instance")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Get an organization by its username/slug
    #[clap(name = "get")]
    Get(GetOptions),

    /// List articles published by an organization
    #[clap(name = "articles")]
    Articles(MembersOptions),

    /// List users who belong to an organization
    #[clap(name = "users")]
    Users(MembersOptions),
}

#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct GetOptions {
    /// Organization username or slug
    pub username: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct MembersOptions {
    /// Organization username or slug
    pub username: String,

    /// Pagination page number
    #[arg(short, long)]
    pub page: Option<u32>,

    /// Number of results per page
    #[arg(long)]
    pub per_page: Option<u32>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    match app.command {
        Commands::Get(options) => get_organization(options, global).await,
        Commands::Articles(options) => organization_articles(options, global).await,
        Commands::Users(options) => organization_users(options, global).await,
    }
}

/// Public data function - used by both CLI and MCP
pub async fn get_organization_data(
    client: &ForemClient,
    username: &str,
) -> Result<serde_json::Value> {
    Ok(client
        .get(&f!("/organizations/{username}"), &[], true)
        .await?)
}

/// Public data function - used by both CLI and MCP
pub async fn organization_articles_data(
    client: &ForemClient,
    options: &MembersOptions,
) -> Result<serde_json::Value> {
    Ok(client
        .get(
            &f!("/organizations/{}/articles", options.username),
            &[
                ("page", options.page.map(QueryValue::from)),
                ("per_page", options.per_page.map(QueryValue::from)),
            ],
            true,
        )
        .await?)
}

/// Public data function - used by both CLI and MCP
pub async fn organization_users_data(
    client: &ForemClient,
    options: &MembersOptions,
) -> Result<serde_json::Value> {
    Ok(client
        .get(
            &f!("/organizations/{}/users", options.username),
            &[
                ("page", options.page.map(QueryValue::from)),
                ("per_page", options.per_page.map(QueryValue::from)),
            ],
            true,
        )
        .await?)
}

async fn get_organization(options: GetOptions, global: crate::Global) -> Result<()> {
    let client = ForemClient::from_env()?;

    if global.verbose {
        println!("Fetching organization {}...", options.username);
    }

    let organization = get_organization_data(&client, &options.username).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&organization)?);
        return Ok(());
    }

    let field = |key: &str| organization.get(key).and_then(|v| v.as_str()).unwrap_or("");

    std::println!(
        "\n{} {}\n",
        field("name").bold().bright_white(),
        f!("(@{})", field("username")).bright_magenta()
    );

    let mut table = new_table();
    if !field("summary").is_empty() {
        table.add_row(prettytable::row!["Summary".bold().cyan(), field("summary")]);
    }
    if !field("url").is_empty() {
        table.add_row(prettytable::row!["URL".bold().cyan(), field("url")]);
    }
    if !field("location").is_empty() {
        table.add_row(prettytable::row!["Location".bold().cyan(), field("location")]);
    }
    if !field("tech_stack").is_empty() {
        table.add_row(prettytable::row!["Tech stack".bold().cyan(), field("tech_stack")]);
    }
    if !field("joined_at").is_empty() {
        table.add_row(prettytable::row![
            "Joined".bold().cyan(),
            field("joined_at").bright_black().to_string()
        ]);
    }
    table.printstd();
    std::println!();

    Ok(())
}

async fn organization_articles(options: MembersOptions, global: crate::Global) -> Result<()> {
    let client = ForemClient::from_env()?;
    let articles = organization_articles_data(&client, &options).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&articles)?);
        return Ok(());
    }

    let items = articles
        .as_array()
        .ok_or_eyre("Expected an array of articles")?;
    if items.is_empty() {
        println!("No articles found for {}.", options.username);
        return Ok(());
    }

    let mut table = new_table();
    table.add_row(prettytable::row![
        "ID".bold().cyan(),
        "TITLE".bold().cyan(),
        "PUBLISHED".bold().cyan()
    ]);
    for article in items {
        table.add_row(prettytable::row![
            article.get("id").and_then(|v| v.as_i64()).unwrap_or_default().to_string().bright_black(),
            article.get("title").and_then(|v| v.as_str()).unwrap_or("(untitled)"),
            article
                .get("readable_publish_date")
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .bright_black()
        ]);
    }
    table.printstd();

    Ok(())
}

async fn organization_users(options: MembersOptions, global: crate::Global) -> Result<()> {
    let client = ForemClient::from_env()?;
    let users = organization_users_data(&client, &options).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&users)?);
        return Ok(());
    }

    let items = users.as_array().ok_or_eyre("Expected an array of users")?;
    if items.is_empty() {
        println!("No users found for {}.", options.username);
        return Ok(());
    }

    let mut table = new_table();
    table.add_row(prettytable::row![
        "USERNAME".bold().cyan(),
        "NAME".bold().cyan()
    ]);
    for user in items {
        table.add_row(prettytable::row![
            user.get("username")
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .bright_magenta(),
            user.get("name").and_then(|v| v.as_str()).unwrap_or("")
        ]);
    }
    table.printstd();

    Ok(())
}
