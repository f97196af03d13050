use crate::client::ForemClient;
use crate::prelude::{println, *};
use colored::Colorize;
use foremtools_core::query::QueryValue;
use serde::{Deserialize, Serialize};

#[derive(Debug, clap::Parser)]
#[command(name = "users")]
#[command(about = "User profiles")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Get the profile of the authenticated user (the owner of the API key)
    #[clap(name = "me")]
    Me(MeOptions),

    /// Get a user's public profile by username
    #[clap(name = "get")]
    Get(GetOptions),
}

#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct MeOptions {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct GetOptions {
    /// Username or numeric user ID
    pub username: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    match app.command {
        Commands::Me(options) => authenticated_user(options, global).await,
        Commands::Get(options) => user_by_username(options, global).await,
    }
}

/// Public data function - used by both CLI and MCP
pub async fn authenticated_user_data(client: &ForemClient) -> Result<serde_json::Value> {
    Ok(client.get("/users/me", &[], true).await?)
}

/// Public data function - used by both CLI and MCP
/// The API models this as `/users/by_username?url=<username>`.
pub async fn user_by_username_data(
    client: &ForemClient,
    username: &str,
) -> Result<serde_json::Value> {
    Ok(client
        .get(
            "/users/by_username",
            &[("url", Some(QueryValue::from(username)))],
            true,
        )
        .await?)
}

async fn authenticated_user(options: MeOptions, global: crate::Global) -> Result<()> {
    let client = ForemClient::from_env()?;

    if global.verbose {
        println!("Fetching the authenticated user...");
    }

    let user = authenticated_user_data(&client).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&user)?);
        return Ok(());
    }

    print_user(&user);
    Ok(())
}

async fn user_by_username(options: GetOptions, global: crate::Global) -> Result<()> {
    let client = ForemClient::from_env()?;
    let user = user_by_username_data(&client, &options.username).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&user)?);
        return Ok(());
    }

    print_user(&user);
    Ok(())
}

fn print_user(user: &serde_json::Value) {
    let field = |key: &str| user.get(key).and_then(|v| v.as_str()).unwrap_or("");

    std::println!(
        "\n{} {}\n",
        field("name").bold().bright_white(),
        f!("(@{})", field("username")).bright_magenta()
    );

    let mut table = new_table();
    table.add_row(prettytable::row![
        "ID".bold().cyan(),
        user.get("id").and_then(|v| v.as_i64()).unwrap_or_default()
    ]);

    if !field("summary").is_empty() {
        table.add_row(prettytable::row!["Summary".bold().cyan(), field("summary")]);
    }

    if !field("location").is_empty() {
        table.add_row(prettytable::row!["Location".bold().cyan(), field("location")]);
    }

    if !field("website_url").is_empty() {
        table.add_row(prettytable::row!["Website".bold().cyan(), field("website_url")]);
    }

    if !field("joined_at").is_empty() {
        table.add_row(prettytable::row![
            "Joined".bold().cyan(),
            field("joined_at").bright_black().to_string()
        ]);
    }

    table.printstd();
    std::println!();
}
