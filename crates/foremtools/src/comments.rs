use crate::client::ForemClient;
use crate::prelude::{println, *};
use colored::Colorize;
use foremtools_core::query::QueryValue;
use foremtools_core::text::{strip_html, truncate_text};
use serde::{Deserialize, Serialize};

#[derive(Debug, clap::Parser)]
#[command(name = "comments")]
#[command(about = "Comments on articles and podcast episodes")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// List threaded comments for an article or podcast episode
    #[clap(name = "list")]
    List(ListOptions),

    /// Get a single comment by its ID code
    #[clap(name = "get")]
    Get(GetOptions),
}

#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct ListOptions {
    /// Article ID to get comments for
    #[arg(short, long)]
    pub a_id: Option<i64>,

    /// Podcast episode ID to get comments for
    #[arg(short, long)]
    pub p_id: Option<i64>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct GetOptions {
    /// ID code of the comment (alphanumeric string)
    pub id: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    match app.command {
        Commands::List(options) => list_comments(options, global).await,
        Commands::Get(options) => get_comment(options, global).await,
    }
}

/// Public data function - used by both CLI and MCP
/// Either an article ID or a podcast episode ID is required.
pub async fn list_comments_data(
    client: &ForemClient,
    options: &ListOptions,
) -> Result<serde_json::Value> {
    if options.a_id.is_none() && options.p_id.is_none() {
        return Err(eyre!(
            "Either --a-id (article ID) or --p-id (podcast episode ID) must be provided"
        ));
    }

    Ok(client
        .get(
            "/comments",
            &[
                ("a_id", options.a_id.map(QueryValue::from)),
                ("p_id", options.p_id.map(QueryValue::from)),
            ],
            true,
        )
        .await?)
}

/// Public data function - used by both CLI and MCP
pub async fn get_comment_data(client: &ForemClient, id: &str) -> Result<serde_json::Value> {
    Ok(client.get(&f!("/comments/{id}"), &[], true).await?)
}

async fn list_comments(options: ListOptions, global: crate::Global) -> Result<()> {
    let client = ForemClient::from_env()?;

    if global.verbose {
        println!("Fetching comments...");
    }

    let comments = list_comments_data(&client, &options).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&comments)?);
        return Ok(());
    }

    let Some(items) = comments.as_array() else {
        println!("{}", serde_json::to_string_pretty(&comments)?);
        return Ok(());
    };

    if items.is_empty() {
        println!("No comments found.");
        return Ok(());
    }

    for comment in items {
        print_comment(comment, 0);
    }

    Ok(())
}

async fn get_comment(options: GetOptions, global: crate::Global) -> Result<()> {
    let client = ForemClient::from_env()?;
    let comment = get_comment_data(&client, &options.id).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&comment)?);
        return Ok(());
    }

    print_comment(&comment, 0);
    Ok(())
}

/// Print a comment and its nested replies with indentation.
fn print_comment(comment: &serde_json::Value, depth: usize) {
    let indent = "  ".repeat(depth);
    let author = comment
        .pointer("/user/username")
        .and_then(|v| v.as_str())
        .unwrap_or("(unknown)");
    let created_at = comment
        .get("created_at")
        .and_then(|v| v.as_str())
        .unwrap_or("");
    let id_code = comment.get("id_code").and_then(|v| v.as_str()).unwrap_or("");

    std::println!(
        "{}{} {} {}",
        indent,
        author.bright_magenta(),
        created_at.bright_black(),
        f!("({id_code})").bright_black()
    );

    if let Some(body) = comment.get("body_html").and_then(|v| v.as_str()) {
        let text = truncate_text(&strip_html(body), 500);
        for line in text.lines() {
            std::println!("{}{}", indent, line);
        }
    }

    std::println!();

    if let Some(children) = comment.get("children").and_then(|v| v.as_array()) {
        for child in children {
            print_comment(child, depth + 1);
        }
    }
}
