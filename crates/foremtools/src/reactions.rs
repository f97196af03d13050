use crate::client::ForemClient;
use crate::prelude::{println, *};
use colored::Colorize;
use foremtools_core::query::QueryValue;
use serde::{Deserialize, Serialize};

#[derive(Debug, clap::Parser)]
#[command(name = "reactions")]
#[command(about = "Reactions on articles and comments")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Toggle a reaction on or off
    #[clap(name = "toggle")]
    Toggle(ToggleOptions),
}

#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct ToggleOptions {
    /// ID of the article or comment to react to
    pub reactable_id: i64,

    /// Type of the reactable entity: Article, Comment, or User
    #[arg(long, default_value = "Article")]
    pub reactable_type: String,

    /// Reaction category: like, unicorn, readinglist, thumbsup, thumbsdown,
    /// vomit, raised_hand, fire
    #[arg(long, default_value = "like")]
    pub category: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    match app.command {
        Commands::Toggle(options) => toggle_reaction(options, global).await,
    }
}

/// Public data function - used by both CLI and MCP
/// The API takes the reaction as query parameters on a bodyless POST.
pub async fn toggle_reaction_data(
    client: &ForemClient,
    options: &ToggleOptions,
) -> Result<serde_json::Value> {
    Ok(client
        .post(
            "/reactions/toggle",
            None,
            &[
                ("reactable_id", Some(QueryValue::from(options.reactable_id))),
                (
                    "reactable_type",
                    Some(QueryValue::from(options.reactable_type.clone())),
                ),
                ("category", Some(QueryValue::from(options.category.clone()))),
            ],
        )
        .await?)
}

async fn toggle_reaction(options: ToggleOptions, global: crate::Global) -> Result<()> {
    let client = ForemClient::from_env()?;

    if global.verbose {
        println!(
            "Toggling {} on {} {}...",
            options.category, options.reactable_type, options.reactable_id
        );
    }

    let reaction = toggle_reaction_data(&client, &options).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&reaction)?);
        return Ok(());
    }

    let result = reaction
        .get("result")
        .and_then(|v| v.as_str())
        .unwrap_or("(unknown)");

    println!(
        "{} {} on {} {}",
        result.green(),
        options.category.bright_yellow(),
        options.reactable_type,
        options.reactable_id
    );

    Ok(())
}
