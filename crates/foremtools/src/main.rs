#![allow(unused)]

use crate::prelude::*;
use clap::Parser;

mod articles;
mod client;
mod comments;
mod error;
mod followers;
mod mcp;
mod organizations;
mod prelude;
mod reactions;
mod readinglist;
mod tags;
mod users;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Forem (dev.to) API operations and MCP server"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Whether to display additional information.
    #[clap(long, env = "FOREMTOOLS_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Article operations
    Articles(crate::articles::App),

    /// Comment operations
    Comments(crate::comments::App),

    /// User profile operations
    Users(crate::users::App),

    /// Tag operations
    Tags(crate::tags::App),

    /// Organization operations
    Organizations(crate::organizations::App),

    /// Reading list operations
    #[clap(name = "readinglist")]
    ReadingList(crate::readinglist::App),

    /// Follower operations
    Followers(crate::followers::App),

    /// Reaction operations
    Reactions(crate::reactions::App),

    /// Model Context Protocol server
    MCP(crate::mcp::App),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Articles(sub_app) => crate::articles::run(sub_app, app.global).await,
        SubCommands::Comments(sub_app) => crate::comments::run(sub_app, app.global).await,
        SubCommands::Users(sub_app) => crate::users::run(sub_app, app.global).await,
        SubCommands::Tags(sub_app) => crate::tags::run(sub_app, app.global).await,
        SubCommands::Organizations(sub_app) => crate::organizations::run(sub_app, app.global).await,
        SubCommands::ReadingList(sub_app) => crate::readinglist::run(sub_app, app.global).await,
        SubCommands::Followers(sub_app) => crate::followers::run(sub_app, app.global).await,
        SubCommands::Reactions(sub_app) => crate::reactions::run(sub_app, app.global).await,
        SubCommands::MCP(sub_app) => crate::mcp::run(sub_app, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
