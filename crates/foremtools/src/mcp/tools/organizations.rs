use crate::client::ForemClient;
use crate::prelude::{eprintln, *};
use serde::Deserialize;

use super::{parse_args, tool_result, JsonRpcError};

#[derive(Deserialize)]
struct OrganizationArgs {
    username: String,
    page: Option<u32>,
    per_page: Option<u32>,
}

pub async fn handle_get_organization(
    client: &ForemClient,
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let args: OrganizationArgs = parse_args(arguments)?;

    if global.verbose {
        eprintln!("Calling get_organization: username={}", args.username);
    }

    tool_result(crate::organizations::get_organization_data(client, &args.username).await)
}

pub async fn handle_get_organization_articles(
    client: &ForemClient,
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let args: OrganizationArgs = parse_args(arguments)?;

    if global.verbose {
        eprintln!(
            "Calling get_organization_articles: username={}",
            args.username
        );
    }

    let options = crate::organizations::MembersOptions {
        username: args.username,
        page: args.page,
        per_page: args.per_page,
        json: false,
    };

    tool_result(crate::organizations::organization_articles_data(client, &options).await)
}

pub async fn handle_get_organization_users(
    client: &ForemClient,
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let args: OrganizationArgs = parse_args(arguments)?;

    if global.verbose {
        eprintln!("Calling get_organization_users: username={}", args.username);
    }

    let options = crate::organizations::MembersOptions {
        username: args.username,
        page: args.page,
        per_page: args.per_page,
        json: false,
    };

    tool_result(crate::organizations::organization_users_data(client, &options).await)
}
