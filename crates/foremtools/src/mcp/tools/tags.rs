use crate::client::ForemClient;
use crate::prelude::{eprintln, *};
use serde::Deserialize;

use super::{parse_args, tool_result, JsonRpcError};

pub async fn handle_get_tags(
    client: &ForemClient,
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct GetTagsArgs {
        page: Option<u32>,
        per_page: Option<u32>,
    }

    let args: GetTagsArgs = parse_args(arguments)?;

    if global.verbose {
        eprintln!(
            "Calling get_tags: page={:?}, per_page={:?}",
            args.page, args.per_page
        );
    }

    tool_result(crate::tags::list_tags_data(client, args.page, args.per_page).await)
}

pub async fn handle_get_followed_tags(
    client: &ForemClient,
    _arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    if global.verbose {
        eprintln!("Calling get_followed_tags");
    }

    tool_result(crate::tags::followed_tags_data(client).await)
}
