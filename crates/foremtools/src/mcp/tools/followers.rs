use crate::client::ForemClient;
use crate::prelude::{eprintln, *};
use serde::Deserialize;

use super::{parse_args, tool_result, JsonRpcError};

pub async fn handle_get_followers(
    client: &ForemClient,
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct GetFollowersArgs {
        page: Option<u32>,
        per_page: Option<u32>,
        sort: Option<String>,
    }

    let args: GetFollowersArgs = parse_args(arguments)?;

    if global.verbose {
        eprintln!(
            "Calling get_followers: page={:?}, sort={:?}",
            args.page, args.sort
        );
    }

    let options = crate::followers::ListOptions {
        page: args.page,
        per_page: args.per_page,
        sort: args.sort,
        json: false,
    };

    tool_result(crate::followers::list_followers_data(client, &options).await)
}
