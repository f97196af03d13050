use crate::client::ForemClient;
use crate::prelude::{eprintln, *};
use serde::Deserialize;

use super::{parse_args, tool_result, JsonRpcError};

pub async fn handle_get_authenticated_user(
    client: &ForemClient,
    _arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    if global.verbose {
        eprintln!("Calling get_authenticated_user");
    }

    tool_result(crate::users::authenticated_user_data(client).await)
}

pub async fn handle_get_user_by_username(
    client: &ForemClient,
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct GetUserByUsernameArgs {
        username: String,
    }

    let args: GetUserByUsernameArgs = parse_args(arguments)?;

    if global.verbose {
        eprintln!("Calling get_user_by_username: username={}", args.username);
    }

    tool_result(crate::users::user_by_username_data(client, &args.username).await)
}
