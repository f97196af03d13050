use crate::client::ForemClient;
use crate::prelude::{eprintln, *};
use serde::Deserialize;

use super::{parse_args, tool_result, JsonRpcError};

pub async fn handle_get_comments(
    client: &ForemClient,
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct GetCommentsArgs {
        a_id: Option<i64>,
        p_id: Option<i64>,
    }

    let args: GetCommentsArgs = parse_args(arguments)?;

    if global.verbose {
        eprintln!(
            "Calling get_comments: a_id={:?}, p_id={:?}",
            args.a_id, args.p_id
        );
    }

    let options = crate::comments::ListOptions {
        a_id: args.a_id,
        p_id: args.p_id,
        json: false,
    };

    tool_result(crate::comments::list_comments_data(client, &options).await)
}

pub async fn handle_get_comment_by_id(
    client: &ForemClient,
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct GetCommentByIdArgs {
        id: String,
    }

    let args: GetCommentByIdArgs = parse_args(arguments)?;

    if global.verbose {
        eprintln!("Calling get_comment_by_id: id={}", args.id);
    }

    tool_result(crate::comments::get_comment_data(client, &args.id).await)
}
