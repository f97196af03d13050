use crate::client::ForemClient;
use crate::prelude::{eprintln, *};
use serde::Deserialize;

use super::{parse_args, tool_result, JsonRpcError};

pub async fn handle_toggle_reaction(
    client: &ForemClient,
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct ToggleReactionArgs {
        reactable_id: i64,
        reactable_type: String,
        category: String,
    }

    let args: ToggleReactionArgs = parse_args(arguments)?;

    if global.verbose {
        eprintln!(
            "Calling toggle_reaction: id={}, type={}, category={}",
            args.reactable_id, args.reactable_type, args.category
        );
    }

    let options = crate::reactions::ToggleOptions {
        reactable_id: args.reactable_id,
        reactable_type: args.reactable_type,
        category: args.category,
        json: false,
    };

    tool_result(crate::reactions::toggle_reaction_data(client, &options).await)
}
