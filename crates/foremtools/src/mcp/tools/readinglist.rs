use crate::client::ForemClient;
use crate::prelude::{eprintln, *};
use serde::Deserialize;

use super::{parse_args, tool_result, JsonRpcError};

pub async fn handle_get_reading_list(
    client: &ForemClient,
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct GetReadingListArgs {
        page: Option<u32>,
        per_page: Option<u32>,
    }

    let args: GetReadingListArgs = parse_args(arguments)?;

    if global.verbose {
        eprintln!(
            "Calling get_reading_list: page={:?}, per_page={:?}",
            args.page, args.per_page
        );
    }

    tool_result(crate::readinglist::reading_list_data(client, args.page, args.per_page).await)
}
