mod articles;
mod comments;
mod followers;
mod organizations;
mod reactions;
mod readinglist;
mod tags;
mod users;

use serde::{Deserialize, Serialize};

use crate::client::ForemClient;
use crate::prelude::Result;

// Re-export types needed by tool handlers
pub use super::{JsonRpcError, Tool};

// MCP Protocol types for tools
#[derive(Debug, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct ServerCapabilities {
    pub tools: Option<ToolsCapability>,
}

#[derive(Debug, Serialize)]
pub struct ToolsCapability {}

#[derive(Debug, Serialize)]
pub struct InitializeResult {
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
}

#[derive(Debug, Serialize)]
pub struct ToolsList {
    pub tools: Vec<Tool>,
}

#[derive(Debug, Deserialize)]
pub struct CallToolParams {
    pub name: String,
    pub arguments: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct CallToolResult {
    pub content: Vec<Content>,
    #[serde(rename = "isError", skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum Content {
    #[serde(rename = "text")]
    Text { text: String },
}

pub(crate) fn invalid_params(message: String) -> JsonRpcError {
    JsonRpcError {
        code: -32602,
        message,
        data: None,
    }
}

pub(crate) fn internal_error(error: impl std::fmt::Display) -> JsonRpcError {
    JsonRpcError {
        code: -32603,
        message: format!("Internal error: {error}"),
        data: None,
    }
}

/// Deserialize tool arguments, mapping failures to an invalid-params error.
pub(crate) fn parse_args<T: serde::de::DeserializeOwned>(
    arguments: Option<serde_json::Value>,
) -> std::result::Result<T, JsonRpcError> {
    serde_json::from_value(arguments.unwrap_or(serde_json::Value::Null))
        .map_err(|e| invalid_params(format!("Invalid arguments: {e}")))
}

/// Wrap a tool outcome in the MCP result shape.
///
/// Execution failures become a text result flagged with `isError` instead of
/// a protocol-level error, so nothing from the API layer ever crosses into
/// the JSON-RPC layer unhandled.
pub(crate) fn tool_result(
    result: Result<serde_json::Value>,
) -> std::result::Result<serde_json::Value, JsonRpcError> {
    let call_result = match result {
        Ok(value) => {
            let text = serde_json::to_string_pretty(&value).map_err(internal_error)?;
            CallToolResult {
                content: vec![Content::Text { text }],
                is_error: None,
            }
        }
        Err(error) => CallToolResult {
            content: vec![Content::Text {
                text: format!("Error: {error}"),
            }],
            is_error: Some(true),
        },
    };

    serde_json::to_value(call_result).map_err(internal_error)
}

pub fn handle_initialize() -> std::result::Result<serde_json::Value, JsonRpcError> {
    let result = InitializeResult {
        protocol_version: "2024-11-05".to_string(),
        capabilities: ServerCapabilities {
            tools: Some(ToolsCapability {}),
        },
        server_info: ServerInfo {
            name: "foremtools".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    };

    serde_json::to_value(result).map_err(internal_error)
}

pub fn handle_tools_list() -> std::result::Result<serde_json::Value, JsonRpcError> {
    let tools = vec![
        Tool {
            name: "get_articles".to_string(),
            description: "List published articles from DEV Community with optional filters. Returns articles ordered by descending popularity by default.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "page": {
                        "type": "number",
                        "description": "Pagination page number"
                    },
                    "per_page": {
                        "type": "number",
                        "description": "Number of articles per page (default 30, max 1000)"
                    },
                    "tag": {
                        "type": "string",
                        "description": "Filter by tag name"
                    },
                    "tags": {
                        "type": "string",
                        "description": "Comma-separated list of tags to filter by (any match)"
                    },
                    "tags_exclude": {
                        "type": "string",
                        "description": "Comma-separated list of tags to exclude"
                    },
                    "username": {
                        "type": "string",
                        "description": "Filter by author username"
                    },
                    "state": {
                        "type": "string",
                        "description": "Article state filter",
                        "enum": ["fresh", "rising", "all"]
                    },
                    "top": {
                        "type": "number",
                        "description": "Return most popular articles in the last N days"
                    },
                    "collection_id": {
                        "type": "number",
                        "description": "Filter by collection ID"
                    }
                },
                "required": []
            }),
        },
        Tool {
            name: "get_article_by_id".to_string(),
            description: "Get a published article by its numeric ID. Returns full article details including body content.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "id": {
                        "type": "number",
                        "description": "The numeric ID of the article"
                    }
                },
                "required": ["id"]
            }),
        },
        Tool {
            name: "create_article".to_string(),
            description: "Create a new article on DEV Community. Set published to false to save as draft.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "title": {
                        "type": "string",
                        "description": "Title of the article"
                    },
                    "body_markdown": {
                        "type": "string",
                        "description": "Article content in markdown format"
                    },
                    "published": {
                        "type": "boolean",
                        "description": "Whether to publish immediately (false = draft)"
                    },
                    "tags": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "List of tags (max 4)"
                    },
                    "series": {
                        "type": "string",
                        "description": "Article series name"
                    },
                    "canonical_url": {
                        "type": "string",
                        "description": "Original URL if cross-posting"
                    },
                    "description": {
                        "type": "string",
                        "description": "Short description for the article"
                    },
                    "main_image": {
                        "type": "string",
                        "description": "Main cover image URL"
                    },
                    "organization_id": {
                        "type": "number",
                        "description": "Organization ID to publish under"
                    }
                },
                "required": ["title"]
            }),
        },
        Tool {
            name: "update_article".to_string(),
            description: "Update an existing article by its ID. Only include fields you want to change.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "id": {
                        "type": "number",
                        "description": "The numeric ID of the article to update"
                    },
                    "title": {
                        "type": "string",
                        "description": "New title"
                    },
                    "body_markdown": {
                        "type": "string",
                        "description": "New content in markdown"
                    },
                    "published": {
                        "type": "boolean",
                        "description": "Publish or unpublish the article"
                    },
                    "tags": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "New tags (max 4)"
                    },
                    "series": {
                        "type": "string",
                        "description": "Series name (omit to leave unchanged)"
                    },
                    "canonical_url": {
                        "type": "string",
                        "description": "New canonical URL"
                    },
                    "description": {
                        "type": "string",
                        "description": "New description"
                    },
                    "main_image": {
                        "type": "string",
                        "description": "New cover image URL"
                    },
                    "organization_id": {
                        "type": "number",
                        "description": "Organization ID"
                    }
                },
                "required": ["id"]
            }),
        },
        Tool {
            name: "get_my_articles".to_string(),
            description: "Get the authenticated user's own articles. Can filter by published, unpublished, or all.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "page": {
                        "type": "number",
                        "description": "Pagination page number"
                    },
                    "per_page": {
                        "type": "number",
                        "description": "Number of articles per page"
                    },
                    "status": {
                        "type": "string",
                        "description": "Filter by article status (default: all)",
                        "enum": ["published", "unpublished", "all"]
                    }
                },
                "required": []
            }),
        },
        Tool {
            name: "get_comments".to_string(),
            description: "Get comments for an article or podcast episode as threaded conversations. Returns top-level comments with nested replies.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "a_id": {
                        "type": "number",
                        "description": "Article ID to get comments for"
                    },
                    "p_id": {
                        "type": "number",
                        "description": "Podcast episode ID to get comments for"
                    }
                },
                "required": []
            }),
        },
        Tool {
            name: "get_comment_by_id".to_string(),
            description: "Get a single comment by its ID code. Returns the comment with its nested replies.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "id": {
                        "type": "string",
                        "description": "The ID code of the comment (alphanumeric string)"
                    }
                },
                "required": ["id"]
            }),
        },
        Tool {
            name: "get_authenticated_user".to_string(),
            description: "Get the profile of the currently authenticated DEV Community user (the owner of the API key).".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
        },
        Tool {
            name: "get_user_by_username".to_string(),
            description: "Get a user's public profile by their username or numeric ID.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "username": {
                        "type": "string",
                        "description": "Username or numeric user ID"
                    }
                },
                "required": ["username"]
            }),
        },
        Tool {
            name: "get_tags".to_string(),
            description: "List available tags from DEV Community with pagination.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "page": {
                        "type": "number",
                        "description": "Pagination page number"
                    },
                    "per_page": {
                        "type": "number",
                        "description": "Number of tags per page (default 10)"
                    }
                },
                "required": []
            }),
        },
        Tool {
            name: "get_followed_tags".to_string(),
            description: "Get the tags followed by the authenticated user.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
        },
        Tool {
            name: "get_organization".to_string(),
            description: "Get details about a DEV Community organization by its username/slug.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "username": {
                        "type": "string",
                        "description": "Organization username or slug"
                    }
                },
                "required": ["username"]
            }),
        },
        Tool {
            name: "get_organization_articles".to_string(),
            description: "Get articles published by an organization on DEV Community.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "username": {
                        "type": "string",
                        "description": "Organization username or slug"
                    },
                    "page": {
                        "type": "number",
                        "description": "Pagination page number"
                    },
                    "per_page": {
                        "type": "number",
                        "description": "Number of articles per page"
                    }
                },
                "required": ["username"]
            }),
        },
        Tool {
            name: "get_organization_users".to_string(),
            description: "Get users who belong to a DEV Community organization.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "username": {
                        "type": "string",
                        "description": "Organization username or slug"
                    },
                    "page": {
                        "type": "number",
                        "description": "Pagination page number"
                    },
                    "per_page": {
                        "type": "number",
                        "description": "Number of users per page"
                    }
                },
                "required": ["username"]
            }),
        },
        Tool {
            name: "get_reading_list".to_string(),
            description: "Get the authenticated user's reading list (bookmarked articles). Supports pagination.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "page": {
                        "type": "number",
                        "description": "Pagination page number"
                    },
                    "per_page": {
                        "type": "number",
                        "description": "Number of items per page (default 30)"
                    }
                },
                "required": []
            }),
        },
        Tool {
            name: "get_followers".to_string(),
            description: "Get the authenticated user's followers on DEV Community. Supports pagination with sort by creation date.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "page": {
                        "type": "number",
                        "description": "Pagination page number"
                    },
                    "per_page": {
                        "type": "number",
                        "description": "Number of followers per page (default 80)"
                    },
                    "sort": {
                        "type": "string",
                        "description": "Sort followers by field",
                        "enum": ["created_at"]
                    }
                },
                "required": []
            }),
        },
        Tool {
            name: "toggle_reaction".to_string(),
            description: "Toggle a reaction on an article or comment. Calling it once adds the reaction, calling it again removes it. Categories: like, unicorn, readinglist, thumbsup, thumbsdown, vomit, raised_hand, fire.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "reactable_id": {
                        "type": "number",
                        "description": "ID of the article or comment to react to"
                    },
                    "reactable_type": {
                        "type": "string",
                        "description": "Type of the reactable entity",
                        "enum": ["Article", "Comment", "User"]
                    },
                    "category": {
                        "type": "string",
                        "description": "Reaction category",
                        "enum": ["like", "unicorn", "readinglist", "thumbsup", "thumbsdown", "vomit", "raised_hand", "fire"]
                    }
                },
                "required": ["reactable_id", "reactable_type", "category"]
            }),
        },
    ];

    let result = ToolsList { tools };

    serde_json::to_value(result).map_err(internal_error)
}

pub async fn handle_tools_call(
    params: Option<serde_json::Value>,
    client: &ForemClient,
    global: &crate::Global,
) -> std::result::Result<serde_json::Value, JsonRpcError> {
    let params: CallToolParams = serde_json::from_value(params.unwrap_or(serde_json::Value::Null))
        .map_err(|e| invalid_params(format!("Invalid params: {e}")))?;

    match params.name.as_str() {
        "get_articles" => articles::handle_get_articles(client, params.arguments, global).await,
        "get_article_by_id" => {
            articles::handle_get_article_by_id(client, params.arguments, global).await
        }
        "create_article" => articles::handle_create_article(client, params.arguments, global).await,
        "update_article" => articles::handle_update_article(client, params.arguments, global).await,
        "get_my_articles" => {
            articles::handle_get_my_articles(client, params.arguments, global).await
        }
        "get_comments" => comments::handle_get_comments(client, params.arguments, global).await,
        "get_comment_by_id" => {
            comments::handle_get_comment_by_id(client, params.arguments, global).await
        }
        "get_authenticated_user" => {
            users::handle_get_authenticated_user(client, params.arguments, global).await
        }
        "get_user_by_username" => {
            users::handle_get_user_by_username(client, params.arguments, global).await
        }
        "get_tags" => tags::handle_get_tags(client, params.arguments, global).await,
        "get_followed_tags" => {
            tags::handle_get_followed_tags(client, params.arguments, global).await
        }
        "get_organization" => {
            organizations::handle_get_organization(client, params.arguments, global).await
        }
        "get_organization_articles" => {
            organizations::handle_get_organization_articles(client, params.arguments, global).await
        }
        "get_organization_users" => {
            organizations::handle_get_organization_users(client, params.arguments, global).await
        }
        "get_reading_list" => {
            readinglist::handle_get_reading_list(client, params.arguments, global).await
        }
        "get_followers" => followers::handle_get_followers(client, params.arguments, global).await,
        "toggle_reaction" => {
            reactions::handle_toggle_reaction(client, params.arguments, global).await
        }
        _ => Err(invalid_params(format!("Unknown tool: {}", params.name))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ForemConfig;
    use std::time::Duration;

    #[test]
    fn test_tools_list_has_seventeen_tools() {
        let value = handle_tools_list().unwrap();
        let tools = value.get("tools").and_then(|t| t.as_array()).unwrap();
        assert_eq!(tools.len(), 17);
    }

    #[test]
    fn test_tool_names_are_unique() {
        let value = handle_tools_list().unwrap();
        let tools = value.get("tools").and_then(|t| t.as_array()).unwrap();

        let mut names: Vec<&str> = tools
            .iter()
            .filter_map(|t| t.get("name").and_then(|n| n.as_str()))
            .collect();
        let total = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), total);
    }

    #[test]
    fn test_every_tool_has_an_object_schema() {
        let value = handle_tools_list().unwrap();
        let tools = value.get("tools").and_then(|t| t.as_array()).unwrap();

        for tool in tools {
            let schema_type = tool
                .pointer("/inputSchema/type")
                .and_then(|t| t.as_str())
                .unwrap_or_default();
            assert_eq!(schema_type, "object");
        }
    }

    #[test]
    fn test_initialize_reports_server_info() {
        let value = handle_initialize().unwrap();
        assert_eq!(
            value.pointer("/serverInfo/name").and_then(|v| v.as_str()),
            Some("foremtools")
        );
        assert_eq!(
            value.pointer("/protocolVersion").and_then(|v| v.as_str()),
            Some("2024-11-05")
        );
    }

    #[tokio::test]
    async fn test_unknown_tool_is_an_invalid_params_error() {
        let client = ForemClient::new(&ForemConfig {
            api_key: "test-api-key".to_string(),
            base_url: "http://127.0.0.1:1".to_string(),
            timeout: Duration::from_secs(1),
        })
        .unwrap();
        let global = crate::Global { verbose: false };

        let params = serde_json::json!({ "name": "launch_rockets", "arguments": {} });
        let error = handle_tools_call(Some(params), &client, &global)
            .await
            .unwrap_err();

        assert_eq!(error.code, -32602);
        assert!(error.message.contains("launch_rockets"));
    }
}
