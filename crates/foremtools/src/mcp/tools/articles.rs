use crate::client::ForemClient;
use crate::prelude::{eprintln, *};
use serde::Deserialize;

use super::{parse_args, tool_result, JsonRpcError};

pub async fn handle_get_articles(
    client: &ForemClient,
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct GetArticlesArgs {
        page: Option<u32>,
        per_page: Option<u32>,
        tag: Option<String>,
        tags: Option<String>,
        tags_exclude: Option<String>,
        username: Option<String>,
        state: Option<String>,
        top: Option<u32>,
        collection_id: Option<i64>,
    }

    let args: GetArticlesArgs = parse_args(arguments)?;

    if global.verbose {
        eprintln!(
            "Calling get_articles: page={:?}, per_page={:?}, tag={:?}",
            args.page, args.per_page, args.tag
        );
    }

    let options = crate::articles::ListOptions {
        page: args.page,
        per_page: args.per_page,
        tag: args.tag,
        tags: args.tags,
        tags_exclude: args.tags_exclude,
        username: args.username,
        state: args.state,
        top: args.top,
        collection_id: args.collection_id,
        json: false,
    };

    tool_result(crate::articles::list_articles_data(client, &options).await)
}

pub async fn handle_get_article_by_id(
    client: &ForemClient,
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct GetArticleByIdArgs {
        id: i64,
    }

    let args: GetArticleByIdArgs = parse_args(arguments)?;

    if global.verbose {
        eprintln!("Calling get_article_by_id: id={}", args.id);
    }

    tool_result(crate::articles::get_article_data(client, args.id).await)
}

pub async fn handle_create_article(
    client: &ForemClient,
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct CreateArticleArgs {
        title: String,
        body_markdown: Option<String>,
        published: Option<bool>,
        tags: Option<Vec<String>>,
        series: Option<String>,
        canonical_url: Option<String>,
        description: Option<String>,
        main_image: Option<String>,
        organization_id: Option<i64>,
    }

    let args: CreateArticleArgs = parse_args(arguments)?;

    if global.verbose {
        eprintln!("Calling create_article: title={}", args.title);
    }

    let options = crate::articles::CreateOptions {
        title: args.title,
        body_markdown: args.body_markdown,
        published: args.published,
        tags: args.tags,
        series: args.series,
        canonical_url: args.canonical_url,
        description: args.description,
        main_image: args.main_image,
        organization_id: args.organization_id,
        json: false,
    };

    tool_result(crate::articles::create_article_data(client, &options).await)
}

pub async fn handle_update_article(
    client: &ForemClient,
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct UpdateArticleArgs {
        id: i64,
        title: Option<String>,
        body_markdown: Option<String>,
        published: Option<bool>,
        tags: Option<Vec<String>>,
        series: Option<String>,
        canonical_url: Option<String>,
        description: Option<String>,
        main_image: Option<String>,
        organization_id: Option<i64>,
    }

    let args: UpdateArticleArgs = parse_args(arguments)?;

    if global.verbose {
        eprintln!("Calling update_article: id={}", args.id);
    }

    let options = crate::articles::UpdateOptions {
        id: args.id,
        title: args.title,
        body_markdown: args.body_markdown,
        published: args.published,
        tags: args.tags,
        series: args.series,
        canonical_url: args.canonical_url,
        description: args.description,
        main_image: args.main_image,
        organization_id: args.organization_id,
        json: false,
    };

    tool_result(crate::articles::update_article_data(client, &options).await)
}

pub async fn handle_get_my_articles(
    client: &ForemClient,
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct GetMyArticlesArgs {
        page: Option<u32>,
        per_page: Option<u32>,
        status: Option<String>,
    }

    let args: GetMyArticlesArgs = parse_args(arguments)?;

    if global.verbose {
        eprintln!("Calling get_my_articles: status={:?}", args.status);
    }

    let options = crate::articles::MineOptions {
        status: args.status.unwrap_or_else(|| "all".to_string()),
        page: args.page,
        per_page: args.per_page,
        json: false,
    };

    tool_result(crate::articles::my_articles_data(client, &options).await)
}
