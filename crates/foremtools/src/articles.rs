use crate::client::ForemClient;
use crate::prelude::{println, *};
use colored::Colorize;
use foremtools_core::query::QueryValue;
use serde::{Deserialize, Serialize};

#[derive(Debug, clap::Parser)]
#[command(name = "articles")]
#[command(about = "Articles on the Forem instance (dev.to)")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// List published articles with optional filters
    #[clap(name = "list")]
    List(ListOptions),

    /// Get a published article by its numeric ID
    #[clap(name = "get")]
    Get(GetOptions),

    /// Create a new article
    #[clap(name = "create")]
    Create(CreateOptions),

    /// Update an existing article
    #[clap(name = "update")]
    Update(UpdateOptions),

    /// List the authenticated user's own articles
    #[clap(name = "mine")]
    Mine(MineOptions),
}

#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct ListOptions {
    /// Pagination page number
    #[arg(short, long)]
    pub page: Option<u32>,

    /// Number of articles per page (default 30, max 1000)
    #[arg(long)]
    pub per_page: Option<u32>,

    /// Filter by tag name
    #[arg(short, long)]
    pub tag: Option<String>,

    /// Comma-separated list of tags to filter by (any match)
    #[arg(long)]
    pub tags: Option<String>,

    /// Comma-separated list of tags to exclude
    #[arg(long)]
    pub tags_exclude: Option<String>,

    /// Filter by author username
    #[arg(short, long)]
    pub username: Option<String>,

    /// Article state filter: fresh, rising, or all
    #[arg(long)]
    pub state: Option<String>,

    /// Return the most popular articles of the last N days
    #[arg(long)]
    pub top: Option<u32>,

    /// Filter by collection ID
    #[arg(long)]
    pub collection_id: Option<i64>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct GetOptions {
    /// Numeric ID of the article
    #[clap(env = "FOREM_ARTICLE_ID")]
    pub id: i64,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct CreateOptions {
    /// Title of the article
    pub title: String,

    /// Article content in markdown format
    #[arg(long)]
    pub body_markdown: Option<String>,

    /// Whether to publish immediately (false keeps it a draft)
    #[arg(long)]
    pub published: Option<bool>,

    /// Comma-separated list of tags (max 4)
    #[arg(long, value_delimiter = ',')]
    pub tags: Option<Vec<String>>,

    /// Article series name
    #[arg(long)]
    pub series: Option<String>,

    /// Original URL if cross-posting
    #[arg(long)]
    pub canonical_url: Option<String>,

    /// Short description for the article
    #[arg(long)]
    pub description: Option<String>,

    /// Main cover image URL
    #[arg(long)]
    pub main_image: Option<String>,

    /// Organization ID to publish under
    #[arg(long)]
    pub organization_id: Option<i64>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct UpdateOptions {
    /// Numeric ID of the article to update
    pub id: i64,

    /// New title
    #[arg(long)]
    pub title: Option<String>,

    /// New content in markdown
    #[arg(long)]
    pub body_markdown: Option<String>,

    /// Publish or unpublish the article
    #[arg(long)]
    pub published: Option<bool>,

    /// New comma-separated list of tags (max 4)
    #[arg(long, value_delimiter = ',')]
    pub tags: Option<Vec<String>>,

    /// Series name
    #[arg(long)]
    pub series: Option<String>,

    /// New canonical URL
    #[arg(long)]
    pub canonical_url: Option<String>,

    /// New description
    #[arg(long)]
    pub description: Option<String>,

    /// New cover image URL
    #[arg(long)]
    pub main_image: Option<String>,

    /// Organization ID
    #[arg(long)]
    pub organization_id: Option<i64>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct MineOptions {
    /// Filter by article status: published, unpublished, or all
    #[arg(long, default_value = "all")]
    pub status: String,

    /// Pagination page number
    #[arg(short, long)]
    pub page: Option<u32>,

    /// Number of articles per page
    #[arg(long)]
    pub per_page: Option<u32>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    match app.command {
        Commands::List(options) => list_articles(options, global).await,
        Commands::Get(options) => get_article(options, global).await,
        Commands::Create(options) => create_article(options, global).await,
        Commands::Update(options) => update_article(options, global).await,
        Commands::Mine(options) => my_articles(options, global).await,
    }
}

/// Public data function - used by both CLI and MCP
pub async fn list_articles_data(
    client: &ForemClient,
    options: &ListOptions,
) -> Result<serde_json::Value> {
    let articles = client
        .get(
            "/articles",
            &[
                ("page", options.page.map(QueryValue::from)),
                ("per_page", options.per_page.map(QueryValue::from)),
                ("tag", options.tag.clone().map(QueryValue::from)),
                ("tags", options.tags.clone().map(QueryValue::from)),
                (
                    "tags_exclude",
                    options.tags_exclude.clone().map(QueryValue::from),
                ),
                ("username", options.username.clone().map(QueryValue::from)),
                ("state", options.state.clone().map(QueryValue::from)),
                ("top", options.top.map(QueryValue::from)),
                ("collection_id", options.collection_id.map(QueryValue::from)),
            ],
            true,
        )
        .await?;

    Ok(articles)
}

/// Public data function - used by both CLI and MCP
pub async fn get_article_data(client: &ForemClient, id: i64) -> Result<serde_json::Value> {
    Ok(client.get(&f!("/articles/{id}"), &[], true).await?)
}

/// Public data function - used by both CLI and MCP
pub async fn create_article_data(
    client: &ForemClient,
    options: &CreateOptions,
) -> Result<serde_json::Value> {
    let article = article_payload(
        Some(&options.title),
        options.body_markdown.as_ref(),
        options.published,
        options.tags.as_ref(),
        options.series.as_ref(),
        options.canonical_url.as_ref(),
        options.description.as_ref(),
        options.main_image.as_ref(),
        options.organization_id,
    );

    Ok(client
        .post("/articles", Some(serde_json::json!({ "article": article })), &[])
        .await?)
}

/// Public data function - used by both CLI and MCP
pub async fn update_article_data(
    client: &ForemClient,
    options: &UpdateOptions,
) -> Result<serde_json::Value> {
    let article = article_payload(
        options.title.as_ref(),
        options.body_markdown.as_ref(),
        options.published,
        options.tags.as_ref(),
        options.series.as_ref(),
        options.canonical_url.as_ref(),
        options.description.as_ref(),
        options.main_image.as_ref(),
        options.organization_id,
    );

    Ok(client
        .put(
            &f!("/articles/{}", options.id),
            Some(serde_json::json!({ "article": article })),
        )
        .await?)
}

/// Public data function - used by both CLI and MCP
/// Selects the endpoint variant from the status filter.
pub async fn my_articles_data(
    client: &ForemClient,
    options: &MineOptions,
) -> Result<serde_json::Value> {
    let path = match options.status.as_str() {
        "published" => "/articles/me/published",
        "unpublished" => "/articles/me/unpublished",
        _ => "/articles/me/all",
    };

    Ok(client
        .get(
            path,
            &[
                ("page", options.page.map(QueryValue::from)),
                ("per_page", options.per_page.map(QueryValue::from)),
            ],
            true,
        )
        .await?)
}

/// Build the nested `article` object, skipping unset fields so the API only
/// sees the fields the caller wants to change.
#[allow(clippy::too_many_arguments)]
fn article_payload(
    title: Option<&String>,
    body_markdown: Option<&String>,
    published: Option<bool>,
    tags: Option<&Vec<String>>,
    series: Option<&String>,
    canonical_url: Option<&String>,
    description: Option<&String>,
    main_image: Option<&String>,
    organization_id: Option<i64>,
) -> serde_json::Map<String, serde_json::Value> {
    let mut article = serde_json::Map::new();

    if let Some(title) = title {
        article.insert("title".to_string(), title.clone().into());
    }
    if let Some(body_markdown) = body_markdown {
        article.insert("body_markdown".to_string(), body_markdown.clone().into());
    }
    if let Some(published) = published {
        article.insert("published".to_string(), published.into());
    }
    if let Some(tags) = tags {
        article.insert("tags".to_string(), tags.clone().into());
    }
    if let Some(series) = series {
        article.insert("series".to_string(), series.clone().into());
    }
    if let Some(canonical_url) = canonical_url {
        article.insert("canonical_url".to_string(), canonical_url.clone().into());
    }
    if let Some(description) = description {
        article.insert("description".to_string(), description.clone().into());
    }
    if let Some(main_image) = main_image {
        article.insert("main_image".to_string(), main_image.clone().into());
    }
    if let Some(organization_id) = organization_id {
        article.insert("organization_id".to_string(), organization_id.into());
    }

    article
}

async fn list_articles(options: ListOptions, global: crate::Global) -> Result<()> {
    let client = ForemClient::from_env()?;

    if global.verbose {
        println!("Fetching articles...");
    }

    let articles = list_articles_data(&client, &options).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&articles)?);
        return Ok(());
    }

    print_article_table(&articles)
}

async fn get_article(options: GetOptions, global: crate::Global) -> Result<()> {
    let client = ForemClient::from_env()?;

    if global.verbose {
        println!("Fetching article {}...", options.id);
    }

    let article = get_article_data(&client, options.id).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&article)?);
        return Ok(());
    }

    print_article_detail(&article);
    Ok(())
}

async fn create_article(options: CreateOptions, global: crate::Global) -> Result<()> {
    let client = ForemClient::from_env()?;
    let article = create_article_data(&client, &options).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&article)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Created article".green(),
        field_str(&article, "url").unwrap_or_default().bright_white()
    );
    print_article_detail(&article);
    Ok(())
}

async fn update_article(options: UpdateOptions, global: crate::Global) -> Result<()> {
    let client = ForemClient::from_env()?;
    let article = update_article_data(&client, &options).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&article)?);
        return Ok(());
    }

    println!("{} {}", "Updated article".green(), options.id);
    print_article_detail(&article);
    Ok(())
}

async fn my_articles(options: MineOptions, global: crate::Global) -> Result<()> {
    let client = ForemClient::from_env()?;

    if global.verbose {
        println!("Fetching your {} articles...", options.status);
    }

    let articles = my_articles_data(&client, &options).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&articles)?);
        return Ok(());
    }

    print_article_table(&articles)
}

fn field_str<'a>(value: &'a serde_json::Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(|v| v.as_str())
}

fn field_i64(value: &serde_json::Value, key: &str) -> i64 {
    value.get(key).and_then(|v| v.as_i64()).unwrap_or_default()
}

fn print_article_table(articles: &serde_json::Value) -> Result<()> {
    let items = articles
        .as_array()
        .ok_or_eyre("Expected an array of articles")?;

    if items.is_empty() {
        println!("No articles found.");
        return Ok(());
    }

    let mut table = new_table();
    table.add_row(prettytable::row![
        "ID".bold().cyan(),
        "TITLE".bold().cyan(),
        "AUTHOR".bold().cyan(),
        "REACTIONS".bold().cyan(),
        "COMMENTS".bold().cyan(),
        "PUBLISHED".bold().cyan()
    ]);

    for article in items {
        table.add_row(prettytable::row![
            field_i64(article, "id").to_string().bright_black(),
            field_str(article, "title").unwrap_or("(untitled)"),
            article
                .pointer("/user/username")
                .and_then(|v| v.as_str())
                .unwrap_or("(unknown)")
                .bright_magenta(),
            field_i64(article, "public_reactions_count"),
            field_i64(article, "comments_count"),
            field_str(article, "readable_publish_date")
                .unwrap_or("(draft)")
                .bright_black()
        ]);
    }

    table.printstd();
    Ok(())
}

fn print_article_detail(article: &serde_json::Value) {
    std::println!(
        "\n{}\n",
        field_str(article, "title").unwrap_or("(untitled)").bold().bright_white()
    );

    let mut table = new_table();
    table.add_row(prettytable::row![
        "ID".bold().cyan(),
        field_i64(article, "id").to_string()
    ]);

    if let Some(url) = field_str(article, "url") {
        table.add_row(prettytable::row!["URL".bold().cyan(), url]);
    }

    if let Some(username) = article.pointer("/user/username").and_then(|v| v.as_str()) {
        table.add_row(prettytable::row![
            "Author".bold().cyan(),
            username.bright_magenta().to_string()
        ]);
    }

    if let Some(published_at) = field_str(article, "published_at") {
        table.add_row(prettytable::row![
            "Published".bold().cyan(),
            published_at.bright_black().to_string()
        ]);
    }

    if let Some(tags) = article.get("tag_list").and_then(|v| v.as_array()) {
        let names: Vec<&str> = tags.iter().filter_map(|t| t.as_str()).collect();
        if !names.is_empty() {
            table.add_row(prettytable::row![
                "Tags".bold().cyan(),
                names.join(", ").bright_green().to_string()
            ]);
        }
    }

    table.add_row(prettytable::row![
        "Reactions".bold().cyan(),
        field_i64(article, "public_reactions_count").to_string()
    ]);
    table.add_row(prettytable::row![
        "Comments".bold().cyan(),
        field_i64(article, "comments_count").to_string()
    ]);

    table.printstd();

    if let Some(description) = field_str(article, "description") {
        std::println!("\n{}", description);
    }

    std::println!();
}
