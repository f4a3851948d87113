//! Blog Query Demo
//!
//! Seeds in-memory blog services and runs a few queries through them:
//! - a hand-built query with named specifications and then-by ordering
//! - a table filter posted as JSON by a grid component
//! - includes loading comments and tags onto the page
//!
//! Run with `RUST_LOG=blogspec=debug cargo run --example blog_demo` to see the
//! pipeline stages.

use anyhow::Result;
use blogspec::entities::{comment, post};
use blogspec::prelude::*;
use tracing_subscriber::EnvFilter;

const CONFIG: &str = r#"
default_page_size: 5
max_page_size: 50
default_sort:
  field: created_at
  direction: desc
"#;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = QueryConfig::from_yaml_str(CONFIG)?;
    let services = BlogServices::in_memory(config);

    populate_test_data(&services).await?;

    // Hand-built query: published posts, most viewed first, then by title
    let query = SearchQuery::new()
        .with_filter(post::published())
        .with_sort(SortDirective::desc("view_count"))
        .with_sort(SortDirective::asc("title"))
        .with_include("comments")
        .with_include("tags")
        .with_paging(0, 3);

    let page = services.posts.find(&query).await?;
    println!("📰 Top published posts ({} of {}):", page.len(), page.count());
    for p in page.entities() {
        let tags: Vec<&str> = p.tags.iter().map(|t| t.name.as_str()).collect();
        println!(
            "  {:>4} views  {:<28} comments={} tags={:?}",
            p.view_count,
            p.title,
            p.comments.len(),
            tags
        );
    }

    // Grid request, as a front end would post it
    let filter: TableFilter = serde_json::from_value(serde_json::json!({
        "filters": [{ "column": "body", "operator": "contains", "value": "Comment " }],
        "sortBy": "body",
        "sortDir": "asc",
        "page": 2,
        "pageSize": 4
    }))?;

    let page = services.comments.get_paged(Some(&filter), None).await?;
    println!(
        "\n💬 Comments page 2 (count={}, has_previous={}, has_next={}):",
        page.count(),
        page.has_previous(),
        page.has_next()
    );
    for c in page.entities() {
        println!("  {}", c.body);
    }

    // Named specification on its own
    let page = services
        .comments
        .find(&SearchQuery::new().with_filter(comment::body_contains("rust")))
        .await?;
    println!("\n🦀 Comments mentioning rust: {}", page.count());

    // Errors are typed and map to HTTP responses
    let bad = TableFilter::new().with_sort("Title", "asc");
    if let Err(e) = services.posts.get_paged(Some(&bad), None).await {
        println!("\n⚠️  {} -> {} {}", e, e.status_code(), e.error_code());
    }

    Ok(())
}

async fn populate_test_data(services: &BlogServices) -> Result<()> {
    let author = services
        .profiles
        .create(Profile::new(
            "ferris".to_string(),
            "Ferris the Crab".to_string(),
            "ferris@example.com".to_string(),
            Some("Writes about rust".to_string()),
        ))
        .await?;

    let mut tags = Vec::new();
    for name in ["rust", "async", "databases"] {
        tags.push(services.tags.create(Tag::new(name.to_string())).await?);
    }

    for i in 0..10i64 {
        let post = services
            .posts
            .create(Post::new(
                author.id,
                format!("Post number {}", i),
                format!("Body of post {}", i),
                i % 3 != 0,
                (i * 37) % 100,
            ))
            .await?;

        for j in 0..3 {
            let body = if (i + j) % 2 == 0 {
                format!("Comment {}.{} about rust", i, j)
            } else {
                format!("Reply {}.{}", i, j)
            };
            services
                .comments
                .create(Comment::new(post.id, author.id, body))
                .await?;
        }

        let tag = &tags[i as usize % tags.len()];
        services.post_tags.create(PostTag::new(post.id, tag.id)).await?;
    }

    Ok(())
}
