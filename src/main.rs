use baasic_core::{BaseRoute, QueryOptions, SdkConfig};
use baasic_sdk::lifecycle::tracing::setup_tracing;
use baasic_sdk::lifecycle::BaasicApp;
use serde_json::json;
use tracing::{info, info_span};

const DEMO_APPLICATION: &str = "demo";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    let mut config = SdkConfig::from_env();
    if config.application_identifier.is_empty() {
        config.application_identifier = DEMO_APPLICATION.to_owned();
    }
    let app = BaasicApp::new(config)?;

    let span = info_span!("article_listing");
    let listing = span.in_scope(|| {
        info!("Listing published articles");
        app.articles.find(
            QueryOptions::new()
                .search("release notes")
                .page(1, 10)
                .order("publishDate,title", "desc,asc")
                .filter("statuses", json!(["published"])),
        )
    });
    info!(url = %app.absolute_url(&listing)?, "Find request");

    // A fetched article carries its own links
    let fetched = json!({
        "id": "a1",
        "title": "Hello",
        "_links": {
            "unpublish": { "href": app.api_url().join("articles/a1/unpublish")?.to_string() }
        }
    });
    let unpublish = app.articles.unpublish(fetched);
    info!(request = %unpublish, "Unpublish via link");

    // A fresh payload does not, so the fallback template is used
    let archive = app.articles.archive(json!({"id": "a2", "title": "Draft"}));
    info!(url = %app.absolute_url(&archive)?, "Archive via template");

    let lock = app.users.lock(json!("ann"));
    info!(url = %app.absolute_url(&lock)?, "Lock user");

    let cleanup = app.article_comments.batch_remove(&[
        json!({"id": "c1"}),
        json!({"id": "c2"}),
        json!({"content": "no id, skipped"}),
    ]);
    info!(
        url = %app.absolute_url(&cleanup)?,
        body = ?cleanup.body,
        "Batch remove comments"
    );

    info!("Demo complete");
    Ok(())
}
