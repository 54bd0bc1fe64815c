use baasic_core::{
    resource_routes, BaseRoute, HalParser, HttpMethod, LinkResolver, ModelMapper, QueryOptions,
    SdkConfig,
};
use serde_json::json;
use std::sync::Arc;

resource_routes! {
    /// Comments with moderation actions.
    pub struct CommentRoutes => "comments" {
        key: "id",
        filters: ["articleId", "statuses"],
        actions: {
            approve => (Put, "comment-approve", "approve"),
            purge => (Delete, "comment-purge", "purge"),
        }
    }
}

resource_routes! {
    struct TagRoutes => "tags" {
        key: "slug",
        filters: [],
        actions: {}
    }
}

fn comments() -> CommentRoutes {
    CommentRoutes::new(ModelMapper::default()).expect("Failed to build comment routes")
}

#[test]
fn test_generated_route_set_exposes_templates() {
    let routes = comments();

    assert_eq!(CommentRoutes::PATH, "comments");
    assert_eq!(
        routes.route().find_template().as_str(),
        "comments/{?searchQuery,page,rpp,sort,embed,fields,articleId,statuses}"
    );
    assert_eq!(routes.approve_template().as_str(), "comments/{id}/approve");
    assert_eq!(routes.purge_template().as_str(), "comments/{id}/purge");
}

#[test]
fn test_find_normalizes_options_into_query() {
    let routes = comments();

    let options = QueryOptions::new()
        .search("rust")
        .page(1, 10)
        .order("date", "desc")
        .filter("statuses", json!([1, 2]));
    let request = routes.find(options);

    assert_eq!(request.method, HttpMethod::Get);
    assert_eq!(
        request.uri,
        "comments/?searchQuery=rust&page=1&rpp=10&sort=date%7Cdesc&statuses=1,2"
    );
    assert_eq!(routes.find("hello world").uri, "comments/?searchQuery=hello%20world");
    assert_eq!(routes.find(None::<&str>).uri, "comments/");
}

#[test]
fn test_get_uses_custom_key_property() {
    let tags = TagRoutes::new(ModelMapper::default()).expect("Failed to build tag routes");

    let request = tags.get("rust", Some(&json!({"embed": "articles"})));
    assert_eq!(request.uri, "tags/rust/?embed=articles");
    assert_eq!(tags.remove(json!({"slug": "hal"})).uri, "tags/hal");
}

#[test]
fn test_actions_follow_links_or_fallback() {
    let routes = comments();

    let linked = json!({
        "id": "c1",
        "_links": {
            "comment-approve": { "href": "https://api.baasic.com/v1/app/comments/c1/approve" }
        }
    });
    let approve = routes.approve(linked);
    assert_eq!(approve.method, HttpMethod::Put);
    assert_eq!(approve.uri, "https://api.baasic.com/v1/app/comments/c1/approve");
    assert_eq!(approve.body, Some(json!({"id": "c1"})));

    let purge = routes.purge(json!({"model": {"id": "c2"}}));
    assert_eq!(purge.method, HttpMethod::Delete);
    assert_eq!(purge.uri, "comments/c2/purge");
    assert_eq!(purge.body, None);
}

#[test]
fn test_batch_operations_share_batch_template() {
    let routes = comments();
    let items = vec![json!({"id": "c1"}), json!({"content": "no key"}), json!({"id": "c3"})];

    let create = routes.batch_create(items.clone());
    assert_eq!(create.method, HttpMethod::Post);
    assert_eq!(create.uri, "comments/batch");

    let update = routes.batch_update(items.clone());
    assert_eq!(update.method, HttpMethod::Put);

    let remove = routes.batch_remove(&items);
    assert_eq!(remove.method, HttpMethod::Delete);
    assert_eq!(remove.body, Some(json!(["c1", "c3"])));
}

#[test]
fn test_config_drives_mapper_and_absolute_urls() {
    let config = SdkConfig::from_json(
        r#"{"applicationIdentifier": "blog", "keyPropertyName": "slug", "useSsl": false}"#,
    )
    .expect("Failed to parse config");
    let mapper = ModelMapper::from_config(&config);
    assert_eq!(mapper.key_property(), "slug");

    let routes = CommentRoutes::new(mapper).expect("Failed to build comment routes");
    let request = routes.get("c1", None);
    let base = config.api_url().expect("Failed to build api url");

    assert_eq!(
        request.resolve_against(&base).expect("Failed to resolve").as_str(),
        "http://api.baasic.com/v1/blog/comments/c1/"
    );
}

#[test]
fn test_hal_response_round_trip_through_resolver() {
    let routes = comments();
    let response = json!({
        "id": "c1",
        "content": "first",
        "_links": { "put": { "href": "https://api/comments/c1" } }
    });

    let resource = HalParser.parse_resource(response.clone());
    let uri = LinkResolver.resolve(&resource, "put", routes.route().update_template());
    assert_eq!(uri, "https://api/comments/c1");
    assert_eq!(routes.update(response).uri, uri);
}

#[tokio::test]
async fn test_route_set_is_shared_across_tasks() {
    let routes = Arc::new(comments());

    let handles: Vec<_> = (0..8)
        .map(|n| {
            let routes = Arc::clone(&routes);
            tokio::spawn(async move { routes.get(json!(format!("c{n}")), None).uri })
        })
        .collect();

    for (n, handle) in handles.into_iter().enumerate() {
        let uri = handle.await.expect("Task panicked");
        assert_eq!(uri, format!("comments/c{n}/"));
    }
}
