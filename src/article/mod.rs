//! # Article Routes
//!
//! Articles and their comments. Both support the standard CRUD surface from
//! [`BaseRoute`](baasic_core::BaseRoute) plus workflow actions that follow the
//! article's HAL links when present.
//!
//! | Action | Relation | Fallback |
//! |--------|----------|----------|
//! | `publish` | `publish` | `articles/{id}/publish` |
//! | `unpublish` | `unpublish` | `articles/{id}/unpublish` |
//! | `archive` | `archive` | `articles/{id}/archive` |
//! | `restore` | `restore` | `articles/{id}/restore` |

use baasic_core::resource_routes;

resource_routes! {
    /// Routes for blog articles.
    pub struct ArticleRoutes => "articles" {
        key: "id",
        filters: ["statuses", "tags", "startDate", "endDate"],
        actions: {
            publish => (Put, "publish", "publish"),
            unpublish => (Put, "unpublish", "unpublish"),
            archive => (Put, "archive", "archive"),
            restore => (Put, "restore", "restore"),
        }
    }
}

resource_routes! {
    /// Routes for article comments and their moderation workflow.
    pub struct ArticleCommentRoutes => "article-comments" {
        key: "id",
        filters: ["articleId", "statuses"],
        actions: {
            approve => (Put, "comment-approve", "approve"),
            unapprove => (Put, "comment-unapprove", "unapprove"),
            flag => (Put, "comment-flag", "flag"),
            unflag => (Put, "comment-unflag", "unflag"),
            report => (Put, "comment-report", "report"),
            spam => (Put, "comment-spam", "spam"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use baasic_core::{BaseRoute, HttpMethod, ModelMapper, QueryOptions};
    use serde_json::json;

    #[test]
    fn test_find_articles_by_tag_and_status() {
        let articles = ArticleRoutes::new(ModelMapper::default()).unwrap();
        let request = articles.find(
            QueryOptions::new()
                .page(2, 5)
                .filter("tags", "rust")
                .filter("statuses", json!(["published", "draft"])),
        );

        assert_eq!(
            request.uri,
            "articles/?page=2&rpp=5&statuses=published,draft&tags=rust"
        );
    }

    #[test]
    fn test_unpublish_without_links_uses_fallback() {
        let articles = ArticleRoutes::new(ModelMapper::default()).unwrap();
        let request = articles.unpublish(json!({"id": "a1", "title": "Hello"}));

        assert_eq!(request.method, HttpMethod::Put);
        assert_eq!(request.uri, "articles/a1/unpublish");
        assert_eq!(request.body, Some(json!({"id": "a1", "title": "Hello"})));
    }

    #[test]
    fn test_comment_actions_use_comment_relations() {
        let comments = ArticleCommentRoutes::new(ModelMapper::default()).unwrap();
        let comment = json!({
            "id": "c1",
            "_links": {
                "comment-spam": { "href": "https://api.baasic.com/v1/blog/article-comments/c1/spam" },
                "spam": { "href": "https://wrong" }
            }
        });

        assert_eq!(
            comments.spam(comment.clone()).uri,
            "https://api.baasic.com/v1/blog/article-comments/c1/spam"
        );
        assert_eq!(comments.flag(comment).uri, "article-comments/c1/flag");
    }
}
