//! # Request Descriptors
//!
//! Route operations do not talk to the network. They describe the request a
//! transport should send: the verb, the URI (relative route or absolute HAL
//! link) and an optional JSON body.

use crate::error::CoreError;
use serde_json::Value;
use std::fmt;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request ready to hand to a transport.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub uri: String,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: HttpMethod, uri: impl Into<String>, body: Option<Value>) -> Self {
        Self {
            method,
            uri: uri.into(),
            body,
        }
    }

    pub fn get(uri: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, uri, None)
    }

    pub fn post(uri: impl Into<String>, body: Value) -> Self {
        Self::new(HttpMethod::Post, uri, Some(body))
    }

    pub fn put(uri: impl Into<String>, body: Value) -> Self {
        Self::new(HttpMethod::Put, uri, Some(body))
    }

    pub fn delete(uri: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, uri, None)
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Resolves the URI against the API base URL. Absolute URIs (HAL links)
    /// come back unchanged.
    pub fn resolve_against(&self, base: &Url) -> Result<Url, CoreError> {
        Ok(base.join(&self.uri)?)
    }
}

impl fmt::Display for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_against_joins_relative_routes() {
        let base = Url::parse("https://api.baasic.com/v1/app/").unwrap();

        let request = ApiRequest::get("articles/a1/?embed=tags");
        assert_eq!(
            request.resolve_against(&base).unwrap().as_str(),
            "https://api.baasic.com/v1/app/articles/a1/?embed=tags"
        );

        let request = ApiRequest::put("https://other.host/v1/app/articles/a1", json!({}));
        assert_eq!(
            request.resolve_against(&base).unwrap().as_str(),
            "https://other.host/v1/app/articles/a1"
        );
    }

    #[test]
    fn test_methods_display_as_upper_case_verbs() {
        let verbs: Vec<String> = [HttpMethod::Get, HttpMethod::Post, HttpMethod::Put, HttpMethod::Delete]
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(verbs, ["GET", "POST", "PUT", "DELETE"]);
    }

    #[test]
    fn test_display_shows_method_and_uri() {
        let request = ApiRequest::delete("articles/a1").with_body(json!(["a1"]));
        assert_eq!(request.to_string(), "DELETE articles/a1");
        assert_eq!(request.body, Some(json!(["a1"])));
    }
}
