//! # Core Errors
//!
//! Normalization, link resolution and template expansion never fail. The only
//! fallible surfaces are the ones that parse something: URI templates, the SDK
//! configuration and the API base URL. Their failures are collected here.

/// Errors raised while parsing templates, configuration or URLs.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Unclosed expression in URI template {template:?} at offset {position}")]
    UnclosedExpression { template: String, position: usize },

    #[error("Unsupported operator '{operator}' in URI template {template:?}")]
    UnsupportedOperator { template: String, operator: char },

    #[error("Invalid variable {spec:?} in URI template {template:?}")]
    InvalidVariable { template: String, spec: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}
