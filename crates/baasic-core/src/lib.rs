//! # Baasic Core
//!
//! The parameter and link normalization core of the Baasic client SDK. Route
//! sets for individual resources (articles, users, notifications, ...) are
//! thin declarations on top of the pieces in this crate.
//!
//! ## Architecture Overview
//!
//! 1. **Option Normalizer** ([`ModelMapper`]) - turns option bags, keys and
//!    payloads into the flat [`ParameterMap`] a URI template expects
//!    (`search` -> `searchQuery`, `pageNumber` -> `page`, `pageSize` -> `rpp`,
//!    `orderBy`/`orderDirection` -> `sort`).
//! 2. **Object Utility** ([`utility`]) - `is_object`, `is_undefined`, a pure
//!    `merge` and a stable `order_by`.
//! 3. **Hypermedia Link Resolver** ([`HalParser`], [`LinkResolver`]) - reads
//!    HAL `_links`/`_embedded` and resolves a relation to a URI, falling back
//!    to a static template.
//! 4. **URI Templates** ([`UriTemplate`]) - RFC 6570 expansion.
//! 5. **Routes** ([`ResourceRoute`], [`BaseRoute`], [`resource_routes!`]) -
//!    the CRUD + action surface every resource shares, producing
//!    [`ApiRequest`]s for a transport to send.
//!
//! ## Failure Model
//!
//! Normalization, link resolution and expansion never fail: malformed input
//! drops the derived value and everything else is still produced. Only parsing
//! (templates, configuration, URLs) returns [`CoreError`].
//!
//! ## Concurrency
//!
//! Every type here is immutable after construction and `Send + Sync`. One
//! mapper or route set can serve any number of concurrent callers.

pub mod config;
pub mod error;
pub mod hal;
pub mod macros;
pub mod mapper;
pub mod options;
pub mod request;
pub mod route;
pub mod uri_template;
pub mod utility;

// Re-export core types for convenience
pub use config::SdkConfig;
pub use error::CoreError;
pub use hal::{Embedded, HalParser, HalResource, HalValue, Link, LinkResolver, LinkSet};
pub use mapper::ModelMapper;
pub use options::{FindQuery, ParameterMap, QueryOptions};
pub use request::{ApiRequest, HttpMethod};
pub use route::{ActionRoute, BaseRoute, ResourceRoute};
pub use serde_json::Value;
pub use uri_template::UriTemplate;

#[doc(hidden)]
pub use paste;
