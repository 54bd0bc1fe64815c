//! # Hypermedia Links
//!
//! Backend responses carry HAL hypermedia: a `_links` object mapping relation
//! names to links, and an `_embedded` object holding nested resources.
//! [`HalParser`] turns raw JSON into [`HalResource`] values, and
//! [`LinkResolver`] picks the URI for an operation on a fetched resource.
//!
//! ## Two-tier resolution
//!
//! When a resource carries a link for the requested relation, its `href` is
//! used verbatim. Otherwise the route's static fallback template is expanded
//! with the resource's own fields. The second tier covers resources that were
//! never fetched from the backend, such as a payload right after `create`.
//!
//! ```rust
//! use baasic_core::{HalParser, LinkResolver, UriTemplate};
//! use serde_json::json;
//!
//! let fallback = UriTemplate::parse("articles/{id}/unpublish").unwrap();
//! let resolver = LinkResolver::default();
//!
//! let linked = HalParser::default().parse_resource(json!({
//!     "id": "a1",
//!     "_links": { "unpublish": { "href": "https://api.example.com/v1/app/articles/a1/unpublish" } }
//! }));
//! assert_eq!(
//!     resolver.resolve(&linked, "unpublish", &fallback),
//!     "https://api.example.com/v1/app/articles/a1/unpublish"
//! );
//!
//! let plain = HalParser::default().parse_resource(json!({ "id": "a1" }));
//! assert_eq!(resolver.resolve(&plain, "unpublish", &fallback), "articles/a1/unpublish");
//! ```

use crate::options::ParameterMap;
use crate::uri_template::UriTemplate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, trace};

pub const LINKS_PROPERTY: &str = "_links";
pub const EMBEDDED_PROPERTY: &str = "_embedded";

/// A single hypermedia link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub templated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Link {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            ..Self::default()
        }
    }
}

/// Links keyed by relation name. A relation may carry several links.
pub type LinkSet = BTreeMap<String, Vec<Link>>;

/// An embedded resource slot: a single resource or a list of them.
#[derive(Debug, Clone, PartialEq)]
pub enum Embedded {
    One(Box<HalResource>),
    Many(Vec<HalResource>),
}

/// A parsed HAL resource.
///
/// `links()` is the optional hypermedia capability: `None` means the resource
/// came without a `_links` section at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HalResource {
    fields: ParameterMap,
    links: Option<LinkSet>,
    embedded: BTreeMap<String, Embedded>,
}

impl HalResource {
    /// A resource with plain fields and no hypermedia.
    pub fn from_fields(fields: ParameterMap) -> Self {
        Self {
            fields,
            ..Self::default()
        }
    }

    pub fn with_link(mut self, rel: impl Into<String>, link: Link) -> Self {
        self.links
            .get_or_insert_with(LinkSet::new)
            .entry(rel.into())
            .or_default()
            .push(link);
        self
    }

    pub fn fields(&self) -> &ParameterMap {
        &self.fields
    }

    pub fn links(&self) -> Option<&LinkSet> {
        self.links.as_ref()
    }

    /// First link registered for `rel`, if any.
    pub fn link(&self, rel: &str) -> Option<&Link> {
        self.links()?.get(rel)?.first()
    }

    pub fn embedded(&self, name: &str) -> Option<&Embedded> {
        self.embedded.get(name)
    }

    /// Plain JSON for the resource, embedded resources folded back in as
    /// fields. Hypermedia is dropped.
    pub fn into_value(self) -> Value {
        let mut fields = self.fields;
        for (name, embedded) in self.embedded {
            let value = match embedded {
                Embedded::One(resource) => resource.into_value(),
                Embedded::Many(resources) => {
                    Value::Array(resources.into_iter().map(HalResource::into_value).collect())
                }
            };
            fields.insert(name, value);
        }
        Value::Object(fields)
    }
}

/// Result of parsing an arbitrary JSON value.
#[derive(Debug, Clone, PartialEq)]
pub enum HalValue {
    Resource(HalResource),
    List(Vec<HalValue>),
    Plain(Value),
}

/// Stateless HAL parser.
#[derive(Debug, Clone, Copy, Default)]
pub struct HalParser;

impl HalParser {
    /// Objects become resources, arrays are parsed element-wise and anything
    /// else passes through untouched.
    pub fn parse(&self, value: Value) -> HalValue {
        match value {
            Value::Object(_) => HalValue::Resource(self.parse_resource(value)),
            Value::Array(items) => {
                HalValue::List(items.into_iter().map(|item| self.parse(item)).collect())
            }
            other => HalValue::Plain(other),
        }
    }

    /// Parses an object into a resource. Non-objects yield an empty resource.
    pub fn parse_resource(&self, value: Value) -> HalResource {
        let Value::Object(mut fields) = value else {
            trace!("Value is not an object, no resource to parse");
            return HalResource::default();
        };

        let links = fields.remove(LINKS_PROPERTY).map(parse_links);
        let embedded = match fields.remove(EMBEDDED_PROPERTY) {
            Some(Value::Object(slots)) => slots
                .into_iter()
                .filter_map(|(name, slot)| self.parse_embedded(slot).map(|e| (name, e)))
                .collect(),
            _ => BTreeMap::new(),
        };

        HalResource {
            fields,
            links,
            embedded,
        }
    }

    fn parse_embedded(&self, slot: Value) -> Option<Embedded> {
        match slot {
            Value::Object(_) => Some(Embedded::One(Box::new(self.parse_resource(slot)))),
            Value::Array(items) => Some(Embedded::Many(
                items
                    .into_iter()
                    .filter(|item| item.is_object())
                    .map(|item| self.parse_resource(item))
                    .collect(),
            )),
            _ => None,
        }
    }
}

/// Reads a `_links` section. Entries that are not link objects (or lists of
/// them) are skipped.
fn parse_links(value: Value) -> LinkSet {
    let Value::Object(relations) = value else {
        return LinkSet::new();
    };

    relations
        .into_iter()
        .filter_map(|(rel, entry)| {
            let links: Vec<Link> = match entry {
                Value::Array(items) => items.into_iter().filter_map(parse_link).collect(),
                single => parse_link(single).into_iter().collect(),
            };
            (!links.is_empty()).then_some((rel, links))
        })
        .collect()
}

fn parse_link(value: Value) -> Option<Link> {
    serde_json::from_value(value).ok()
}

/// Resolves relation names to URIs, preferring embedded links.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkResolver;

impl LinkResolver {
    /// Returns the `href` of `rel` when the resource carries a populated link,
    /// otherwise `fallback` expanded with the resource's fields.
    pub fn resolve(&self, resource: &HalResource, rel: &str, fallback: &UriTemplate) -> String {
        match resource.link(rel).filter(|link| !link.href.is_empty()) {
            Some(link) => {
                trace!(rel, href = %link.href, "Resolved embedded link");
                link.href.clone()
            }
            None => {
                debug!(rel, template = %fallback, "No embedded link, expanding fallback template");
                fallback.expand(resource.fields())
            }
        }
    }

    /// Parses `value` as a resource, then resolves `rel` against it.
    pub fn resolve_value(&self, value: &Value, rel: &str, fallback: &UriTemplate) -> String {
        let resource = HalParser.parse_resource(value.clone());
        self.resolve(&resource, rel, fallback)
    }
}
