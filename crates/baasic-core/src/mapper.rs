//! # Option Normalizer
//!
//! [`ModelMapper`] turns caller-supplied option bags, identifiers and payloads
//! into the flat [`ParameterMap`] that URI template expansion consumes.
//!
//! The mapper never fails. Malformed input (a sort list whose fields and
//! directions differ in length, a scalar where an object was expected) only
//! drops the derived field; everything else is still produced.
//!
//! ```rust
//! use baasic_core::{ModelMapper, QueryOptions};
//! use serde_json::json;
//!
//! let mapper = ModelMapper::default();
//! let params = mapper.find_params(QueryOptions::new().page(2, 10).order("name,date", "asc,desc"));
//!
//! assert_eq!(params["page"], json!(2));
//! assert_eq!(params["rpp"], json!(10));
//! assert_eq!(params["sort"], json!("name|asc, date|desc"));
//! ```

use crate::config::SdkConfig;
use crate::options::{FindQuery, ParameterMap};
use crate::utility::{fields_of, is_object, merge};
use serde_json::Value;
use tracing::debug;

pub const DEFAULT_KEY_PROPERTY: &str = "id";
pub const DEFAULT_MODEL_PROPERTY: &str = "model";

/// Option names and the backend parameter each one is copied to.
const RENAMED_PARAMS: [(&str, &str); 3] = [
    ("search", "searchQuery"),
    ("pageNumber", "page"),
    ("pageSize", "rpp"),
];

/// Stateless option normalizer.
///
/// Only the two property names are configurable: the identifier field used for
/// keyed lookups and the envelope field that wraps payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelMapper {
    key_property: String,
    model_property: String,
}

impl Default for ModelMapper {
    fn default() -> Self {
        Self::new(DEFAULT_KEY_PROPERTY, DEFAULT_MODEL_PROPERTY)
    }
}

impl ModelMapper {
    pub fn new(key_property: impl Into<String>, model_property: impl Into<String>) -> Self {
        Self {
            key_property: key_property.into(),
            model_property: model_property.into(),
        }
    }

    pub fn from_config(config: &SdkConfig) -> Self {
        Self::new(&config.key_property_name, &config.model_property_name)
    }

    pub fn key_property(&self) -> &str {
        &self.key_property
    }

    pub fn model_property(&self) -> &str {
        &self.model_property
    }

    /// Normalizes find options into backend parameter names.
    ///
    /// A bare phrase becomes `{ searchQuery: phrase }`. An option bag is copied
    /// and gains `sort`, `searchQuery`, `page` and `rpp` derived from
    /// `orderBy`/`orderDirection`, `search`, `pageNumber` and `pageSize`. The
    /// original names stay in the result next to the derived ones.
    ///
    /// `sort` is only derived when `orderBy` and `orderDirection` are both
    /// non-empty strings; empty values produce no `sort` rather than `"|"`.
    pub fn find_params(&self, query: impl Into<FindQuery>) -> ParameterMap {
        let options = match query.into() {
            FindQuery::Phrase(phrase) => {
                let mut params = ParameterMap::new();
                params.insert("searchQuery".to_owned(), phrase);
                return params;
            }
            FindQuery::Empty => return ParameterMap::new(),
            FindQuery::Options(options) => options,
        };

        let mut params = options.clone();

        if let Some(sort) = sort_param(&options) {
            params.insert("sort".to_owned(), Value::String(sort));
        }
        for (source, target) in RENAMED_PARAMS {
            if let Some(value) = options.get(source) {
                params.insert(target.to_owned(), value.clone());
            }
        }

        params
    }

    /// Builds lookup parameters for a single resource.
    ///
    /// An object-like identifier (object or array) contributes all of its
    /// fields; a scalar is stored under `property_name` (or the configured key
    /// property). Object-like `options` are merged last and win on collisions.
    pub fn key_params(
        &self,
        key: impl Into<Value>,
        options: Option<&Value>,
        property_name: Option<&str>,
    ) -> ParameterMap {
        let key = key.into();
        let params = if is_object(&key) {
            fields_of(key)
        } else {
            let property = property_name.unwrap_or(&self.key_property);
            let mut params = ParameterMap::new();
            params.insert(property.to_owned(), key);
            params
        };

        match options {
            Some(options) if is_object(options) => merge(&params, [&fields_of(options.clone())]),
            _ => params,
        }
    }

    /// Wraps a payload in the model envelope unless it already is one.
    pub fn model_params(&self, data: Value) -> ParameterMap {
        match data {
            Value::Object(fields) if fields.contains_key(&self.model_property) => fields,
            other => {
                let mut params = ParameterMap::new();
                params.insert(self.model_property.clone(), other);
                params
            }
        }
    }

    /// Parameters for a create call. Same wrapping rule as [`Self::model_params`].
    pub fn create_params(&self, data: Value) -> ParameterMap {
        self.model_params(data)
    }

    /// Parameters for an update call. Same wrapping rule as [`Self::model_params`].
    pub fn update_params(&self, data: Value) -> ParameterMap {
        self.model_params(data)
    }

    /// Parameters for a remove call. Same wrapping rule as [`Self::model_params`].
    pub fn remove_params(&self, data: Value) -> ParameterMap {
        self.model_params(data)
    }

    /// Collects identifiers for a batch remove, preserving input order.
    ///
    /// Items that are not objects are skipped, as are objects without the
    /// identifier field.
    pub fn batch_remove_ids(&self, items: &[Value], property_name: Option<&str>) -> Vec<Value> {
        let property = property_name.unwrap_or(&self.key_property);
        items
            .iter()
            .filter(|item| is_object(item))
            .filter_map(|item| item.get(property).cloned())
            .collect()
    }
}

/// Derives the backend `sort` parameter: `"field|direction"` pairs joined by
/// `", "`. Returns `None` unless both lists are present and equally long.
fn sort_param(options: &ParameterMap) -> Option<String> {
    let order_by = options.get("orderBy").and_then(Value::as_str)?;
    let order_direction = options.get("orderDirection").and_then(Value::as_str)?;
    if order_by.is_empty() || order_direction.is_empty() {
        return None;
    }

    let fields: Vec<&str> = order_by.split(',').collect();
    let directions: Vec<&str> = order_direction.split(',').collect();
    if fields.len() != directions.len() {
        debug!(
            order_by,
            order_direction, "Sort fields and directions differ in length, omitting sort"
        );
        return None;
    }

    let pairs: Vec<String> = fields
        .iter()
        .zip(&directions)
        .map(|(field, direction)| format!("{field}|{direction}"))
        .collect();
    Some(pairs.join(", "))
}
