//! # Query Options
//!
//! Typed view of the loosely shaped option bags callers pass to `find`
//! operations. The well-known paging, sorting and search fields are typed; any
//! other filter (dates, id lists, status lists) rides along untouched in
//! [`QueryOptions::filters`].

use crate::utility::{fields_of, is_object};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Flat key/value map handed to URI template expansion.
pub type ParameterMap = serde_json::Map<String, Value>;

/// Paging, sorting, search and filter options for a `find` call.
///
/// Field names serialize in the backend's camelCase form (`pageNumber`,
/// `orderBy`, ...). Unknown fields deserialize into `filters`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u64>,
    /// Comma separated list of fields to sort by.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,
    /// Comma separated list of directions, one per `order_by` field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_direction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<String>,
    #[serde(flatten)]
    pub filters: ParameterMap,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page_number: u64, page_size: u64) -> Self {
        self.page_number = Some(page_number);
        self.page_size = Some(page_size);
        self
    }

    pub fn order(mut self, order_by: impl Into<String>, order_direction: impl Into<String>) -> Self {
        self.order_by = Some(order_by.into());
        self.order_direction = Some(order_direction.into());
        self
    }

    pub fn search(mut self, phrase: impl Into<String>) -> Self {
        self.search = Some(phrase.into());
        self
    }

    pub fn embed(mut self, embed: impl Into<String>) -> Self {
        self.embed = Some(embed.into());
        self
    }

    pub fn fields(mut self, fields: impl Into<String>) -> Self {
        self.fields = Some(fields.into());
        self
    }

    /// Adds a pass-through filter. A later filter with the same name wins.
    pub fn filter(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.insert(name.into(), value.into());
        self
    }

    /// Flattens the options into the loosely typed map the normalizer reads.
    ///
    /// Typed fields are written after the filters, so a typed field wins over
    /// a filter of the same name.
    pub fn into_map(self) -> ParameterMap {
        let mut map = self.filters;
        let typed = [
            ("pageNumber", self.page_number.map(Value::from)),
            ("pageSize", self.page_size.map(Value::from)),
            ("orderBy", self.order_by.map(Value::from)),
            ("orderDirection", self.order_direction.map(Value::from)),
            ("search", self.search.map(Value::from)),
            ("embed", self.embed.map(Value::from)),
            ("fields", self.fields.map(Value::from)),
        ];
        for (key, value) in typed {
            if let Some(value) = value {
                map.insert(key.to_owned(), value);
            }
        }
        map
    }
}

/// Input accepted by find normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum FindQuery {
    /// A bare scalar, treated as a search phrase.
    Phrase(Value),
    /// An option bag.
    Options(ParameterMap),
    /// No options at all.
    Empty,
}

/// Object-like values (objects and arrays) become option bags, `null` is
/// empty and any other scalar is a phrase.
impl From<Value> for FindQuery {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => FindQuery::Empty,
            value if is_object(&value) => FindQuery::Options(fields_of(value)),
            phrase => FindQuery::Phrase(phrase),
        }
    }
}

impl From<&str> for FindQuery {
    fn from(phrase: &str) -> Self {
        FindQuery::Phrase(Value::from(phrase))
    }
}

impl From<String> for FindQuery {
    fn from(phrase: String) -> Self {
        FindQuery::Phrase(Value::from(phrase))
    }
}

impl From<QueryOptions> for FindQuery {
    fn from(options: QueryOptions) -> Self {
        FindQuery::Options(options.into_map())
    }
}

impl From<ParameterMap> for FindQuery {
    fn from(map: ParameterMap) -> Self {
        FindQuery::Options(map)
    }
}

impl<T: Into<FindQuery>> From<Option<T>> for FindQuery {
    fn from(query: Option<T>) -> Self {
        query.map_or(FindQuery::Empty, Into::into)
    }
}
